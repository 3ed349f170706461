use std::num::NonZeroU8;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

pub const DICE_SIDES: usize = 6;

/// The face shown by a single six-sided die.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "u8")]
pub struct Roll(NonZeroU8);

impl Roll {

    pub const MIN: Roll = Roll(NonZeroU8::new(1).unwrap());
    pub const MAX: Roll = Roll(NonZeroU8::new(DICE_SIDES as u8).unwrap());
    pub const ALL: [Roll; DICE_SIDES] = {
        let mut result = [Roll::MIN; DICE_SIDES];
        let mut i = 0;

        while i < DICE_SIDES {
            result[i] = Roll(NonZeroU8::new((i + 1) as u8).unwrap());
            i += 1;
        }

        result
    };

    pub fn new(value: u8) -> Option<Roll> {
        if value as usize > DICE_SIDES {
            return None;
        }

        NonZeroU8::new(value).map(Roll)
    }

    pub fn as_u8(self) -> u8 {
        self.0.get()
    }

    /// Whether this face counts as a success, i.e. shows the maximum value.
    pub fn is_success(self) -> bool {
        self == Roll::MAX
    }
}

impl From<Roll> for u8 {
    fn from(roll: Roll) -> u8 {
        roll.as_u8()
    }
}

/// Source of die results. The rules never call a random number generator directly, so hosts can
/// replace the dice (seeded, scripted or physical).
pub trait DieRoller {

    fn roll(&mut self) -> Roll;

    fn roll_many(&mut self, count: usize) -> Vec<Roll> {
        (0..count).map(|_| self.roll()).collect()
    }
}

impl<R: DieRoller + ?Sized> DieRoller for &mut R {
    fn roll(&mut self) -> Roll {
        (**self).roll()
    }
}

#[derive(Clone, Debug)]
pub struct RandomDieRoller {
    rng: ChaCha8Rng,
}

impl RandomDieRoller {

    pub fn seeded(seed: u64) -> RandomDieRoller {
        RandomDieRoller {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> RandomDieRoller {
        RandomDieRoller {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DieRoller for RandomDieRoller {
    fn roll(&mut self) -> Roll {
        Roll::ALL[self.rng.gen_range(0..DICE_SIDES)]
    }
}
