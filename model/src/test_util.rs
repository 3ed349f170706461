use std::collections::VecDeque;

use kernal::prelude::*;

use crate::check::DiceGroup;
use crate::roll::{DICE_SIDES, DieRoller, Roll};

pub fn roll(value: u8) -> Roll {
    assert_that!(value as usize).is_less_than_or_equal_to(DICE_SIDES);

    Roll::new(value).unwrap()
}

pub fn group_faces(group: &DiceGroup) -> Vec<u8> {
    group.rolls().map(Roll::as_u8).collect()
}

/// Die roller that replays a fixed sequence of faces and panics once it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDieRoller {
    faces: VecDeque<Roll>,
}

impl ScriptedDieRoller {

    pub fn new(faces: impl IntoIterator<Item = u8>) -> ScriptedDieRoller {
        ScriptedDieRoller {
            faces: faces.into_iter().map(roll).collect(),
        }
    }

    /// Number of faces not rolled yet.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieRoller for ScriptedDieRoller {
    fn roll(&mut self) -> Roll {
        self.faces.pop_front().expect("scripted die roller exhausted")
    }
}
