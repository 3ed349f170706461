use std::ops::RangeInclusive;

use serde::Serialize;

use crate::check::DiceResult;

/// Successes needed for a critical success on a regular pool.
pub const CRITICAL_SUCCESSES: usize = 3;

/// Successes a desperation roll needs before it counts at all.
pub const DESPERATION_SUCCESSES: usize = 2;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessTier {
    Failure,
    LimitedSuccess,
    CriticalSuccess,
}

impl SuccessTier {

    /// A desperation roll needs both of its dice to succeed. It can only reach three successes
    /// through chain or push dice, in which case it is critical like any other roll.
    pub fn classify(successes: usize, desperation: bool) -> SuccessTier {
        let needed = if desperation { DESPERATION_SUCCESSES } else { 1 };

        if successes >= CRITICAL_SUCCESSES {
            SuccessTier::CriticalSuccess
        }
        else if successes >= needed {
            SuccessTier::LimitedSuccess
        }
        else {
            SuccessTier::Failure
        }
    }

    pub fn is_success(self) -> bool {
        self != SuccessTier::Failure
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct RollOutcome {
    pub successes: usize,
    pub tier: SuccessTier,
    pub desperation: bool,
    pub pushed: bool,
}

impl RollOutcome {

    pub fn evaluate(dice: &DiceResult, desperation: bool, pushed: bool) -> RollOutcome {
        let successes = dice.successes();

        RollOutcome {
            successes,
            tier: SuccessTier::classify(successes, desperation),
            desperation,
            pushed,
        }
    }

    pub fn is_failure(&self) -> bool {
        !self.tier.is_success()
    }

    /// Extra damage an attack can buy: every success beyond the first one needed to hit.
    pub fn extra_damage_options(&self) -> RangeInclusive<u32> {
        0..=self.successes.saturating_sub(1) as u32
    }
}
