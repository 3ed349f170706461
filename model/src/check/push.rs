use serde::{Deserialize, Serialize};

use crate::check::outcome::RollOutcome;
use crate::check::{DiceGroupKind, Die, RolledCheck};
use crate::error::AlreadyPushedError;
use crate::fortune::FortuneEvent;
use crate::roll::DieRoller;

/// Extra dice granted when pushing, from a prayer and from the modifiers checked for it.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PushBonus {
    pub prayer: usize,
    pub prayer_modifiers: usize,
}

impl PushBonus {

    pub fn dice(self) -> usize {
        self.prayer + self.prayer_modifiers
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PushResult {
    pub outcome: RollOutcome,

    /// Must be applied to the fortune counter exactly once.
    pub fortune: FortuneEvent,
}

impl RolledCheck {

    /// Rerolls every die that is not a success and adds the bonus dice to every ordinary pool.
    /// Automatic fire chains get rerolled, but never receive bonus dice.
    ///
    /// A check can be pushed only once. A rejected push leaves the check untouched.
    pub fn push(
        &mut self,
        bonus: PushBonus,
        roller: &mut impl DieRoller,
    ) -> Result<PushResult, AlreadyPushedError> {
        if self.outcome.pushed {
            return Err(AlreadyPushedError);
        }

        let bonus_dice = bonus.dice();

        for group in &mut self.dice.groups {
            for die in group.dice.iter_mut().filter(|die| !die.roll.is_success()) {
                die.roll = roller.roll();
                die.rerolled = true;
            }

            if group.kind == DiceGroupKind::Pool {
                group.dice.extend(roller.roll_many(bonus_dice).into_iter().map(Die::new));
            }
        }

        self.outcome = RollOutcome::evaluate(&self.dice, self.pool.desperation, true);

        tracing::debug!(
            bonus_dice,
            successes = self.outcome.successes,
            tier = ?self.outcome.tier,
            "pushed check"
        );

        Ok(PushResult {
            outcome: self.outcome,
            fortune: FortuneEvent::for_push_by(self.request.actor_kind),
        })
    }
}
