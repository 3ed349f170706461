pub mod modifier;
pub mod outcome;
pub mod push;

use serde::Serialize;

use crate::auto_fire;
use crate::check::outcome::RollOutcome;
use crate::config::RulesConfig;
use crate::error::InvalidRollError;
use crate::pool::{DicePool, RollRequest};
use crate::roll::{DieRoller, Roll};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Die {
    pub roll: Roll,

    /// Set once the die was rerolled by a push. Only relevant for display.
    pub rerolled: bool,
}

impl Die {

    pub fn new(roll: Roll) -> Die {
        Die {
            roll,
            rerolled: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceGroupKind {
    /// Dice rolled together as an ordinary pool.
    Pool,

    /// One automatic fire chain, rolled die by die until the first failure.
    Chain,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DiceGroup {
    pub kind: DiceGroupKind,
    pub dice: Vec<Die>,
}

impl DiceGroup {

    pub fn pool(rolls: impl IntoIterator<Item = Roll>) -> DiceGroup {
        DiceGroup::new(DiceGroupKind::Pool, rolls)
    }

    pub fn chain(rolls: impl IntoIterator<Item = Roll>) -> DiceGroup {
        DiceGroup::new(DiceGroupKind::Chain, rolls)
    }

    fn new(kind: DiceGroupKind, rolls: impl IntoIterator<Item = Roll>) -> DiceGroup {
        DiceGroup {
            kind,
            dice: rolls.into_iter().map(Die::new).collect(),
        }
    }

    pub fn rolls(&self) -> impl Iterator<Item = Roll> + use<'_> {
        self.dice.iter().map(|die| die.roll)
    }

    pub fn successes(&self) -> usize {
        self.rolls().filter(|roll| roll.is_success()).count()
    }
}

/// All dice of one roll, grouped as they were rolled.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct DiceResult {
    pub groups: Vec<DiceGroup>,
}

impl DiceResult {

    pub fn single_pool(rolls: impl IntoIterator<Item = Roll>) -> DiceResult {
        DiceResult {
            groups: vec![DiceGroup::pool(rolls)],
        }
    }

    pub fn rolls(&self) -> impl Iterator<Item = Roll> + use<'_> {
        self.groups.iter().flat_map(DiceGroup::rolls)
    }

    pub fn successes(&self) -> usize {
        self.groups.iter().map(DiceGroup::successes).sum()
    }

    pub fn dice_count(&self) -> usize {
        self.groups.iter().map(|group| group.dice.len()).sum()
    }
}

/// A resolved roll together with everything needed to push it later.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RolledCheck {
    pub request: RollRequest,
    pub pool: DicePool,
    pub dice: DiceResult,
    pub outcome: RollOutcome,
}

/// Rolls a single pool for the request. Automatic fire is resolved with chained dice regardless of
/// the ruleset; combat overhaul full-auto goes through [auto_fire::resolve_full_auto] instead.
pub fn roll_check(
    request: RollRequest,
    rules: &RulesConfig,
    roller: &mut impl DieRoller,
) -> Result<RolledCheck, InvalidRollError> {
    if request.automatic_fire.is_some() {
        return auto_fire::resolve_automatic_fire(request, rules, roller);
    }

    let pool = DicePool::for_request(&request, rules)?;
    let dice = DiceResult::single_pool(roller.roll_many(pool.dice));
    let outcome = RollOutcome::evaluate(&dice, pool.desperation, false);

    tracing::debug!(
        kind = %request.kind,
        dice = pool.dice,
        successes = outcome.successes,
        tier = ?outcome.tier,
        "rolled check"
    );

    Ok(RolledCheck {
        request,
        pool,
        dice,
        outcome,
    })
}
