//! Automatic fire under both rulesets.
//!
//! The classic rules shoot until the first miss: the base pool loses two dice and one chain die is
//! appended per ignored one (plus the first), each chain rolling again for as long as it shows a
//! success. The combat overhaul instead fires a burst of separately rolled attacks.

use rayon::prelude::*;
use serde::Serialize;

use crate::check::outcome::RollOutcome;
use crate::check::{DiceGroup, DiceResult, RolledCheck};
use crate::config::RulesConfig;
use crate::error::InvalidRollError;
use crate::pool::{AutomaticFire, DicePool, RollRequest};
use crate::roll::{DieRoller, Roll};

/// Rolls one chain: dice are rolled one at a time until the first die that is not a success. The
/// terminating die is part of the chain. Chains are cut off after `cap` dice.
pub fn roll_chain(cap: usize, roller: &mut impl DieRoller) -> Vec<Roll> {
    let cap = cap.max(1);
    let mut chain = Vec::new();

    while chain.len() < cap {
        let roll = roller.roll();
        chain.push(roll);

        if !roll.is_success() {
            return chain;
        }
    }

    tracing::warn!(cap, "automatic fire chain cut off at iteration cap");
    chain
}

/// The dice of a classic automatic fire roll: one pool of `pool_dice` dice and `ignored_ones + 1`
/// chains.
pub fn automatic_fire_dice(
    pool_dice: usize,
    ignored_ones: usize,
    chain_cap: usize,
    roller: &mut impl DieRoller,
) -> DiceResult {
    let mut groups = vec![DiceGroup::pool(roller.roll_many(pool_dice))];

    for _ in 0..=ignored_ones {
        groups.push(DiceGroup::chain(roll_chain(chain_cap, roller)));
    }

    DiceResult { groups }
}

/// Classic automatic fire. A request without automatic fire options is treated as automatic fire
/// without abilities.
pub fn resolve_automatic_fire(
    mut request: RollRequest,
    rules: &RulesConfig,
    roller: &mut impl DieRoller,
) -> Result<RolledCheck, InvalidRollError> {
    let automatic_fire = *request.automatic_fire.get_or_insert_with(AutomaticFire::default);
    let pool = DicePool::for_request(&request, rules)?;
    let dice = automatic_fire_dice(
        pool.dice,
        automatic_fire.ignored_ones(),
        rules.chain_iteration_cap,
        roller,
    );
    let outcome = RollOutcome::evaluate(&dice, pool.desperation, false);

    tracing::debug!(
        pool_dice = pool.dice,
        chains = automatic_fire.ignored_ones() + 1,
        total_dice = dice.dice_count(),
        successes = outcome.successes,
        "rolled automatic fire"
    );

    Ok(RolledCheck {
        request,
        pool,
        dice,
        outcome,
    })
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Attack {
    /// Position in the burst, starting at 1.
    pub number: usize,
    pub dice: DiceResult,
    pub outcome: RollOutcome,
}

/// Result of a combat overhaul full-auto burst. Attacks are ordered by number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AttackSeries {
    pub request: RollRequest,
    pub attacks: Vec<Attack>,
    pub dice_per_attack: usize,
    pub per_attack_modifier: i32,
    pub desperation: bool,
    pub total_successes: usize,
    pub total_hits: usize,
}

impl AttackSeries {

    pub fn num_attacks(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_failure(&self) -> bool {
        self.total_hits == 0
    }

    pub fn hits(&self) -> impl Iterator<Item = &Attack> + use<'_> {
        self.attacks.iter().filter(|attack| !attack.outcome.is_failure())
    }
}

/// Combat overhaul full-auto: three attacks (four with high capacity), each at -2 dice unless the
/// shooter is a machine gunner. The classic automatic fire penalty does not apply.
pub fn resolve_full_auto(
    request: RollRequest,
    rules: &RulesConfig,
    roller: &mut impl DieRoller,
) -> Result<AttackSeries, InvalidRollError> {
    request.validate()?;

    let automatic_fire = request.automatic_fire.unwrap_or_default();
    let num_attacks = if automatic_fire.high_capacity {
        rules.full_auto.high_capacity_attacks
    }
    else {
        rules.full_auto.attacks
    };
    let per_attack_modifier = if automatic_fire.machine_gunner {
        0
    }
    else {
        rules.full_auto.per_attack_penalty
    };
    let pool = DicePool::from_total(request.base_weapon_dice() + per_attack_modifier, rules);

    // Dice are drawn in attack order so that seeded rolls are reproducible.
    let rolled = (0..num_attacks)
        .map(|_| roller.roll_many(pool.dice))
        .collect::<Vec<_>>();
    let attacks = rolled
        .into_par_iter()
        .enumerate()
        .map(|(index, rolls)| {
            let dice = DiceResult::single_pool(rolls);
            let outcome = RollOutcome::evaluate(&dice, pool.desperation, false);

            Attack {
                number: index + 1,
                dice,
                outcome,
            }
        })
        .collect::<Vec<_>>();

    let total_successes = attacks.iter().map(|attack| attack.outcome.successes).sum();
    let total_hits = attacks.iter().filter(|attack| !attack.outcome.is_failure()).count();

    tracing::debug!(
        num_attacks,
        dice_per_attack = pool.dice,
        total_successes,
        total_hits,
        "resolved full-auto burst"
    );

    Ok(AttackSeries {
        request,
        attacks,
        dice_per_attack: pool.dice,
        per_attack_modifier,
        desperation: pool.desperation,
        total_successes,
        total_hits,
    })
}
