//! The [CombatResolver] ties the resolution steps to a die roller and a set of rules, and applies
//! their effects to actors held by the host.

use serde::Serialize;

use crate::actor::{ActorField, ActorId, ActorStore, FieldValue};
use crate::auto_fire::{self, AttackSeries};
use crate::check::outcome::RollOutcome;
use crate::check::push::PushBonus;
use crate::check::{self, RolledCheck};
use crate::config::RulesConfig;
use crate::damage::{self, Cover, DamageComputation, DamageParams, DamageReductionBreakdown};
use crate::error::{AlreadyPushedError, InvalidRollError, ResolveError, StoreError};
use crate::fortune::FortuneCounter;
use crate::pool::{AttackAction, RollRequest};
use crate::presentation::Presentation;
use crate::roll::DieRoller;
use crate::suppression::{self, SuppressionCheck, SuppressionOptions};

/// A roll resolves to a single check, or to a series of attacks for combat overhaul full-auto.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Check(RolledCheck),
    FullAuto(AttackSeries),
}

impl Resolution {

    pub fn is_failure(&self) -> bool {
        match self {
            Resolution::Check(check) => check.outcome.is_failure(),
            Resolution::FullAuto(series) => series.is_failure(),
        }
    }

    pub fn presentation(&self) -> Presentation<'_> {
        match self {
            Resolution::Check(check) => Presentation::Check(check),
            Resolution::FullAuto(series) => Presentation::FullAuto(series),
        }
    }
}

pub struct CombatResolver<R> {
    rules: RulesConfig,
    roller: R,
}

impl<R: DieRoller> CombatResolver<R> {

    pub fn new(rules: RulesConfig, roller: R) -> CombatResolver<R> {
        CombatResolver { rules, roller }
    }

    pub fn into_roller(self) -> R {
        self.roller
    }

    pub fn resolve(&mut self, request: RollRequest) -> Result<Resolution, InvalidRollError> {
        if request.is_full_auto() {
            self.resolve_full_auto(request).map(Resolution::FullAuto)
        }
        else {
            self.evaluate_roll(request).map(Resolution::Check)
        }
    }

    /// Rolls the request as a single check. Automatic fire is resolved with the classic chains.
    pub fn evaluate_roll(&mut self, request: RollRequest) -> Result<RolledCheck, InvalidRollError> {
        check::roll_check(request, &self.rules, &mut self.roller)
    }

    /// Pushes the check and applies the resulting fortune event to the counter.
    pub fn push_roll(
        &mut self,
        check: &mut RolledCheck,
        bonus: PushBonus,
        fortune: &mut impl FortuneCounter,
    ) -> Result<RollOutcome, AlreadyPushedError> {
        let result = check.push(bonus, &mut self.roller)?;
        fortune.apply(result.fortune);

        Ok(result.outcome)
    }

    pub fn resolve_automatic_fire(&mut self, request: RollRequest)
            -> Result<RolledCheck, InvalidRollError> {
        auto_fire::resolve_automatic_fire(request, &self.rules, &mut self.roller)
    }

    pub fn resolve_full_auto(&mut self, request: RollRequest)
            -> Result<AttackSeries, InvalidRollError> {
        auto_fire::resolve_full_auto(request, &self.rules, &mut self.roller)
    }

    pub fn compute_damage(&self, params: DamageParams) -> DamageComputation {
        damage::compute_damage(params)
    }

    pub fn resolve_suppression(&mut self, current_stress: u32, options: SuppressionOptions)
            -> SuppressionCheck {
        suppression::resolve_suppression(current_stress, options, &self.rules, &mut self.roller)
    }

    /// Resolves an attack of the actor and marks the action it used. Quick attacks cost two dice
    /// and use the fast action, normal attacks use the slow action. Invalid rolls use no action.
    pub fn attack(
        &mut self,
        store: &mut impl ActorStore,
        actor: &ActorId,
        mut request: RollRequest,
        action: AttackAction,
    ) -> Result<Resolution, ResolveError> {
        let action_field = match action {
            AttackAction::Normal => ActorField::SlowActionUsed,
            AttackAction::Quick => ActorField::FastActionUsed,
        };

        if store.flag_field(actor, action_field)? {
            tracing::debug!(%actor, ?action, "attacking with an action that was already used");
        }

        request.modifier += action.modifier();

        let resolution = self.resolve(request)?;
        store.set_field(actor, action_field, FieldValue::Flag(true))?;

        Ok(resolution)
    }

    pub fn actor_damage_reduction(&self, store: &impl ActorStore, actor: &ActorId)
            -> Result<DamageReductionBreakdown, StoreError> {
        let armor = store.armor(actor)?;
        let cover = Cover::from_level(store.int_field(actor, ActorField::Cover)?);

        Ok(damage::damage_reduction(&armor, cover))
    }

    /// Subtracts the damage from the actor's hit points, which do not drop below zero. Returns the
    /// remaining hit points.
    pub fn apply_damage(&self, store: &mut impl ActorStore, actor: &ActorId, damage: i32)
            -> Result<i32, StoreError> {
        let hit_points = store.int_field(actor, ActorField::HitPoints)?;

        if damage <= 0 {
            return Ok(hit_points);
        }

        let remaining = (hit_points - damage).max(0);
        store.set_field(actor, ActorField::HitPoints, FieldValue::Int(remaining))?;

        tracing::info!(%actor, damage, remaining, "applied damage");

        Ok(remaining)
    }

    /// Applies the damage of every hit of a burst to its target, in order. Nothing is applied if
    /// any target lacks hit points.
    pub fn apply_series_damage(
        &self,
        store: &mut impl ActorStore,
        hits: &[(ActorId, DamageComputation)],
    ) -> Result<Vec<i32>, StoreError> {
        for (target, _) in hits {
            store.int_field(target, ActorField::HitPoints)?;
        }

        hits.iter()
            .map(|(target, damage)| self.apply_damage(store, target, damage.final_damage))
            .collect()
    }

    /// Rolls a suppression check for the actor and persists stress and lost actions.
    pub fn suppression_check(
        &mut self,
        store: &mut impl ActorStore,
        actor: &ActorId,
        options: SuppressionOptions,
    ) -> Result<SuppressionCheck, StoreError> {
        let stress = store.int_field(actor, ActorField::Stress)?.max(0) as u32;
        let check = self.resolve_suppression(stress, options);

        if check.stress_gain > 0 {
            let new_stress = i32::try_from(check.new_stress).unwrap_or(i32::MAX);
            store.set_field(actor, ActorField::Stress, FieldValue::Int(new_stress))?;
        }

        if check.lose_fast_action {
            store.set_field(actor, ActorField::Suppressed, FieldValue::Flag(true))?;
        }

        if check.lose_slow_action {
            store.set_field(actor, ActorField::PinnedDown, FieldValue::Flag(true))?;
        }

        tracing::info!(%actor, tier = ?check.tier, stress = check.new_stress, "suppression check");

        Ok(check)
    }

    /// Starts a new combat round for the actors: both actions become available again and
    /// suppression wears off. Nothing is changed if any actor lacks one of the flags.
    pub fn start_round(&self, store: &mut impl ActorStore, actors: &[ActorId])
            -> Result<(), StoreError> {
        for actor in actors {
            for field in ActorField::ROUND_FLAGS {
                store.flag_field(actor, field)?;
            }
        }

        for actor in actors {
            for field in ActorField::ROUND_FLAGS {
                store.set_field(actor, field, FieldValue::Flag(false))?;
            }
        }

        tracing::info!(actors = actors.len(), "started combat round");

        Ok(())
    }
}
