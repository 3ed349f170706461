//! Suppression checks of actors that are being fired upon.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::roll::{DieRoller, Roll};

/// Modifier added by each active suppression source.
pub const SOURCE_MODIFIER: i32 = 2;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SuppressionOptions {
    pub stun: bool,
    pub threatening: bool,

    /// Number of shell shock critical injuries the actor suffers from.
    pub shell_shock: u32,
}

impl SuppressionOptions {

    pub fn sources(self) -> Vec<ModifierSource> {
        let mut sources = Vec::new();

        if self.stun {
            sources.push(ModifierSource::Stun);
        }

        if self.threatening {
            sources.push(ModifierSource::Threatening);
        }

        if self.shell_shock > 0 {
            sources.push(ModifierSource::ShellShock(self.shell_shock));
        }

        sources
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierSource {
    Stun,
    Threatening,
    ShellShock(u32),
}

impl ModifierSource {

    pub fn modifier(self) -> i32 {
        match self {
            ModifierSource::Stun | ModifierSource::Threatening => SOURCE_MODIFIER,
            ModifierSource::ShellShock(count) =>
                SOURCE_MODIFIER.saturating_mul(i32::try_from(count).unwrap_or(i32::MAX)),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionTier {
    Unaffected,
    Shaken,
    Suppressed,
    PinnedDown,
}

impl SuppressionTier {

    pub fn from_total(total: i32) -> SuppressionTier {
        match total {
            i32::MIN..=2 => SuppressionTier::Unaffected,
            3..=5 => SuppressionTier::Shaken,
            6..=8 => SuppressionTier::Suppressed,
            _ => SuppressionTier::PinnedDown,
        }
    }

    pub fn stress_gain(self) -> u32 {
        match self {
            SuppressionTier::Unaffected => 0,
            _ => 1,
        }
    }

    pub fn loses_fast_action(self) -> bool {
        self == SuppressionTier::Suppressed
    }

    pub fn loses_slow_action(self) -> bool {
        self == SuppressionTier::PinnedDown
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct SuppressionCheck {
    pub die: Roll,
    pub current_stress: u32,
    pub modifier_sources: Vec<ModifierSource>,
    pub modifier_total: i32,
    pub total: i32,
    pub tier: SuppressionTier,
    pub stress_gain: u32,
    pub lose_fast_action: bool,
    pub lose_slow_action: bool,

    /// Stress after the check, capped at the maximum stress.
    pub new_stress: u32,
}

pub fn evaluate_suppression(
    die: Roll,
    current_stress: u32,
    options: SuppressionOptions,
    max_stress: u32,
) -> SuppressionCheck {
    let modifier_sources = options.sources();
    let modifier_total = modifier_sources.iter()
        .fold(0i32, |total, source| total.saturating_add(source.modifier()));
    let total = i32::try_from(current_stress).unwrap_or(i32::MAX)
        .saturating_add(die.as_u8() as i32)
        .saturating_add(modifier_total);
    let tier = SuppressionTier::from_total(total);
    let stress_gain = tier.stress_gain();

    SuppressionCheck {
        die,
        current_stress,
        modifier_sources,
        modifier_total,
        total,
        tier,
        stress_gain,
        lose_fast_action: tier.loses_fast_action(),
        lose_slow_action: tier.loses_slow_action(),
        new_stress: current_stress.saturating_add(stress_gain).min(max_stress),
    }
}

pub fn resolve_suppression(
    current_stress: u32,
    options: SuppressionOptions,
    rules: &RulesConfig,
    roller: &mut impl DieRoller,
) -> SuppressionCheck {
    let check = evaluate_suppression(roller.roll(), current_stress, options, rules.max_stress);

    tracing::debug!(total = check.total, tier = ?check.tier, "resolved suppression check");

    check
}
