//! Damage after armor and the critical injury it may cause.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DamageParams {
    pub base_damage: i32,
    pub extra_damage: i32,
    pub target_damage_reduction: i32,
    pub armor_penetration: i32,

    /// Damage at which a critical injury is triggered. Zero or less disables criticals.
    pub crit_threshold: i32,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CritSeverity {
    None,
    Normal,
    Double,
    Multiple(u32),
}

impl CritSeverity {

    pub fn from_severity(severity: u32) -> CritSeverity {
        match severity {
            0 => CritSeverity::None,
            1 => CritSeverity::Normal,
            2 => CritSeverity::Double,
            count => CritSeverity::Multiple(count),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DamageComputation {
    pub params: DamageParams,
    pub effective_damage_reduction: i32,
    pub final_damage: i32,
    pub critical_triggered: bool,
    pub critical_severity: u32,
}

impl DamageComputation {

    pub fn severity_label(&self) -> CritSeverity {
        CritSeverity::from_severity(self.critical_severity)
    }
}

pub fn compute_damage(params: DamageParams) -> DamageComputation {
    let effective_damage_reduction =
        (params.target_damage_reduction - params.armor_penetration).max(0);
    let final_damage =
        (params.base_damage + params.extra_damage - effective_damage_reduction).max(0);
    let critical_triggered = params.crit_threshold > 0 && final_damage >= params.crit_threshold;
    let critical_severity = if critical_triggered {
        (final_damage / params.crit_threshold) as u32
    }
    else {
        0
    };

    tracing::debug!(
        effective_damage_reduction,
        final_damage,
        critical_severity,
        "computed damage"
    );

    DamageComputation {
        params,
        effective_damage_reduction,
        final_damage,
        critical_triggered,
        critical_severity,
    }
}

/// Per-hit inputs of a full-auto burst. Base damage, armor penetration and crit threshold are
/// shared by all hits.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct HitDamage {
    pub extra_damage: i32,
    pub target_damage_reduction: i32,
}

/// Damage of every hit of a burst, in the order of the hits.
pub fn compute_series_damage(shared: DamageParams, hits: &[HitDamage]) -> Vec<DamageComputation> {
    hits.iter()
        .map(|hit| compute_damage(DamageParams {
            extra_damage: hit.extra_damage,
            target_damage_reduction: hit.target_damage_reduction,
            ..shared
        }))
        .collect()
}

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ArmorItem {
    pub name: String,
    pub damage_reduction: Option<i32>,

    /// Older items only carry an armor rating, which then counts as damage reduction.
    pub armor_rating: Option<i32>,
    pub equipped: bool,
}

impl ArmorItem {

    pub fn protection(&self) -> i32 {
        self.damage_reduction.or(self.armor_rating).unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cover {
    #[default]
    None,
    Light,
    Heavy,
}

impl Cover {

    /// Levels below zero count as no cover, levels above two as heavy cover.
    pub fn from_level(level: i32) -> Cover {
        match level {
            i32::MIN..=0 => Cover::None,
            1 => Cover::Light,
            _ => Cover::Heavy,
        }
    }

    pub fn bonus(self) -> i32 {
        match self {
            Cover::None => 0,
            Cover::Light => 1,
            Cover::Heavy => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DamageReductionBreakdown {
    pub armor: i32,
    pub cover: Cover,
    pub cover_bonus: i32,
    pub total: i32,
}

/// Damage reduction of an actor: all equipped armor plus the cover bonus.
pub fn damage_reduction(armor: &[ArmorItem], cover: Cover) -> DamageReductionBreakdown {
    let armor = armor.iter()
        .filter(|item| item.equipped)
        .map(ArmorItem::protection)
        .sum::<i32>();
    let cover_bonus = cover.bonus();

    DamageReductionBreakdown {
        armor,
        cover,
        cover_bonus,
        total: armor + cover_bonus,
    }
}
