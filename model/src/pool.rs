//! Sizing of dice pools from character values and situational modifiers.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::check::modifier::ItemModifiers;
use crate::config::RulesConfig;
use crate::error::{InvalidRollError, InvalidRollReason};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    #[default]
    General,
    Advanced,
    Attribute,
    Weapon,
    Armor,
}

impl Display for RollKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            RollKind::General => "general",
            RollKind::Advanced => "advanced",
            RollKind::Attribute => "attribute",
            RollKind::Weapon => "weapon",
            RollKind::Armor => "armor",
        };

        f.write_str(name)
    }
}

/// Which rulebook governs automatic fire.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
    /// Chained dice appended to a single pool.
    #[default]
    Classic,

    /// Several separately rolled attacks.
    CombatOverhaul,
}

/// Decides the direction of the fortune counter when the roll is pushed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    #[default]
    Player,
    Adversary,
}

/// Automatic fire options. Each of the two abilities lets the classic chain ignore one terminating
/// die; under the combat overhaul they instead add an attack or remove the per-attack penalty.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AutomaticFire {
    pub machine_gunner: bool,
    pub high_capacity: bool,
}

impl AutomaticFire {

    pub fn ignored_ones(self) -> usize {
        self.machine_gunner as usize + self.high_capacity as usize
    }
}

/// Quick shots and strikes trade two dice for using the fast instead of the slow action.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackAction {
    #[default]
    Normal,
    Quick,
}

impl AttackAction {

    pub const QUICK_PENALTY: i32 = 2;

    pub fn modifier(self) -> i32 {
        match self {
            AttackAction::Normal => 0,
            AttackAction::Quick => -AttackAction::QUICK_PENALTY,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RollRequest {
    pub kind: RollKind,
    pub attribute: i32,
    pub skill: i32,
    pub bonus: i32,
    pub modifier: i32,
    pub item_modifiers: ItemModifiers,
    pub automatic_fire: Option<AutomaticFire>,
    pub ruleset: Ruleset,
    pub actor_kind: ActorKind,
}

impl RollRequest {

    pub fn item_modifier_bonus(&self) -> i32 {
        self.item_modifiers.bonus()
    }

    pub fn is_full_auto(&self) -> bool {
        self.automatic_fire.is_some() && self.ruleset == Ruleset::CombatOverhaul
    }

    /// Checks the precondition of the roll kind. Situational modifiers are not considered, so a
    /// trained character can still end up with a desperation roll.
    pub fn validate(&self) -> Result<(), InvalidRollError> {
        let has_dice = match self.kind {
            RollKind::General => self.attribute + self.skill > 0,
            RollKind::Advanced => {
                if self.skill <= 0 {
                    return Err(self.invalid(InvalidRollReason::UntrainedAdvancedSkill));
                }

                self.attribute + self.skill > 0
            },
            RollKind::Attribute => self.attribute > 0,
            RollKind::Weapon => self.attribute + self.skill + self.bonus > 0,
            RollKind::Armor => self.bonus >= 0,
        };

        if has_dice {
            Ok(())
        }
        else {
            Err(self.invalid(InvalidRollReason::NoDice))
        }
    }

    fn invalid(&self, reason: InvalidRollReason) -> InvalidRollError {
        InvalidRollError {
            kind: self.kind,
            reason,
        }
    }

    /// The signed pool before the desperation floor. Classic automatic fire already has its
    /// penalty applied here.
    pub fn total_dice(&self, rules: &RulesConfig) -> i32 {
        match self.kind {
            RollKind::General | RollKind::Advanced => self.skill_dice(),
            RollKind::Attribute => self.attribute_dice(),
            RollKind::Weapon => self.weapon_dice(rules),
            RollKind::Armor => self.armor_dice(),
        }
    }

    fn situational(&self) -> i32 {
        self.modifier + self.item_modifier_bonus()
    }

    fn skill_dice(&self) -> i32 {
        self.attribute + self.skill + self.situational()
    }

    fn attribute_dice(&self) -> i32 {
        self.attribute + self.situational()
    }

    /// Weapon pool without any automatic fire adjustment.
    pub fn base_weapon_dice(&self) -> i32 {
        self.attribute + self.skill + self.bonus + self.situational()
    }

    fn weapon_dice(&self, rules: &RulesConfig) -> i32 {
        if self.automatic_fire.is_some() {
            self.base_weapon_dice() - rules.automatic_fire_penalty
        }
        else {
            self.base_weapon_dice()
        }
    }

    fn armor_dice(&self) -> i32 {
        self.bonus + self.situational()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DicePool {
    pub dice: usize,

    /// Set when the computed pool was empty and the roll fell back to desperation dice.
    pub desperation: bool,
}

impl DicePool {

    pub fn from_total(total: i32, rules: &RulesConfig) -> DicePool {
        if total <= 0 {
            tracing::debug!(total, "empty pool, falling back to desperation roll");

            DicePool {
                dice: rules.desperation_dice,
                desperation: true,
            }
        }
        else {
            DicePool {
                dice: total as usize,
                desperation: false,
            }
        }
    }

    /// Validates the request and sizes its pool.
    pub fn for_request(request: &RollRequest, rules: &RulesConfig) -> Result<DicePool, InvalidRollError> {
        request.validate()?;

        Ok(DicePool::from_total(request.total_dice(rules), rules))
    }
}
