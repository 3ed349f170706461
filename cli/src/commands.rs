use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, ValueEnum};
use model::actor::{ActorId, MemoryActorStore};
use model::check::modifier::{ItemModifier, ItemModifiers, ModifierId};
use model::check::push::PushBonus;
use model::damage::{DamageParams, HitDamage, compute_series_damage};
use model::fortune::DarknessPoints;
use model::pool::{ActorKind, AttackAction, AutomaticFire, RollKind, RollRequest, Ruleset};
use model::presentation::{Presentation, Presenter};
use model::resolver::{CombatResolver, Resolution};
use model::roll::DieRoller;
use model::suppression::SuppressionOptions;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Kind {
    General,
    Advanced,
    Attribute,
    Weapon,
    Armor,
}

impl From<Kind> for RollKind {
    fn from(kind: Kind) -> RollKind {
        match kind {
            Kind::General => RollKind::General,
            Kind::Advanced => RollKind::Advanced,
            Kind::Attribute => RollKind::Attribute,
            Kind::Weapon => RollKind::Weapon,
            Kind::Armor => RollKind::Armor,
        }
    }
}

/// Parses `name=value`, e.g. `Scope=+2`, into a checked item modifier.
pub fn parse_item_modifier(arg: &str) -> Result<(ModifierId, ItemModifier), String> {
    let (name, value) = arg.split_once('=')
        .ok_or_else(|| format!("expected <name>=<value>, got '{arg}'"))?;
    let value = value.trim().parse::<i32>()
        .map_err(|err| format!("invalid modifier value '{value}': {err}"))?;
    let name = name.trim();

    Ok((ModifierId::new(name), ItemModifier::checked(name, value)))
}

/// Character values and situational options that size the pool.
#[derive(Args, Debug)]
pub struct PoolArgs {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub attribute: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub skill: i32,

    /// Gear bonus of the weapon or armor
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub bonus: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub modifier: i32,

    /// Checked item modifier as <name>=<value>, may be repeated
    #[arg(long = "item-modifier", value_parser = parse_item_modifier)]
    pub item_modifiers: Vec<(ModifierId, ItemModifier)>,

    /// Fire the weapon automatically
    #[arg(long)]
    pub automatic_fire: bool,

    #[arg(long, requires = "automatic_fire")]
    pub machine_gunner: bool,

    #[arg(long, requires = "automatic_fire")]
    pub high_capacity: bool,

    /// Use the combat overhaul ruleset for automatic fire
    #[arg(long)]
    pub combat_overhaul: bool,

    /// The roll is made by an adversary of the player characters
    #[arg(long)]
    pub adversary: bool,
}

impl PoolArgs {

    pub fn request(&self, kind: RollKind) -> RollRequest {
        let automatic_fire = self.automatic_fire.then_some(AutomaticFire {
            machine_gunner: self.machine_gunner,
            high_capacity: self.high_capacity,
        });

        RollRequest {
            kind,
            attribute: self.attribute,
            skill: self.skill,
            bonus: self.bonus,
            modifier: self.modifier,
            item_modifiers: ItemModifiers::from_modifiers(self.item_modifiers.iter().cloned()),
            automatic_fire,
            ruleset: if self.combat_overhaul { Ruleset::CombatOverhaul } else { Ruleset::Classic },
            actor_kind: if self.adversary { ActorKind::Adversary } else { ActorKind::Player },
        }
    }
}

/// Roll a dice pool and optionally push it
#[derive(Parser, Debug)]
pub struct Roll {
    #[arg(long, value_enum, default_value_t = Kind::General)]
    pub kind: Kind,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Quick shot or strike: two dice less
    #[arg(long)]
    pub quick: bool,

    /// Push the roll once
    #[arg(long)]
    pub push: bool,

    /// Extra push dice granted by a prayer
    #[arg(long, default_value_t = 0, requires = "push")]
    pub prayer: usize,

    /// Extra push dice granted by prayer modifiers
    #[arg(long, default_value_t = 0, requires = "push")]
    pub prayer_modifiers: usize,

    /// Darkness points before the push
    #[arg(long, default_value_t = 0)]
    pub darkness_points: u32,
}

impl Roll {

    pub fn execute<R: DieRoller>(
        self,
        resolver: &mut CombatResolver<R>,
        presenter: &mut impl Presenter,
    ) -> Result<()> {
        let mut request = self.pool.request(self.kind.into());

        if self.quick {
            request.modifier += AttackAction::Quick.modifier();
        }

        let resolution = resolver.resolve(request)?;
        presenter.present(resolution.presentation());

        if !self.push {
            return Ok(());
        }

        let Resolution::Check(mut check) = resolution
        else {
            bail!("full-auto bursts cannot be pushed");
        };

        let bonus = PushBonus {
            prayer: self.prayer,
            prayer_modifiers: self.prayer_modifiers,
        };
        let mut darkness_points = DarknessPoints::new(self.darkness_points);

        resolver.push_roll(&mut check, bonus, &mut darkness_points)?;
        presenter.present(Presentation::Check(&check));

        tracing::info!(darkness_points = darkness_points.points(), "roll pushed");

        Ok(())
    }
}

/// Compute damage after armor and the resulting critical injury
#[derive(Parser, Debug)]
pub struct Damage {
    #[arg(long)]
    pub base: i32,

    #[arg(long, default_value_t = 0)]
    pub extra: i32,

    /// Damage reduction of the target
    #[arg(long, default_value_t = 0)]
    pub reduction: i32,

    /// Armor penetration of the weapon
    #[arg(long, default_value_t = 0)]
    pub penetration: i32,

    #[arg(long, default_value_t = 0)]
    pub crit_threshold: i32,
}

impl Damage {

    pub fn execute<R: DieRoller>(
        self,
        resolver: &CombatResolver<R>,
        presenter: &mut impl Presenter,
    ) -> Result<()> {
        let damage = resolver.compute_damage(DamageParams {
            base_damage: self.base,
            extra_damage: self.extra,
            target_damage_reduction: self.reduction,
            armor_penetration: self.penetration,
            crit_threshold: self.crit_threshold,
        });

        presenter.present(Presentation::Damage(&damage));

        Ok(())
    }
}

/// Roll a suppression check
#[derive(Parser, Debug)]
pub struct Suppress {
    /// Current stress, ignored when an actor is given
    #[arg(long, default_value_t = 0)]
    pub stress: u32,

    #[arg(long)]
    pub stun: bool,

    #[arg(long)]
    pub threatening: bool,

    /// Number of shell shock critical injuries
    #[arg(long, default_value_t = 0)]
    pub shell_shock: u32,

    /// JSON file with the actors; updated in place
    #[arg(long, requires = "actor")]
    pub actors: Option<PathBuf>,

    /// Actor taking the check
    #[arg(long, requires = "actors")]
    pub actor: Option<String>,
}

impl Suppress {

    pub fn execute<R: DieRoller>(
        self,
        resolver: &mut CombatResolver<R>,
        presenter: &mut impl Presenter,
    ) -> Result<()> {
        let options = SuppressionOptions {
            stun: self.stun,
            threatening: self.threatening,
            shell_shock: self.shell_shock,
        };

        let check = match (&self.actors, &self.actor) {
            (Some(path), Some(actor)) => {
                let mut store = load_actors(path)?;
                let check = resolver.suppression_check(&mut store, &ActorId::new(actor), options)?;
                save_actors(path, &store)?;
                check
            },
            _ => resolver.resolve_suppression(self.stress, options),
        };

        presenter.present(Presentation::Suppression(&check));

        Ok(())
    }
}

/// Attack an actor, applying damage on a hit
#[derive(Parser, Debug)]
pub struct Attack {
    /// JSON file with the actors; updated in place
    #[arg(long)]
    pub actors: PathBuf,

    #[arg(long)]
    pub attacker: String,

    #[arg(long)]
    pub target: String,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Quick shot or strike: two dice less, uses the fast action
    #[arg(long)]
    pub quick: bool,

    #[arg(long)]
    pub base_damage: i32,

    #[arg(long, default_value_t = 0)]
    pub armor_penetration: i32,

    #[arg(long, default_value_t = 0)]
    pub crit_threshold: i32,
}

impl Attack {

    pub fn execute<R: DieRoller>(
        self,
        resolver: &mut CombatResolver<R>,
        presenter: &mut impl Presenter,
    ) -> Result<()> {
        let mut store = load_actors(&self.actors)?;
        let attacker = ActorId::new(&self.attacker);
        let target = ActorId::new(&self.target);
        let action = if self.quick { AttackAction::Quick } else { AttackAction::Normal };
        let request = self.pool.request(RollKind::Weapon);

        let resolution = resolver.attack(&mut store, &attacker, request, action)?;
        presenter.present(resolution.presentation());

        let reduction = resolver.actor_damage_reduction(&store, &target)?;
        presenter.present(Presentation::DamageReduction(&reduction));

        let shared = DamageParams {
            base_damage: self.base_damage,
            armor_penetration: self.armor_penetration,
            crit_threshold: self.crit_threshold,
            ..DamageParams::default()
        };

        match &resolution {
            Resolution::Check(check) if !check.outcome.is_failure() => {
                let damage = resolver.compute_damage(DamageParams {
                    extra_damage: *check.outcome.extra_damage_options().end() as i32,
                    target_damage_reduction: reduction.total,
                    ..shared
                });

                presenter.present(Presentation::Damage(&damage));
                resolver.apply_damage(&mut store, &target, damage.final_damage)?;
            },
            Resolution::FullAuto(series) if !series.is_failure() => {
                let hits = series.hits()
                    .map(|attack| HitDamage {
                        extra_damage: *attack.outcome.extra_damage_options().end() as i32,
                        target_damage_reduction: reduction.total,
                    })
                    .collect::<Vec<_>>();
                let damages = compute_series_damage(shared, &hits);
                let targeted = damages.iter()
                    .map(|damage| (target.clone(), *damage))
                    .collect::<Vec<_>>();

                presenter.present(Presentation::SeriesDamage(&damages));
                resolver.apply_series_damage(&mut store, &targeted)?;
            },
            _ => tracing::info!(%attacker, %target, "attack missed"),
        }

        save_actors(&self.actors, &store)
    }
}

/// Start a new combat round, restoring actions and lifting suppression
#[derive(Parser, Debug)]
pub struct NewRound {
    /// JSON file with the actors; updated in place
    #[arg(long)]
    pub actors: PathBuf,

    /// Actors entering the round, all actors in the file if none are given
    pub actor: Vec<String>,
}

impl NewRound {

    pub fn execute<R: DieRoller>(self, resolver: &CombatResolver<R>) -> Result<()> {
        let mut store = load_actors(&self.actors)?;
        let actors = round_actors(&store, &self.actor);

        resolver.start_round(&mut store, &actors)?;

        save_actors(&self.actors, &store)
    }
}

fn round_actors(store: &MemoryActorStore, names: &[String]) -> Vec<ActorId> {
    if names.is_empty() {
        store.actor_ids().cloned().collect()
    }
    else {
        names.iter().map(ActorId::new).collect()
    }
}

fn load_actors(path: &Path) -> Result<MemoryActorStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read actors from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse actors in {}", path.display()))
}

fn save_actors(path: &Path, store: &MemoryActorStore) -> Result<()> {
    let content = serde_json::to_string_pretty(store)?;

    fs::write(path, content)
        .with_context(|| format!("failed to write actors to {}", path.display()))
}
