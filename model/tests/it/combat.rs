use kernal::prelude::*;
use model::actor::{ActorField, ActorId, ActorRecord, ActorStore, FieldValue};
use model::damage::{ArmorItem, CritSeverity, DamageParams, HitDamage, compute_series_damage};
use model::pool::{AttackAction, AutomaticFire, RollKind, RollRequest, Ruleset};
use model::resolver::Resolution;
use model::suppression::{SuppressionOptions, SuppressionTier};

use crate::*;

fn vest() -> ArmorItem {
    ArmorItem {
        name: "Vest".to_owned(),
        damage_reduction: None,
        armor_rating: Some(2),
        equipped: true,
    }
}

#[test]
fn damage_scenario_with_single_critical() {
    let resolver = resolver(Vec::<u8>::new());

    let damage = resolver.compute_damage(DamageParams {
        base_damage: 5,
        extra_damage: 2,
        target_damage_reduction: 4,
        armor_penetration: 1,
        crit_threshold: 3,
    });

    assert_that!(damage.effective_damage_reduction).is_equal_to(3);
    assert_that!(damage.final_damage).is_equal_to(4);
    assert_that!(damage.critical_triggered).is_true();
    assert_that!(damage.severity_label()).is_equal_to(CritSeverity::Normal);
}

#[test]
fn quick_attack_then_damage_against_armored_target_in_cover() {
    let mut store = store_with([
        ("shooter", ActorRecord::new(10)),
        (
            "target",
            ActorRecord::new(8)
                .with_field(ActorField::Cover, FieldValue::Int(2))
                .with_armor(vest()),
        ),
    ]);
    let shooter = ActorId::new("shooter");
    let target = ActorId::new("target");
    let mut resolver = resolver([6, 6, 1]);

    let resolution = resolver
        .attack(&mut store, &shooter, request(RollKind::Weapon, 3, 1, 1), AttackAction::Quick)
        .unwrap();

    let Resolution::Check(check) = resolution
    else {
        panic!("expected single check");
    };

    let extra_damage = *check.outcome.extra_damage_options().end();
    let reduction = resolver.actor_damage_reduction(&store, &target).unwrap();
    let damage = resolver.compute_damage(DamageParams {
        base_damage: 4,
        extra_damage: extra_damage.try_into().unwrap(),
        target_damage_reduction: reduction.total,
        armor_penetration: 1,
        crit_threshold: 3,
    });
    let remaining = resolver.apply_damage(&mut store, &target, damage.final_damage).unwrap();

    assert_that!(check.pool.dice).is_equal_to(3);
    assert_that!(extra_damage).is_equal_to(1);
    assert_that!(reduction.total).is_equal_to(4);
    assert_that!(damage.final_damage).is_equal_to(2);
    assert_that!(remaining).is_equal_to(6);
    assert_that!(store.flag_field(&shooter, ActorField::FastActionUsed)).contains_value(true);
    assert_that!(store.flag_field(&shooter, ActorField::SlowActionUsed)).contains_value(false);
}

#[test]
fn full_auto_hits_are_applied_in_attack_order() {
    let mut store = store_with([("shooter", ActorRecord::new(10)), ("target", ActorRecord::new(6))]);
    let shooter = ActorId::new("shooter");
    let target = ActorId::new("target");
    let request = RollRequest {
        automatic_fire: Some(AutomaticFire::default()),
        ruleset: Ruleset::CombatOverhaul,
        ..request(RollKind::Weapon, 2, 2, 0)
    };
    let mut resolver = resolver([6, 6, 1, 1, 6, 2]);

    let resolution = resolver.attack(&mut store, &shooter, request, AttackAction::Normal).unwrap();

    let Resolution::FullAuto(series) = resolution
    else {
        panic!("expected full-auto series");
    };

    let hits = series.hits()
        .map(|attack| HitDamage {
            extra_damage: attack.outcome.successes as i32 - 1,
            target_damage_reduction: 1,
        })
        .collect::<Vec<_>>();
    let shared = DamageParams {
        base_damage: 3,
        crit_threshold: 4,
        ..DamageParams::default()
    };
    let damages = compute_series_damage(shared, &hits);
    let targeted = damages.iter().map(|damage| (target.clone(), *damage)).collect::<Vec<_>>();
    let remaining = resolver.apply_series_damage(&mut store, &targeted).unwrap();

    assert_that!(series.total_hits).is_equal_to(2);
    assert_that!(damages.iter().map(|damage| damage.final_damage).collect::<Vec<_>>())
        .contains_exactly_in_given_order([3, 2]);
    assert_that!(remaining).contains_exactly_in_given_order([3, 1]);
    assert_that!(store.int_field(&target, ActorField::HitPoints)).contains_value(1);
}

#[test]
fn repeated_suppression_escalates_and_saturates_stress() {
    let mut store = store_with([("target", ActorRecord::new(8))]);
    let target = ActorId::new("target");
    let options = SuppressionOptions {
        threatening: true,
        ..SuppressionOptions::default()
    };
    let mut resolver = resolver([1, 4, 6, 6, 6, 6, 6, 6, 6, 6, 6]);

    let tiers = (0..11)
        .map(|_| resolver.suppression_check(&mut store, &target, options).unwrap().tier)
        .collect::<Vec<_>>();

    assert_that!(tiers[0]).is_equal_to(SuppressionTier::Shaken);
    assert_that!(tiers[1]).is_equal_to(SuppressionTier::Suppressed);
    assert_that!(tiers[2]).is_equal_to(SuppressionTier::PinnedDown);
    assert_that!(store.int_field(&target, ActorField::Stress)).contains_value(10);
    assert_that!(store.flag_field(&target, ActorField::Suppressed)).contains_value(true);
    assert_that!(store.flag_field(&target, ActorField::PinnedDown)).contains_value(true);
}

#[test]
fn new_round_lets_pinned_down_shooter_act_again() {
    let mut store = store_with([
        ("shooter", ActorRecord::new(8)),
        ("bystander", ActorRecord::new(5)),
    ]);
    let shooter = ActorId::new("shooter");
    let bystander = ActorId::new("bystander");
    store.set_field(&shooter, ActorField::Stress, FieldValue::Int(4)).unwrap();
    let mut resolver = resolver([6; 6]);

    resolver.attack(&mut store, &shooter, request(RollKind::Weapon, 2, 1, 0), AttackAction::Normal)
        .unwrap();
    let check = resolver.suppression_check(&mut store, &shooter, SuppressionOptions::default())
        .unwrap();
    assert_that!(check.tier).is_equal_to(SuppressionTier::PinnedDown);

    resolver.start_round(&mut store, &[shooter.clone(), bystander]).unwrap();
    resolver.attack(&mut store, &shooter, request(RollKind::Weapon, 2, 0, 0), AttackAction::Normal)
        .unwrap();

    assert_that!(store.flag_field(&shooter, ActorField::SlowActionUsed)).contains_value(true);
    assert_that!(store.flag_field(&shooter, ActorField::FastActionUsed)).contains_value(false);
    assert_that!(store.flag_field(&shooter, ActorField::PinnedDown)).contains_value(false);
    assert_that!(store.int_field(&shooter, ActorField::Stress)).contains_value(5);
}
