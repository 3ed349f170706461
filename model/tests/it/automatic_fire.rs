use kernal::prelude::*;
use model::check::DiceGroupKind;
use model::check::outcome::SuccessTier;
use model::config::RulesConfig;
use model::pool::{AutomaticFire, RollKind, RollRequest, Ruleset};
use model::resolver::{CombatResolver, Resolution};
use model::roll::RandomDieRoller;
use model::test_util::group_faces;
use rstest::rstest;

use crate::*;

fn automatic(machine_gunner: bool, high_capacity: bool, ruleset: Ruleset) -> RollRequest {
    RollRequest {
        automatic_fire: Some(AutomaticFire {
            machine_gunner,
            high_capacity,
        }),
        ruleset,
        ..request(RollKind::Weapon, 4, 2, 0)
    }
}

#[test]
fn classic_automatic_fire_chains_until_a_miss() {
    // 4 pool dice, then two chains of [6, 6, 2] and [3]
    let mut resolver = resolver([1, 6, 2, 2, 6, 6, 2, 3]);

    let check = resolver.resolve_automatic_fire(automatic(true, false, Ruleset::Classic)).unwrap();

    let kinds = check.dice.groups.iter().map(|group| group.kind).collect::<Vec<_>>();

    assert_that!(kinds).contains_exactly_in_given_order([
        DiceGroupKind::Pool,
        DiceGroupKind::Chain,
        DiceGroupKind::Chain,
    ]);
    assert_that!(group_faces(&check.dice.groups[1])).contains_exactly_in_given_order([6, 6, 2]);
    assert_that!(check.outcome.successes).is_equal_to(3);
    assert_that!(check.outcome.tier).is_equal_to(SuccessTier::CriticalSuccess);
}

#[test]
fn classic_chain_of_sixes_is_capped() {
    let rules = RulesConfig::from_toml_str("chain_iteration_cap = 5").unwrap();
    let faces = [1, 1, 1, 1].into_iter().chain([6; 5]);
    let mut resolver = CombatResolver::new(rules, model::test_util::ScriptedDieRoller::new(faces));

    let check = resolver.resolve_automatic_fire(automatic(false, false, Ruleset::Classic)).unwrap();

    assert_that!(check.dice.groups[1].dice.clone()).has_length(5);
    assert_that!(check.outcome.successes).is_equal_to(5);
    assert_that!(resolver.into_roller().remaining()).is_equal_to(0);
}

#[rstest]
#[case::plain(false, false, 3, 4)]
#[case::machine_gunner(true, false, 3, 6)]
#[case::high_capacity(false, true, 4, 4)]
#[case::both(true, true, 4, 6)]
fn full_auto_burst_shape(
    #[case] machine_gunner: bool,
    #[case] high_capacity: bool,
    #[case] attacks: usize,
    #[case] dice: usize,
) {
    let mut resolver = CombatResolver::new(RulesConfig::default(), RandomDieRoller::seeded(7));

    let resolution = resolver
        .resolve(automatic(machine_gunner, high_capacity, Ruleset::CombatOverhaul))
        .unwrap();

    let Resolution::FullAuto(series) = resolution
    else {
        panic!("expected full-auto series");
    };

    let numbers = series.attacks.iter().map(|attack| attack.number).collect::<Vec<_>>();

    assert_that!(series.num_attacks()).is_equal_to(attacks);
    assert_that!(series.dice_per_attack).is_equal_to(dice);
    assert_that!(numbers).contains_exactly_in_given_order((1..=attacks).collect::<Vec<_>>());
    assert_that!(series.attacks.iter().all(|attack| attack.dice.dice_count() == dice)).is_true();
    assert_that!(series.total_hits).is_less_than_or_equal_to(series.num_attacks());
    assert_that!(series.total_successes).is_greater_than_or_equal_to(series.total_hits);
}

#[test]
fn seeded_full_auto_is_reproducible() {
    let request = automatic(false, true, Ruleset::CombatOverhaul);
    let mut first = CombatResolver::new(RulesConfig::default(), RandomDieRoller::seeded(42));
    let mut second = CombatResolver::new(RulesConfig::default(), RandomDieRoller::seeded(42));

    let first = first.resolve_full_auto(request.clone()).unwrap();
    let second = second.resolve_full_auto(request).unwrap();

    assert_that!(first).is_equal_to(second);
}
