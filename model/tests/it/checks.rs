use kernal::prelude::*;
use model::check::modifier::{ItemModifier, ItemModifiers, ModifierId};
use model::check::outcome::SuccessTier;
use model::check::push::PushBonus;
use model::error::{AlreadyPushedError, InvalidRollError, InvalidRollReason};
use model::fortune::DarknessPoints;
use model::pool::{ActorKind, DicePool, RollKind, RollRequest};
use model::roll::Roll;
use rstest::rstest;

use crate::*;

#[test]
fn general_roll_with_two_sixes_is_limited_success() {
    let mut resolver = resolver([6, 3, 6, 1, 2]);

    let check = resolver.evaluate_roll(request(RollKind::General, 3, 2, 0)).unwrap();

    assert_that!(check.pool).is_equal_to(DicePool { dice: 5, desperation: false });
    assert_that!(check.outcome.successes).is_equal_to(2);
    assert_that!(check.outcome.tier).is_equal_to(SuccessTier::LimitedSuccess);
    assert_that!(check.outcome.desperation).is_false();
}

#[rstest]
#[case::single_die(request(RollKind::Weapon, 1, 0, 0), DicePool { dice: 1, desperation: false })]
#[case::empty(request(RollKind::Armor, 0, 0, 0), DicePool { dice: 2, desperation: true })]
#[case::modified_to_empty(
    RollRequest { modifier: -1, ..request(RollKind::Weapon, 1, 0, 0) },
    DicePool { dice: 2, desperation: true },
)]
fn weapon_and_armor_pools(#[case] request: RollRequest, #[case] expected: DicePool) {
    let mut resolver = resolver([4, 4]);

    let check = resolver.evaluate_roll(request).unwrap();

    assert_that!(check.pool).is_equal_to(expected);
    assert_that!(check.dice.dice_count()).is_equal_to(expected.dice);
}

#[test]
fn weapon_modified_to_empty_pool_needs_both_sixes() {
    let request = RollRequest {
        modifier: -3,
        ..request(RollKind::Weapon, 1, 1, 0)
    };
    let mut resolver = resolver([6, 3]);

    let check = resolver.evaluate_roll(request).unwrap();

    assert_that!(check.pool).is_equal_to(DicePool { dice: 2, desperation: true });
    assert_that!(check.outcome.successes).is_equal_to(1);
    assert_that!(check.outcome.tier).is_equal_to(SuccessTier::Failure);
}

#[test]
fn empty_weapon_roll_is_rejected() {
    let mut resolver = resolver(Vec::<u8>::new());

    assert_that!(resolver.evaluate_roll(request(RollKind::Weapon, 0, 0, 0)))
        .contains_error(InvalidRollError {
            kind: RollKind::Weapon,
            reason: InvalidRollReason::NoDice,
        });
}

#[test]
fn checked_item_modifiers_change_the_pool() {
    let mut modifiers = ItemModifiers::from_modifiers([
        (ModifierId::new("scope"), ItemModifier::unchecked("Scope", 2)),
        (ModifierId::new("wound"), ItemModifier::checked("Wounded", -1)),
    ]);
    modifiers.set_checked(&ModifierId::new("scope"), true);
    let request = RollRequest {
        item_modifiers: modifiers,
        ..request(RollKind::Attribute, 2, 0, 0)
    };
    let mut resolver = resolver([1, 1, 1]);

    let check = resolver.evaluate_roll(request).unwrap();

    assert_that!(check.pool.dice).is_equal_to(3);
    assert_that!(check.request.item_modifiers.checked_summary())
        .is_equal_to("Scope (+2)\nWounded (-1)".to_owned());
}

#[test]
fn pushed_roll_keeps_sixes_and_cannot_be_pushed_again() {
    let request = RollRequest {
        actor_kind: ActorKind::Adversary,
        ..request(RollKind::General, 2, 2, 0)
    };
    let mut resolver = resolver([6, 2, 3, 6, 6, 1, 1, 5]);
    let mut darkness_points = DarknessPoints::new(4);
    let bonus = PushBonus {
        prayer: 1,
        prayer_modifiers: 1,
    };

    let mut check = resolver.evaluate_roll(request).unwrap();
    let sixes_before = check.dice.rolls()
        .enumerate()
        .filter(|(_, roll)| *roll == Roll::MAX)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    let pushed = resolver.push_roll(&mut check, bonus, &mut darkness_points).unwrap();
    let rolls_after = check.dice.rolls().collect::<Vec<_>>();
    let second = resolver.push_roll(&mut check, bonus, &mut darkness_points);

    assert_that!(sixes_before.iter().all(|&index| rolls_after[index] == Roll::MAX)).is_true();
    assert_that!(pushed.successes).is_equal_to(3);
    assert_that!(pushed.tier).is_equal_to(SuccessTier::CriticalSuccess);
    assert_that!(second).contains_error(AlreadyPushedError);
    assert_that!(check.outcome.successes).is_equal_to(3);
    assert_that!(darkness_points.points()).is_equal_to(3);
}
