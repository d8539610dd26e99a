//! Calculator properties over a spread of realistic inputs.

use hedgepool::domain::money::EPSILON;
use hedgepool::domain::{
    compute_middle_profits, suggest_anchor_from_hedge, suggest_hedge_from_anchor, DomainError,
    Infeasibility, Suggestion,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ODDS: [Decimal; 6] = [dec!(1.25), dec!(1.5), dec!(1.91), dec!(2.1), dec!(3.4), dec!(7.0)];
const TARGETS: [Decimal; 4] = [dec!(0), dec!(5), dec!(10), dec!(30)];
const BUFFERS: [Decimal; 3] = [dec!(0), dec!(0.03), dec!(0.10)];

#[test]
fn feasible_hedges_meet_target_on_both_single_branches() {
    let stake = dec!(100);
    for odds in ODDS {
        for target in TARGETS {
            for buffer in BUFFERS {
                let suggestion = suggest_hedge_from_anchor(odds, stake, target, buffer).unwrap();
                let Suggestion::Feasible(q) = suggestion else {
                    assert!(target / dec!(100) >= odds - Decimal::ONE, "{odds} {target} should be feasible");
                    continue;
                };
                assert!(q.odds >= q.min_odds);
                assert!(q.stake > Decimal::ZERO);
                assert!(q.profits.anchor_only >= q.target - EPSILON, "{odds} {target} {buffer}");
                assert!(q.profits.hedge_only >= q.target - EPSILON, "{odds} {target} {buffer}");
                assert_eq!(q.profits, compute_middle_profits(odds, stake, q.odds, q.stake).unwrap());
            }
        }
    }
}

#[test]
fn feasible_anchors_meet_target_on_both_single_branches() {
    let stake = dec!(80);
    for odds in ODDS {
        for target in TARGETS {
            for buffer in BUFFERS {
                let suggestion = suggest_anchor_from_hedge(odds, stake, target, buffer).unwrap();
                let Some(q) = suggestion.quote() else {
                    continue;
                };
                assert!(q.profits.hedge_only >= q.target - EPSILON);
                assert!(q.profits.anchor_only >= q.target - EPSILON);
                assert!(q.profits.both > q.profits.worst_single());
            }
        }
    }
}

#[test]
fn buffer_raises_suggested_odds() {
    let plain = suggest_hedge_from_anchor(dec!(2.5), dec!(50), dec!(10), dec!(0)).unwrap();
    let buffered = suggest_hedge_from_anchor(dec!(2.5), dec!(50), dec!(10), dec!(0.05)).unwrap();
    let (plain, buffered) = (plain.quote().unwrap(), buffered.quote().unwrap());
    assert_eq!(plain.min_odds, buffered.min_odds);
    assert_eq!(buffered.odds, plain.odds + dec!(0.05));
}

#[test]
fn target_beyond_margin_is_infeasible_not_an_error() {
    let result = suggest_hedge_from_anchor(dec!(1.05), dec!(100), dec!(10), dec!(0)).unwrap();
    assert_eq!(result, Suggestion::Infeasible(Infeasibility::MarginTooThin));
    let result = suggest_anchor_from_hedge(dec!(1.05), dec!(100), dec!(10), dec!(0)).unwrap();
    assert!(!result.is_feasible());
}

#[test]
fn invalid_inputs_are_errors() {
    assert!(matches!(
        suggest_hedge_from_anchor(dec!(1.0), dec!(100), dec!(10), dec!(0)),
        Err(DomainError::InvalidOdds { .. })
    ));
    assert!(matches!(
        suggest_hedge_from_anchor(dec!(2.0), dec!(0), dec!(10), dec!(0)),
        Err(DomainError::NonPositiveStake { .. })
    ));
    assert!(matches!(
        suggest_anchor_from_hedge(dec!(2.0), dec!(10), dec!(-1), dec!(0)),
        Err(DomainError::NegativeTarget { .. })
    ));
    assert!(matches!(
        suggest_anchor_from_hedge(dec!(2.0), dec!(10), dec!(1), dec!(-0.01)),
        Err(DomainError::NegativeBuffer { .. })
    ));
}
