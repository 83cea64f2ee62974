//! Property-based invariants for the threat-inference engine.
//!
//! Random discard histories drive the analyzers and the aggregation layer;
//! the invariants must hold for every generated history.

use proptest::prelude::*;

use betaori_core::analyzer::{
    ChinitsuAnalyzer, HonitsuAnalyzer, ShapeAnalyzer, ShapeHypothesis,
};
use betaori_core::danger::{DangerEvaluator, SafeVotePolicy};
use betaori_core::table::{OpponentView, TableView};
use betaori_core::tile::TileType;

/// Discards below the half-flush activation floor.
fn short_history() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..34, 0..betaori_core::analyzer::honitsu::MIN_DISCARDS)
}

/// Any plausible discard history.
fn any_history() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..34, 0..18)
}

fn table_from(history: &[u8], opponent: usize) -> TableView {
    let mut table = TableView::new();
    for &kind in history {
        table.on_discard(opponent, kind * 4, false);
    }
    table
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Below the activation floor every analyzer reports inactive.
    #[test]
    fn short_histories_never_activate(history in short_history()) {
        let view = OpponentView::from_discard_types(&history);
        prop_assert_eq!(HonitsuAnalyzer.detect(&view).unwrap(), None);
        prop_assert_eq!(ChinitsuAnalyzer.detect(&view).unwrap(), None);
    }

    /// When a single-suit hypothesis activates, the safe set is exactly the
    /// honors plus everything outside the chosen suit.
    #[test]
    fn active_safe_set_has_the_right_shape(history in any_history()) {
        let view = OpponentView::from_discard_types(&history);
        for analyzer in [&HonitsuAnalyzer as &dyn ShapeAnalyzer, &ChinitsuAnalyzer] {
            if let Some(hyp) = analyzer.detect(&view).unwrap() {
                let ShapeHypothesis::SingleSuit { suit, .. } = hyp;
                let safe = analyzer.safe_tiles(&hyp);
                for id in 0..34u8 {
                    let tile = TileType::new(id).unwrap();
                    let expected = tile.is_honor() || tile.suit() != suit;
                    prop_assert_eq!(
                        safe.contains(tile),
                        expected,
                        "analyzer {} tile {}",
                        analyzer.id(),
                        tile
                    );
                }
            }
        }
    }

    /// A fully revealed honor never yields bonus danger.
    #[test]
    fn dead_honors_have_no_bonus(history in any_history(), honor in 27u8..34) {
        let view = OpponentView::from_discard_types(&history);
        if let Some(hyp) = HonitsuAnalyzer.detect(&view).unwrap() {
            let sigs = HonitsuAnalyzer.bonus_danger(&hyp, honor * 4, 4);
            prop_assert!(sigs.is_empty());
        }
    }

    /// Re-running the activation check on an unchanged view yields the same
    /// hypothesis.
    #[test]
    fn detection_is_idempotent(history in any_history()) {
        let view = OpponentView::from_discard_types(&history);
        prop_assert_eq!(
            HonitsuAnalyzer.detect(&view).unwrap(),
            HonitsuAnalyzer.detect(&view).unwrap()
        );
        prop_assert_eq!(
            ChinitsuAnalyzer.detect(&view).unwrap(),
            ChinitsuAnalyzer.detect(&view).unwrap()
        );
    }

    /// Registration order never changes the aggregate score.
    #[test]
    fn aggregation_is_order_independent(history in any_history(), kind in 0u8..34) {
        let table = table_from(&history, 0);

        let mut forward = DangerEvaluator::new(SafeVotePolicy::default());
        forward.register(Box::new(HonitsuAnalyzer));
        forward.register(Box::new(ChinitsuAnalyzer));

        let mut backward = DangerEvaluator::new(SafeVotePolicy::default());
        backward.register(Box::new(ChinitsuAnalyzer));
        backward.register(Box::new(HonitsuAnalyzer));

        let a = forward.aggregate(&table, 0, kind * 4);
        let b = backward.aggregate(&table, 0, kind * 4);
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.signals.len(), b.signals.len());
    }

    /// Scores are never negative and genbutsu is always zero.
    #[test]
    fn scores_are_bounded(history in any_history(), kind in 0u8..34) {
        let table = table_from(&history, 0);
        let eval = DangerEvaluator::standard();
        let report = eval.aggregate(&table, 0, kind * 4);
        prop_assert!(report.score >= 0);
        if history.contains(&kind) {
            prop_assert_eq!(report.score, 0, "genbutsu must be zero");
        }
    }

    /// The overall score is the max over the threatening opponents, and
    /// zero when nobody threatens.
    #[test]
    fn overall_is_per_opponent_max(history in any_history(), kind in 0u8..34) {
        let mut table = TableView::new();
        for (i, &k) in history.iter().enumerate() {
            table.on_discard(i % 3, k * 4, false);
        }
        let eval = DangerEvaluator::standard();
        let result = eval.overall_danger(&table, &[kind * 4]);
        match result[0].per_opponent.iter().map(|(_, r)| r.score).max() {
            Some(per_max) => prop_assert_eq!(result[0].overall, per_max),
            None => prop_assert_eq!(result[0].overall, 0),
        }
    }

    /// Riichi always promotes a seat into the threat set.
    #[test]
    fn riichi_seat_is_always_a_threat(history in any_history(), seat in 0usize..3) {
        let mut table = table_from(&history, (seat + 1) % 3);
        table.on_riichi(seat);
        let eval = DangerEvaluator::standard();
        prop_assert!(eval.threatening_opponents(&table).contains(&seat));
    }
}
