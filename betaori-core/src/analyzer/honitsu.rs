//! Half-flush (honitsu) detector: one numbered suit plus honors.
//!
//! A player collecting one suit discards almost nothing from it and discards
//! honors only moderately. The suit they discard least from is the suit they
//! are collecting.

use anyhow::{bail, Result};

use crate::analyzer::{
    discard_histogram, outside_suit_with_honors, ShapeAnalyzer, ShapeHypothesis,
};
use crate::danger::DangerSignal;
use crate::table::OpponentView;
use crate::tile::{tile136_to_type, TileSet};

/// Discards required before the hypothesis is worth forming. Earlier
/// histories produce too many false positives.
pub const MIN_DISCARDS: usize = 6;

/// Maximum share (percent) of total discards allowed from the chosen suit.
pub const LESS_SUIT_PERCENTAGE_BORDER: usize = 20;

/// Maximum share (percent) of honor discards. A honitsu hand keeps honors,
/// but not all of them.
pub const HONORS_PERCENTAGE_BORDER: usize = 30;

pub struct HonitsuAnalyzer;

impl ShapeAnalyzer for HonitsuAnalyzer {
    fn id(&self) -> &'static str {
        "honitsu"
    }

    fn detect(&self, enemy: &OpponentView) -> Result<Option<ShapeHypothesis>> {
        let hist = discard_histogram(enemy);
        if hist.total < MIN_DISCARDS {
            return Ok(None);
        }

        let (chosen, least_count) = hist.least_discarded_suit();
        // Integer form of (count / total) * 100 <= border.
        if least_count * 100 > LESS_SUIT_PERCENTAGE_BORDER * hist.total {
            return Ok(None);
        }
        if hist.honors * 100 > HONORS_PERCENTAGE_BORDER * hist.total {
            return Ok(None);
        }

        // Every revealed meld must be built from the chosen suit or honors;
        // a meld from another numbered suit kills the hypothesis.
        for meld in enemy.melds() {
            let Some(lead) = meld.lead_type() else {
                bail!("meld with no tiles in opponent history");
            };
            if lead.is_honor() {
                continue;
            }
            if lead.suit() != chosen {
                return Ok(None);
            }
        }

        Ok(Some(ShapeHypothesis::SingleSuit {
            suit: chosen,
            with_honors: true,
        }))
    }

    fn safe_tiles(&self, hypothesis: &ShapeHypothesis) -> TileSet {
        let ShapeHypothesis::SingleSuit { suit, .. } = hypothesis;
        outside_suit_with_honors(*suit)
    }

    fn bonus_danger(
        &self,
        _hypothesis: &ShapeHypothesis,
        tile136: u8,
        revealed_copies: u8,
    ) -> Vec<DangerSignal> {
        let tile = tile136_to_type(tile136);
        if !tile.is_honor() {
            // Suit-tile danger under this shape belongs to the base model.
            return Vec::new();
        }
        match revealed_copies {
            4.. => Vec::new(), // dead tile, cannot complete anything
            3 => vec![DangerSignal::honitsu_third_honor(self.id())],
            _ => vec![DangerSignal::honitsu_early_honor(self.id())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Suit, TileType};
    use crate::types::{Meld, MeldType};

    fn detect(view: &OpponentView) -> Option<ShapeHypothesis> {
        HonitsuAnalyzer.detect(view).unwrap()
    }

    /// Discard history leaning pinzu+honors-light: manzu/souzu heavy.
    /// Pinzu is the least-discarded suit, so pinzu is the chosen one.
    fn pinzu_collector() -> OpponentView {
        // 1m 4m 7m 2s 5s 8s + W  -> 0 pinzu of 7 discards, 1 honor (~14%)
        OpponentView::from_discard_types(&[0, 3, 6, 19, 22, 25, 29])
    }

    #[test]
    fn too_few_discards_is_inactive() {
        let view = OpponentView::from_discard_types(&[0, 3, 6, 19, 22]);
        assert_eq!(detect(&view), None);
    }

    #[test]
    fn zero_discards_is_inactive() {
        let view = OpponentView::default();
        assert_eq!(detect(&view), None);
    }

    #[test]
    fn pinzu_collector_detected() {
        let hyp = detect(&pinzu_collector()).expect("should activate");
        assert_eq!(
            hyp,
            ShapeHypothesis::SingleSuit {
                suit: Suit::Pinzu,
                with_honors: true
            }
        );
    }

    #[test]
    fn even_spread_is_inactive() {
        // Roughly even across suits: least suit share way over 20%.
        let view = OpponentView::from_discard_types(&[0, 1, 9, 10, 18, 19, 27]);
        assert_eq!(detect(&view), None);
    }

    #[test]
    fn heavy_honor_discards_reject() {
        // 3 honors of 7 (~43%) exceeds the honor border even though
        // pinzu share is 0.
        let view = OpponentView::from_discard_types(&[0, 3, 6, 19, 27, 28, 29]);
        assert_eq!(detect(&view), None);
    }

    #[test]
    fn same_suit_meld_keeps_hypothesis() {
        // Pon of 3p (kind 11, ids 44..46).
        let meld = Meld::new(MeldType::Pon, vec![44, 45, 46], 2, Some(44));
        let view = pinzu_collector().with_meld(meld);
        assert!(detect(&view).is_some());
    }

    #[test]
    fn honor_meld_keeps_hypothesis() {
        let meld = Meld::new(MeldType::Pon, vec![124, 125, 126], 1, Some(124)); // Haku
        let view = pinzu_collector().with_meld(meld);
        assert!(detect(&view).is_some());
    }

    #[test]
    fn off_suit_meld_invalidates() {
        // Chi 2m3m4m while supposedly collecting pinzu.
        let meld = Meld::new(MeldType::Chi, vec![4, 8, 12], 3, Some(4));
        let view = pinzu_collector().with_meld(meld);
        assert_eq!(detect(&view), None);
    }

    #[test]
    fn malformed_meld_is_an_error() {
        let meld = Meld::new(MeldType::Pon, vec![], 1, None);
        let view = pinzu_collector().with_meld(meld);
        assert!(HonitsuAnalyzer.detect(&view).is_err());
    }

    #[test]
    fn safe_tiles_exclude_chosen_suit() {
        let hyp = detect(&pinzu_collector()).unwrap();
        let safe = HonitsuAnalyzer.safe_tiles(&hyp);
        for id in 0..34u8 {
            let t = TileType::new(id).unwrap();
            if t.is_honor() || t.suit() != Suit::Pinzu {
                assert!(safe.contains(t), "{t} should be safe");
            } else {
                assert!(!safe.contains(t), "{t} should not be safe");
            }
        }
    }

    #[test]
    fn honor_bonus_escalates_with_revealed_copies() {
        let hyp = detect(&pinzu_collector()).unwrap();
        let east136 = 108;
        for revealed in 0..3u8 {
            let sigs = HonitsuAnalyzer.bonus_danger(&hyp, east136, revealed);
            assert_eq!(sigs.len(), 1, "revealed={revealed}");
        }
        let third = HonitsuAnalyzer.bonus_danger(&hyp, east136, 3);
        let early = HonitsuAnalyzer.bonus_danger(&hyp, east136, 1);
        assert!(third[0].value > early[0].value);
    }

    #[test]
    fn dead_honor_has_no_bonus() {
        let hyp = detect(&pinzu_collector()).unwrap();
        assert!(HonitsuAnalyzer.bonus_danger(&hyp, 108, 4).is_empty());
    }

    #[test]
    fn suit_tiles_get_no_bonus_here() {
        let hyp = detect(&pinzu_collector()).unwrap();
        assert!(HonitsuAnalyzer.bonus_danger(&hyp, 40, 1).is_empty()); // a pinzu
    }

    #[test]
    fn detection_is_idempotent() {
        let view = pinzu_collector();
        let first = detect(&view);
        let second = detect(&view);
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_carries_hypothesis() {
        let snap = HonitsuAnalyzer.snapshot(&pinzu_collector());
        assert_eq!(snap.id, "honitsu");
        assert!(snap.hypothesis.is_some());
        let inactive = HonitsuAnalyzer.snapshot(&OpponentView::default());
        assert_eq!(inactive.hypothesis, None);
    }
}
