//! Pure-flush (chinitsu) detector: one numbered suit, no honors.
//!
//! Shares the least-discarded-suit inference with the honitsu detector, but
//! with a tighter suit border and no honor cap: a flush player throws honors
//! freely. Any meld outside the chosen suit, honors included, rules the
//! shape out.

use anyhow::{bail, Result};

use crate::analyzer::{
    discard_histogram, outside_suit_with_honors, ShapeAnalyzer, ShapeHypothesis,
};
use crate::danger::DangerSignal;
use crate::table::OpponentView;
use crate::tile::TileSet;

/// Same activation floor as the half-flush detector.
pub const MIN_DISCARDS: usize = 6;

/// Tighter than honitsu: a pure-flush player discards essentially nothing
/// from their suit.
pub const LESS_SUIT_PERCENTAGE_BORDER: usize = 10;

/// Minimum share of honor discards. A pure-flush hand has no use for honors,
/// so a history that keeps them points at honitsu instead. This is what
/// separates the two single-suit hypotheses on discards alone.
pub const HONORS_PERCENTAGE_FLOOR: usize = 20;

pub struct ChinitsuAnalyzer;

impl ShapeAnalyzer for ChinitsuAnalyzer {
    fn id(&self) -> &'static str {
        "chinitsu"
    }

    fn detect(&self, enemy: &OpponentView) -> Result<Option<ShapeHypothesis>> {
        let hist = discard_histogram(enemy);
        if hist.total < MIN_DISCARDS {
            return Ok(None);
        }

        let (chosen, least_count) = hist.least_discarded_suit();
        if least_count * 100 > LESS_SUIT_PERCENTAGE_BORDER * hist.total {
            return Ok(None);
        }
        if hist.honors * 100 < HONORS_PERCENTAGE_FLOOR * hist.total {
            return Ok(None);
        }

        for meld in enemy.melds() {
            let Some(lead) = meld.lead_type() else {
                bail!("meld with no tiles in opponent history");
            };
            // An honor triplet cannot be part of a pure flush.
            if lead.is_honor() || lead.suit() != chosen {
                return Ok(None);
            }
        }

        Ok(Some(ShapeHypothesis::SingleSuit {
            suit: chosen,
            with_honors: false,
        }))
    }

    fn safe_tiles(&self, hypothesis: &ShapeHypothesis) -> TileSet {
        let ShapeHypothesis::SingleSuit { suit, .. } = hypothesis;
        // A pure flush can only wait inside its suit, so honors are safe too.
        outside_suit_with_honors(*suit)
    }

    fn bonus_danger(
        &self,
        _hypothesis: &ShapeHypothesis,
        _tile136: u8,
        _revealed_copies: u8,
    ) -> Vec<DangerSignal> {
        // Suit-tile escalation is left to the base model; honors are dead
        // against a pure flush.
        Vec::new()
    }
}
