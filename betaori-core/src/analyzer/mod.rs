//! Hand-shape analyzers: infer a probable yaku from an opponent's public
//! history and expose safe-tile / bonus-danger signals against it.
//!
//! Each analyzer recomputes its hypothesis from the full history on every
//! query and returns it by value; nothing is cached on the analyzer between
//! decision cycles.

pub mod chinitsu;
pub mod honitsu;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::danger::DangerSignal;
use crate::table::OpponentView;
use crate::tile::{Suit, TileSet};

pub use chinitsu::ChinitsuAnalyzer;
pub use honitsu::HonitsuAnalyzer;

/// An inferred hand-shape hypothesis. Closed set of tagged variants; adding
/// a new analyzer that needs different state means adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeHypothesis {
    /// Opponent appears to be collecting one numbered suit.
    /// `with_honors` distinguishes half flush (honitsu) from pure flush.
    SingleSuit { suit: Suit, with_honors: bool },
}

/// Plain record of an analyzer's identity and current hypothesis, used by
/// regression tooling to assert "the engine inferred exactly this threat."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSnapshot {
    pub id: String,
    pub hypothesis: Option<ShapeHypothesis>,
}

/// One detectable hand-shape pattern.
///
/// `detect` is the activation check: `Ok(None)` means the pattern is not
/// recognized (short histories included -- absence of information is normal,
/// not an error). `Err` marks an analyzer-internal failure; the evaluator
/// logs it and treats the analyzer as inactive for that query.
pub trait ShapeAnalyzer: Send + Sync {
    fn id(&self) -> &'static str;

    /// Recompute the hypothesis from the opponent's current full history.
    fn detect(&self, enemy: &OpponentView) -> Result<Option<ShapeHypothesis>>;

    /// Kinds provably safe against this shape. Only meaningful with an
    /// active hypothesis; safety is relative to this pattern alone.
    fn safe_tiles(&self, hypothesis: &ShapeHypothesis) -> TileSet;

    /// Extra danger this shape puts on a tile, given how many copies of its
    /// kind are already visible.
    fn bonus_danger(
        &self,
        hypothesis: &ShapeHypothesis,
        tile136: u8,
        revealed_copies: u8,
    ) -> Vec<DangerSignal>;

    /// Serializable {id, hypothesis} record for logging and regression runs.
    fn snapshot(&self, enemy: &OpponentView) -> AnalyzerSnapshot {
        AnalyzerSnapshot {
            id: self.id().to_string(),
            hypothesis: self.detect(enemy).ok().flatten(),
        }
    }
}

/// Discard histogram split by suit: counts for the three numbered suits
/// (kind-index order), the honor count, and the total.
pub(crate) struct DiscardHistogram {
    pub suits: [usize; 3],
    pub honors: usize,
    pub total: usize,
}

pub(crate) fn discard_histogram(enemy: &OpponentView) -> DiscardHistogram {
    let mut suits = [0usize; 3];
    let mut honors = 0usize;
    for d in enemy.discards() {
        let tt = d.tile_type();
        match tt.suit() {
            Suit::Jihai => honors += 1,
            s => suits[s as usize] += 1,
        }
    }
    DiscardHistogram {
        suits,
        honors,
        total: enemy.discards().len(),
    }
}

impl DiscardHistogram {
    /// The numbered suit with the fewest discards (first in kind-index order
    /// on ties) and its count.
    pub fn least_discarded_suit(&self) -> (Suit, usize) {
        let mut best = Suit::Manzu;
        let mut best_count = self.suits[0];
        for &s in &Suit::NUMBERED[1..] {
            if self.suits[s as usize] < best_count {
                best = s;
                best_count = self.suits[s as usize];
            }
        }
        (best, best_count)
    }
}

/// Safe kinds shared by the single-suit shapes: every honor plus everything
/// outside the chosen suit.
pub(crate) fn outside_suit_with_honors(chosen: Suit) -> TileSet {
    (0..crate::tile::NUM_TILE_TYPES as u8)
        .filter_map(crate::tile::TileType::new)
        .filter(|t| t.is_honor() || t.suit() != chosen)
        .collect()
}
