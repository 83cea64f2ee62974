//! Game-state facade: per-opponent public history plus safety bookkeeping.
//!
//! `TableView` is the single writer. Analyzers and the danger evaluator only
//! ever see `&OpponentView` / `&SafetyGrid`, so a decision cycle operates on
//! a frozen snapshot and needs no locking.

use crate::safety::{SafetyGrid, NUM_OPPONENTS};
use crate::tile::{tile136_to_type, TileType};
use crate::types::{Discard, Meld};

/// One opponent's public history: append-only discards (in turn order) and
/// revealed melds.
#[derive(Debug, Clone, Default)]
pub struct OpponentView {
    discards: Vec<Discard>,
    melds: Vec<Meld>,
    riichi: bool,
}

impl OpponentView {
    pub fn discards(&self) -> &[Discard] {
        &self.discards
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    pub fn riichi_declared(&self) -> bool {
        self.riichi
    }

    /// Test/fixture helper: build a view from discarded tile kinds.
    pub fn from_discard_types(types: &[u8]) -> Self {
        let mut view = Self::default();
        for &tt in types {
            view.discards.push(Discard::new(tt * 4, false));
        }
        view
    }

    /// Test/fixture helper: append a revealed meld.
    pub fn with_meld(mut self, meld: Meld) -> Self {
        self.melds.push(meld);
        self
    }
}

/// The observing player's view of the table: three opponents and the shared
/// visible-copy accounting.
#[derive(Debug, Clone)]
pub struct TableView {
    opponents: [OpponentView; NUM_OPPONENTS],
    safety: SafetyGrid,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            opponents: Default::default(),
            safety: SafetyGrid::new(),
        }
    }

    /// Reset all histories at round start.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn opponent(&self, idx: usize) -> &OpponentView {
        &self.opponents[idx]
    }

    pub fn safety(&self) -> &SafetyGrid {
        &self.safety
    }

    /// Indices of opponents still in the hand. The danger evaluator narrows
    /// these further to the seats that currently threaten.
    pub fn live_opponents(&self) -> Vec<usize> {
        (0..NUM_OPPONENTS).collect()
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    /// Record an opponent's discard.
    pub fn on_discard(&mut self, opponent_idx: usize, tile136: u8, tsumogiri: bool) {
        if opponent_idx >= NUM_OPPONENTS {
            return;
        }
        self.opponents[opponent_idx]
            .discards
            .push(Discard::new(tile136, tsumogiri));
        self.safety
            .on_discard(opponent_idx, tile136_to_type(tile136), !tsumogiri);
    }

    /// Record a revealed meld. The claimed tile was already counted when it
    /// was discarded, so only the tiles supplied from hand add visibility.
    pub fn on_meld(&mut self, opponent_idx: usize, meld: Meld) {
        if opponent_idx >= NUM_OPPONENTS {
            return;
        }
        let mut claimed = meld.called_tile;
        for &t in &meld.tiles {
            if claimed == Some(t) {
                claimed = None; // skip exactly one instance
                continue;
            }
            self.safety.note_visible(tile136_to_type(t));
        }
        self.opponents[opponent_idx].melds.push(meld);
    }

    /// Record an opponent's riichi declaration.
    pub fn on_riichi(&mut self, opponent_idx: usize) {
        if opponent_idx >= NUM_OPPONENTS {
            return;
        }
        self.opponents[opponent_idx].riichi = true;
        self.safety.on_riichi(opponent_idx);
    }

    /// Record a revealed dora indicator.
    pub fn on_dora_indicator(&mut self, tile136: u8) {
        self.safety.note_visible(tile136_to_type(tile136));
    }

    /// Count a tile visible only to the observer (own hand).
    pub fn note_visible(&mut self, tile: TileType) {
        self.safety.note_visible(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MeldType;

    fn t(id: u8) -> TileType {
        TileType::new(id).unwrap()
    }

    #[test]
    fn discard_appends_in_order() {
        let mut table = TableView::new();
        table.on_discard(0, 4, false); // 2m tedashi
        table.on_discard(0, 40, true); // 2p tsumogiri
        let discards = table.opponent(0).discards();
        assert_eq!(discards.len(), 2);
        assert_eq!(discards[0].tile136, 4);
        assert!(!discards[0].tsumogiri);
        assert_eq!(discards[1].tile136, 40);
        assert!(discards[1].tsumogiri);
        assert!(table.safety().opponent(0).is_genbutsu(t(1)));
        assert!(table.safety().opponent(0).is_tedashi_genbutsu(t(1)));
        assert!(!table.safety().opponent(0).is_tedashi_genbutsu(t(10)));
    }

    #[test]
    fn meld_counts_only_hand_tiles() {
        let mut table = TableView::new();
        // Opponent 1 discards 7p (kind 15, 136-id 60); opponent 0 pons it.
        table.on_discard(1, 60, false);
        assert_eq!(table.safety().visible_count(t(15)), 1);
        let meld = Meld::new(MeldType::Pon, vec![60, 61, 62], 1, Some(60));
        table.on_meld(0, meld);
        // 60 already counted at discard time; 61 and 62 are new.
        assert_eq!(table.safety().visible_count(t(15)), 3);
        assert_eq!(table.opponent(0).melds().len(), 1);
    }

    #[test]
    fn ankan_counts_all_four() {
        let mut table = TableView::new();
        let meld = Meld::new(MeldType::Ankan, vec![108, 109, 110, 111], -1, None);
        table.on_meld(2, meld);
        assert_eq!(table.safety().visible_count(t(27)), 4);
        assert!(table.safety().is_kabe(t(27)));
    }

    #[test]
    fn riichi_flag_propagates() {
        let mut table = TableView::new();
        table.on_riichi(1);
        assert!(table.opponent(1).riichi_declared());
        assert!(table.safety().opponent(1).riichi_declared());
        table.on_discard(1, 0, true);
        assert!(table.safety().opponent(1).is_riichi_era_genbutsu(t(0)));
    }

    #[test]
    fn dora_and_own_hand_visibility() {
        let mut table = TableView::new();
        table.on_dora_indicator(132); // Chun indicator
        table.note_visible(t(33));
        assert_eq!(table.safety().visible_count(t(33)), 2);
    }

    #[test]
    fn out_of_bounds_opponent_is_noop() {
        let mut table = TableView::new();
        table.on_discard(5, 0, false);
        table.on_riichi(5);
        for idx in 0..NUM_OPPONENTS {
            assert!(table.opponent(idx).discards().is_empty());
            assert!(!table.opponent(idx).riichi_declared());
        }
    }
}
