//! Base statistical safety flags: genbutsu, suji, kabe, one-chance.
//!
//! `SafetyGrid` is the incremental bookkeeping behind the danger model.
//! It is written only by the game-state facade (`TableView`) and read by the
//! danger evaluator when scoring a candidate discard.

use crate::tile::{TileSet, TileType, JIHAI_START, NUM_SUIT_TILES, NUM_TILE_TYPES};

/// Number of opponents tracked per observing player.
pub const NUM_OPPONENTS: usize = 3;

/// Copies of each tile kind in the set.
const COPIES_PER_KIND: u8 = 4;

/// Per-opponent safety flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentSafety {
    /// Kinds the opponent themself discarded: 100% safe against them.
    genbutsu: TileSet,
    /// Genbutsu discarded from hand (tedashi), not straight from the draw.
    genbutsu_tedashi: TileSet,
    /// Genbutsu that passed after the opponent's riichi declaration.
    genbutsu_riichi_era: TileSet,
    /// Suji inference: 1-4-7 / 2-5-8 / 3-6-9 neighbors of genbutsu kinds.
    suji: TileSet,
    riichi: bool,
}

impl OpponentSafety {
    #[inline]
    pub fn is_genbutsu(&self, tile: TileType) -> bool {
        self.genbutsu.contains(tile)
    }

    #[inline]
    pub fn is_tedashi_genbutsu(&self, tile: TileType) -> bool {
        self.genbutsu_tedashi.contains(tile)
    }

    #[inline]
    pub fn is_riichi_era_genbutsu(&self, tile: TileType) -> bool {
        self.genbutsu_riichi_era.contains(tile)
    }

    #[inline]
    pub fn is_suji(&self, tile: TileType) -> bool {
        self.suji.contains(tile)
    }

    #[inline]
    pub fn riichi_declared(&self) -> bool {
        self.riichi
    }
}

/// Safety bookkeeping for one observing player against all opponents,
/// plus the shared visible-copy counts used for kabe and one-chance.
#[derive(Debug, Clone)]
pub struct SafetyGrid {
    opponents: [OpponentSafety; NUM_OPPONENTS],
    visible: [u8; NUM_TILE_TYPES],
}

impl SafetyGrid {
    pub fn new() -> Self {
        Self {
            opponents: [OpponentSafety::default(); NUM_OPPONENTS],
            visible: [0; NUM_TILE_TYPES],
        }
    }

    /// Reset to round-start state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn opponent(&self, idx: usize) -> &OpponentSafety {
        &self.opponents[idx]
    }

    /// Copies of this kind seen anywhere in public information (plus the
    /// observer's own hand, if noted via `note_visible`).
    #[inline]
    pub fn visible_count(&self, tile: TileType) -> u8 {
        self.visible[tile.id() as usize]
    }

    /// Copies an opponent could still be holding or waiting on.
    #[inline]
    pub fn live_copies(&self, tile: TileType) -> u8 {
        COPIES_PER_KIND.saturating_sub(self.visible_count(tile))
    }

    /// All four copies visible: the kind is a wall block.
    #[inline]
    pub fn is_kabe(&self, tile: TileType) -> bool {
        self.visible_count(tile) >= COPIES_PER_KIND
    }

    /// Exactly one copy left unseen.
    #[inline]
    pub fn is_one_chance(&self, tile: TileType) -> bool {
        self.visible_count(tile) == COPIES_PER_KIND - 1
    }
}

impl Default for SafetyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyGrid {
    /// Record an opponent's discard: genbutsu against them, plus visible
    /// count and suji updates.
    pub fn on_discard(&mut self, opponent_idx: usize, tile: TileType, tedashi: bool) {
        if opponent_idx >= NUM_OPPONENTS {
            return;
        }
        let opp = &mut self.opponents[opponent_idx];
        opp.genbutsu.insert(tile);
        if tedashi {
            opp.genbutsu_tedashi.insert(tile);
        }
        if opp.riichi {
            opp.genbutsu_riichi_era.insert(tile);
        }

        self.note_visible(tile);
        self.update_suji(opponent_idx, tile);
    }

    /// Record an opponent's riichi declaration.
    pub fn on_riichi(&mut self, opponent_idx: usize) {
        if opponent_idx < NUM_OPPONENTS {
            self.opponents[opponent_idx].riichi = true;
        }
    }

    /// Count one more visible copy of a kind (meld reveal, dora indicator,
    /// the observer's own hand).
    pub fn note_visible(&mut self, tile: TileType) {
        let slot = &mut self.visible[tile.id() as usize];
        *slot = slot.saturating_add(1);
    }

    /// Suji pattern: if kind N is genbutsu, N-3 and N+3 within the same suit
    /// gain suji inference. Honors have no suji.
    fn update_suji(&mut self, opponent_idx: usize, tile: TileType) {
        if tile.id() >= JIHAI_START {
            return;
        }
        let suit_offset = (tile.id() / NUM_SUIT_TILES as u8) * NUM_SUIT_TILES as u8;
        let number = tile.id() - suit_offset; // 0-indexed within the suit
        let suji = &mut self.opponents[opponent_idx].suji;
        if number >= 3 {
            if let Some(t) = TileType::new(suit_offset + number - 3) {
                suji.insert(t);
            }
        }
        if number + 3 < NUM_SUIT_TILES as u8 {
            if let Some(t) = TileType::new(suit_offset + number + 3) {
                suji.insert(t);
            }
        }
    }
}
