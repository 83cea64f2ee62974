//! Public history records: discards and revealed melds.

use serde::{Deserialize, Serialize};

use crate::tile::{tile136_to_type, TileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi = 0,
    Pon = 1,
    Daiminkan = 2,
    Ankan = 3,
    Kakan = 4,
}

/// A revealed meld, in 136-format so red fives stay distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<u8>,
    /// Seat the claimed tile came from, or -1 for concealed kan.
    pub from_who: i8,
    /// The tile claimed from another player's discard (chi/pon/daiminkan).
    /// None for ankan/kakan.
    pub called_tile: Option<u8>,
}

impl Meld {
    pub fn new(meld_type: MeldType, tiles: Vec<u8>, from_who: i8, called_tile: Option<u8>) -> Self {
        Self {
            meld_type,
            tiles,
            from_who,
            called_tile,
        }
    }

    /// Kind of the meld's lead tile. A meld always has at least one tile;
    /// an empty meld is malformed input and yields `None`.
    pub fn lead_type(&self) -> Option<TileType> {
        self.tiles.first().map(|&t| tile136_to_type(t))
    }
}

/// One entry in an opponent's discard pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub tile136: u8,
    /// True if discarded straight from the draw (tsumogiri), false if the
    /// opponent chose it out of their hand (tedashi).
    pub tsumogiri: bool,
}

impl Discard {
    pub fn new(tile136: u8, tsumogiri: bool) -> Self {
        Self { tile136, tsumogiri }
    }

    #[inline]
    pub fn tile_type(&self) -> TileType {
        tile136_to_type(self.tile136)
    }
}
