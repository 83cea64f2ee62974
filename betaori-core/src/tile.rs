//! Tile representation: the 34-kind type system and 136-instance format.
//!
//! Every physical tile (0-135) maps to exactly one kind (0-33); the physical
//! index only matters where copies must be told apart (red fives, meld
//! composition). Conversions are pure and total.

use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile kinds (0-33).
pub const NUM_TILE_TYPES: usize = 34;

/// Number of tiles per suited category (1-9).
pub const NUM_SUIT_TILES: usize = 9;

/// Total physical tiles in a standard mahjong set.
pub const NUM_TILES_136: usize = 136;

// Suit range starts (tile kind indices).
pub const MANZU_START: u8 = 0;
pub const PINZU_START: u8 = 9;
pub const SOUZU_START: u8 = 18;
pub const JIHAI_START: u8 = 27;

// Named honor tile indices for readability.
pub const EAST: u8 = 27;
pub const SOUTH: u8 = 28;
pub const WEST: u8 = 29;
pub const NORTH: u8 = 30;
pub const HAKU: u8 = 31;
pub const HATSU: u8 = 32;
pub const CHUN: u8 = 33;

/// Red 5m in 136-format. The 0th copy of kind 4 (5m) is red.
pub const AKA_MANZU_136: u8 = 16;
/// Red 5p in 136-format.
pub const AKA_PINZU_136: u8 = 52;
/// Red 5s in 136-format.
pub const AKA_SOUZU_136: u8 = 88;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The four tile categories in Riichi Mahjong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Manzu = 0,
    Pinzu = 1,
    Souzu = 2,
    Jihai = 3,
}

impl Suit {
    /// Returns the starting tile kind index for this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Manzu => MANZU_START,
            Suit::Pinzu => PINZU_START,
            Suit::Souzu => SOUZU_START,
            Suit::Jihai => JIHAI_START,
        }
    }

    /// The three numbered suits, in kind-index order.
    pub const NUMBERED: [Suit; 3] = [Suit::Manzu, Suit::Pinzu, Suit::Souzu];
}

// ---------------------------------------------------------------------------
// TileType newtype
// ---------------------------------------------------------------------------

/// A tile kind in the range 0-33. Wraps a `u8` for type safety.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileType(u8);

impl TileType {
    /// Creates a `TileType` if `id` is in range 0..34.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < NUM_TILE_TYPES as u8 {
            Some(TileType(id))
        } else {
            None
        }
    }

    /// Raw numeric id (0-33).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Which suit this kind belongs to.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..=8 => Suit::Manzu,
            9..=17 => Suit::Pinzu,
            18..=26 => Suit::Souzu,
            _ => Suit::Jihai,
        }
    }

    /// 1-based number within the suit (1-9), or `None` for honor tiles.
    #[inline]
    pub const fn number(self) -> Option<u8> {
        if self.0 < JIHAI_START {
            Some((self.0 % NUM_SUIT_TILES as u8) + 1)
        } else {
            None
        }
    }

    /// True for 1 or 9 of any suit.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        if self.0 >= JIHAI_START {
            return false;
        }
        let num = self.0 % NUM_SUIT_TILES as u8;
        num == 0 || num == 8
    }

    /// True for wind or dragon tiles (indices 27-33).
    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= JIHAI_START
    }

    /// True for manzu, pinzu, or souzu (not jihai).
    #[inline]
    pub const fn is_suited(self) -> bool {
        self.0 < JIHAI_START
    }
}

impl fmt::Debug for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileType({}={})", self.0, tile_type_to_mjai(self.0))
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tile_type_to_mjai(self.0))
    }
}

// ---------------------------------------------------------------------------
// 136-format conversion and aka-dora
// ---------------------------------------------------------------------------

/// Converts a 136-format tile id (0-135) to its kind (0-33).
#[inline]
pub const fn tile136_to_type(tile136: u8) -> TileType {
    // Each kind has 4 copies: kind = tile136 / 4
    TileType(tile136 / 4)
}

/// Returns `true` if the 136-format tile is a red five (aka-dora).
#[inline]
pub const fn tile136_is_aka(tile136: u8) -> bool {
    matches!(tile136, AKA_MANZU_136 | AKA_PINZU_136 | AKA_SOUZU_136)
}

// ---------------------------------------------------------------------------
// TileSet: membership over the 34 kinds
// ---------------------------------------------------------------------------

/// A set of tile kinds, backed by a 34-bit mask.
/// Used for analyzer safe-tile sets and admissibility filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileSet(u64);

impl TileSet {
    #[inline]
    pub const fn empty() -> Self {
        TileSet(0)
    }

    #[inline]
    pub fn insert(&mut self, tile: TileType) {
        self.0 |= 1u64 << tile.id();
    }

    #[inline]
    pub const fn contains(&self, tile: TileType) -> bool {
        self.0 & (1u64 << tile.id()) != 0
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained kinds in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = TileType> + '_ {
        (0..NUM_TILE_TYPES as u8).filter_map(move |id| {
            if self.0 & (1u64 << id) != 0 {
                TileType::new(id)
            } else {
                None
            }
        })
    }
}

impl FromIterator<TileType> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileType>>(iter: I) -> Self {
        let mut set = TileSet::empty();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Display / parse helpers
// ---------------------------------------------------------------------------

/// MJAI-style string names for tile kinds.
const TILE_NAMES: [&str; NUM_TILE_TYPES] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "7p",
    "8p", "9p", "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", "E", "S", "W", "N", "P", "F",
    "C",
];

/// Returns the MJAI-style name for a tile kind (0-33).
/// Out-of-range values return "??".
#[inline]
pub fn tile_type_to_mjai(tile_type: u8) -> &'static str {
    TILE_NAMES.get(tile_type as usize).copied().unwrap_or("??")
}

/// Parses a tile name back into its kind.
///
/// Accepts MJAI names ("1m".."9s", "E"/"S"/"W"/"N"/"P"/"F"/"C") and the
/// tenhou-style honor digits "1z".."7z" used by the regression corpus.
pub fn parse_tile_name(name: &str) -> Option<TileType> {
    if let Some(pos) = TILE_NAMES.iter().position(|&n| n == name) {
        return TileType::new(pos as u8);
    }
    let bytes = name.as_bytes();
    if bytes.len() == 2 && bytes[1] == b'z' && (b'1'..=b'7').contains(&bytes[0]) {
        return TileType::new(JIHAI_START + (bytes[0] - b'1'));
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
