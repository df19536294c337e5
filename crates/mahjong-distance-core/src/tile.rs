//! Tile identities and their integer codes.
//!
//! Codes 0-33 are the 34 tile types (man 1-9, pin 1-9, sou 1-9, the four
//! winds, the three dragons); codes 34-36 are the red fives of man, pin and
//! sou. Count vectors throughout the workspace are indexed by these codes.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{HandDistanceError, Result};

/// Number of distinct tile types, red fives folded into their plain five.
pub const NUM_TILE_TYPES: usize = 34;

/// Number of tile codes, red fives included.
pub const NUM_TILE_CODES: usize = 37;

const MAN_START: u8 = 0;
const PIN_START: u8 = 9;
const SOU_START: u8 = 18;
const HONOR_START: u8 = 27;

const RED_MAN: u8 = 34;
const RED_PIN: u8 = 35;
const RED_SOU: u8 = 36;

/// Copies of each plain tile type in a full deck.
pub(crate) const COPIES_PER_TYPE: u8 = 4;

/// The four tile categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    /// Starting code of this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Man => MAN_START,
            Suit::Pin => PIN_START,
            Suit::Sou => SOU_START,
            Suit::Honor => HONOR_START,
        }
    }

    /// Compact-notation letter (`m`, `p`, `s`, `z`).
    pub const fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }

    pub(crate) const fn from_letter(c: char) -> Option<Suit> {
        match c {
            'm' => Some(Suit::Man),
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }

    const fn red_code(self) -> Option<u8> {
        match self {
            Suit::Man => Some(RED_MAN),
            Suit::Pin => Some(RED_PIN),
            Suit::Sou => Some(RED_SOU),
            Suit::Honor => None,
        }
    }
}

/// Honor tiles in code order: winds, then dragons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    pub const ALL: [Honor; 7] = [
        Honor::East,
        Honor::South,
        Honor::West,
        Honor::North,
        Honor::White,
        Honor::Green,
        Honor::Red,
    ];

    /// Zero-based position among the honors.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_wind(self) -> bool {
        (self as u8) < 4
    }

    pub const fn is_dragon(self) -> bool {
        !self.is_wind()
    }
}

/// Seat and round winds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const fn honor(self) -> Honor {
        match self {
            Wind::East => Honor::East,
            Wind::South => Honor::South,
            Wind::West => Honor::West,
            Wind::North => Honor::North,
        }
    }

    pub const fn tile(self) -> Tile {
        Tile::from_honor(self.honor())
    }
}

/// A single tile identity. Wraps its code (0-36).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(u8);

impl Tile {
    /// Creates a `Tile` if `code` is in range 0..37.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < NUM_TILE_CODES {
            Some(Tile(code))
        } else {
            None
        }
    }

    /// Creates a numbered tile. `red` is only valid for rank 5.
    pub fn numbered(suit: Suit, rank: u8, red: bool) -> Result<Self> {
        if suit == Suit::Honor || !(1..=9).contains(&rank) {
            return Err(HandDistanceError::InvalidNotation(format!(
                "{rank}{}",
                suit.letter()
            )));
        }
        if red {
            return match (rank, suit.red_code()) {
                (5, Some(code)) => Ok(Tile(code)),
                _ => Err(HandDistanceError::InvalidNotation(format!(
                    "red {rank}{}",
                    suit.letter()
                ))),
            };
        }
        Ok(Tile(suit.start() + rank - 1))
    }

    /// Creates an honor tile.
    #[inline]
    pub const fn from_honor(honor: Honor) -> Self {
        Tile(HONOR_START + honor.index())
    }

    /// Raw code (0-36).
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Which suit this tile belongs to. Red fives report their number suit.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..9 | RED_MAN => Suit::Man,
            9..18 | RED_PIN => Suit::Pin,
            18..27 | RED_SOU => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    /// 1-based rank within the suit, or `None` for honors.
    #[inline]
    pub const fn rank(self) -> Option<u8> {
        match self.0 {
            RED_MAN | RED_PIN | RED_SOU => Some(5),
            c if c < HONOR_START => Some(c % 9 + 1),
            _ => None,
        }
    }

    /// Honor kind, or `None` for numbered tiles.
    pub const fn honor(self) -> Option<Honor> {
        if self.0 >= HONOR_START && self.0 < NUM_TILE_TYPES as u8 {
            Some(Honor::ALL[(self.0 - HONOR_START) as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_red(self) -> bool {
        matches!(self.0, RED_MAN | RED_PIN | RED_SOU)
    }

    /// The plain tile type: red fives map to their plain five.
    #[inline]
    pub const fn base(self) -> Self {
        match self.0 {
            RED_MAN => Tile(MAN_START + 4),
            RED_PIN => Tile(PIN_START + 4),
            RED_SOU => Tile(SOU_START + 4),
            c => Tile(c),
        }
    }

    /// The red variant of a plain five, if this is one.
    pub const fn red_variant(self) -> Option<Self> {
        match self.0 {
            4 => Some(Tile(RED_MAN)),
            13 => Some(Tile(RED_PIN)),
            22 => Some(Tile(RED_SOU)),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= HONOR_START && self.0 < NUM_TILE_TYPES as u8
    }

    /// True for 1 or 9 of a numbered suit.
    pub const fn is_terminal(self) -> bool {
        matches!(self.rank(), Some(1) | Some(9))
    }

    pub const fn is_terminal_or_honor(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// Maximum copies of this exact code a deck can hold.
    #[inline]
    pub const fn cap(self) -> u8 {
        if self.is_red() {
            1
        } else {
            COPIES_PER_TYPE
        }
    }

    /// Index 0-2 of the five group (plain or red five), used by the shared cap.
    pub(crate) const fn five_group(self) -> Option<usize> {
        match self.0 {
            4 | RED_MAN => Some(0),
            13 | RED_PIN => Some(1),
            22 | RED_SOU => Some(2),
            _ => None,
        }
    }

    /// Display order: plain type first, red five right after its plain five.
    pub(crate) const fn sort_key(self) -> (u8, bool) {
        (self.base().0, self.is_red())
    }
}

impl TryFrom<u8> for Tile {
    type Error = HandDistanceError;

    fn try_from(code: u8) -> Result<Self> {
        TileSet::decode(code as u32)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}={})", self.0, self)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = self.suit();
        let digit = match (self.rank(), self.honor()) {
            _ if self.is_red() => 0,
            (Some(rank), _) => rank,
            (None, Some(honor)) => honor.index() + 1,
            (None, None) => return f.write_str("??"),
        };
        write!(f, "{}{}", digit, suit.letter())
    }
}

/// Canonical enumeration of tile codes.
///
/// `decode` and `encode` are mutually inverse over `0..NUM_TILE_CODES`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileSet;

impl TileSet {
    /// Converts a code to a tile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileCode` when `code >= NUM_TILE_CODES`.
    pub fn decode(code: u32) -> Result<Tile> {
        u8::try_from(code)
            .ok()
            .and_then(Tile::from_code)
            .ok_or(HandDistanceError::InvalidTileCode(code))
    }

    #[inline]
    pub const fn encode(tile: Tile) -> u8 {
        tile.code()
    }

    /// The 34 plain tile types, suit then rank, honors last.
    ///
    /// The iterator is `Clone`, so a copy can be replayed from the start.
    ///
    /// ```
    /// use mahjong_distance_core::TileSet;
    ///
    /// let tiles: Vec<String> = TileSet::all_tiles().map(|t| t.to_string()).collect();
    /// assert_eq!(tiles.len(), 34);
    /// assert_eq!(tiles[0], "1m");
    /// assert_eq!(tiles[33], "7z");
    /// ```
    pub fn all_tiles() -> CodeRange {
        CodeRange {
            next: 0,
            end: NUM_TILE_TYPES as u8,
        }
    }

    /// Every code, red fives included.
    pub fn all_codes() -> CodeRange {
        CodeRange {
            next: 0,
            end: NUM_TILE_CODES as u8,
        }
    }

    pub const fn red_fives() -> [Tile; 3] {
        [Tile(RED_MAN), Tile(RED_PIN), Tile(RED_SOU)]
    }
}

/// Ascending run of tile codes.
#[derive(Debug, Clone)]
pub struct CodeRange {
    next: u8,
    end: u8,
}

impl Iterator for CodeRange {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.end {
            return None;
        }
        let tile = Tile(self.next);
        self.next += 1;
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CodeRange {}

impl FusedIterator for CodeRange {}
