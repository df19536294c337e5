//! Symbolic tile notation.
//!
//! Accepted single-tile forms:
//! - compact: `5m`, `0m` (red five), `1z`..`7z`
//! - MJAI: `E S W N P F C`, `5mr`
//! - long form: `5c` (crack), `5d` (dot), `5b` (boo), `east`, `red`, ...
//!
//! Hands additionally accept compact groups such as `123m456p11z`, mixed
//! freely with single-tile tokens separated by whitespace or commas.

use std::str::FromStr;

use crate::error::{HandDistanceError, Result};
use crate::tile::{Honor, Suit, Tile};

fn invalid(s: &str) -> HandDistanceError {
    HandDistanceError::InvalidNotation(s.to_string())
}

fn honor_from_word(s: &str) -> Option<Honor> {
    let honor = match s {
        "E" | "east" => Honor::East,
        "S" | "south" => Honor::South,
        "W" | "west" => Honor::West,
        "N" | "north" => Honor::North,
        "P" | "white" => Honor::White,
        "F" | "green" => Honor::Green,
        "C" | "red" => Honor::Red,
        _ => return None,
    };
    Some(honor)
}

fn suit_from_long_letter(c: char) -> Option<Suit> {
    match c {
        'c' => Some(Suit::Man),
        'd' => Some(Suit::Pin),
        'b' => Some(Suit::Sou),
        _ => None,
    }
}

/// Builds a tile from a digit and a compact suit letter; `0` is a red five.
fn tile_from_digit(digit: u32, suit: Suit) -> Option<Tile> {
    match (suit, digit) {
        (Suit::Honor, 1..=7) => Some(Tile::from_honor(Honor::ALL[digit as usize - 1])),
        (Suit::Honor, _) => None,
        (_, 0) => Tile::numbered(suit, 5, true).ok(),
        (_, d) => Tile::numbered(suit, d as u8, false).ok(),
    }
}

impl FromStr for Tile {
    type Err = HandDistanceError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(honor) = honor_from_word(s) {
            return Ok(Tile::from_honor(honor));
        }

        let chars: Vec<char> = s.chars().collect();
        let digit = chars.first().and_then(|c| c.to_digit(10));
        match (digit, &chars[..]) {
            (Some(d), [_, letter]) => {
                if let Some(suit) = Suit::from_letter(*letter) {
                    return tile_from_digit(d, suit).ok_or_else(|| invalid(s));
                }
                if let Some(suit) = suit_from_long_letter(*letter) {
                    if (1..=9).contains(&d) {
                        return Tile::numbered(suit, d as u8, false);
                    }
                }
                Err(invalid(s))
            }
            (Some(5), [_, letter, 'r']) => match Suit::from_letter(*letter) {
                Some(suit) if suit != Suit::Honor => Tile::numbered(suit, 5, true),
                _ => Err(invalid(s)),
            },
            _ => Err(invalid(s)),
        }
    }
}

/// Parses a compact group run such as `123m456p0s11z`.
fn parse_groups(token: &str, out: &mut Vec<Tile>) -> Result<()> {
    let mut pending: Vec<u32> = Vec::new();
    for c in token.chars() {
        if let Some(d) = c.to_digit(10) {
            pending.push(d);
            continue;
        }
        let suit = Suit::from_letter(c).ok_or_else(|| invalid(token))?;
        if pending.is_empty() {
            return Err(invalid(token));
        }
        for d in pending.drain(..) {
            out.push(tile_from_digit(d, suit).ok_or_else(|| invalid(token))?);
        }
    }
    if !pending.is_empty() {
        return Err(invalid(token));
    }
    Ok(())
}

/// Parses a sequence of tiles in any accepted notation.
pub(crate) fn parse_tiles(s: &str) -> Result<Vec<Tile>> {
    let mut tiles = Vec::new();
    for token in s
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|t| t.trim_matches(|c| c == '[' || c == ']'))
        .filter(|t| !t.is_empty())
    {
        match token.parse::<Tile>() {
            Ok(tile) => tiles.push(tile),
            Err(_) => parse_groups(token, &mut tiles)?,
        }
    }
    Ok(tiles)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::{de, ser};

    use crate::tile::Tile;

    impl ser::Serialize for Tile {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: ser::Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    struct TileVisitor;

    impl de::Visitor<'_> for TileVisitor {
        type Value = Tile;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("tile symbol")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse().map_err(E::custom)
        }
    }

    impl<'de> de::Deserialize<'de> for Tile {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: de::Deserializer<'de>,
        {
            deserializer.deserialize_str(TileVisitor)
        }
    }
}
