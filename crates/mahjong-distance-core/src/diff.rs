//! Single-substitution diffs and path traces.

use std::fmt;
use std::slice;

use crate::error::{HandDistanceError, Result};
use crate::hand::Hand;
use crate::tile::Tile;

/// One edge of the hand graph: `to` is `from` with `drawn` added and
/// `discarded` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandDiff {
    from: Hand,
    to: Hand,
    drawn: Tile,
    discarded: Tile,
}

impl HandDiff {
    /// Derives the diff between two adjacent hands.
    ///
    /// # Errors
    ///
    /// `NotAdjacent` unless exactly one tile was added and one removed.
    pub fn from_hands(from: &Hand, to: &Hand) -> Result<Self> {
        let delta = from.difference(to);
        let not_adjacent = || HandDistanceError::NotAdjacent {
            added: delta.added_count(),
            removed: delta.removed_count(),
        };
        if !delta.is_adjacent() {
            return Err(not_adjacent());
        }
        let drawn = delta.added_tiles().first().copied().ok_or_else(not_adjacent)?;
        let discarded = delta
            .removed_tiles()
            .first()
            .copied()
            .ok_or_else(not_adjacent)?;
        Ok(Self {
            from: from.clone(),
            to: to.clone(),
            drawn,
            discarded,
        })
    }

    pub fn from(&self) -> &Hand {
        &self.from
    }

    pub fn to(&self) -> &Hand {
        &self.to
    }

    pub fn drawn(&self) -> Tile {
        self.drawn
    }

    pub fn discarded(&self) -> Tile {
        self.discarded
    }
}

impl fmt::Display for HandDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (+{} -{})",
            self.from, self.to, self.drawn, self.discarded
        )
    }
}

/// Ordered diffs along a path, one per edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandsDiff(Vec<HandDiff>);

impl HandsDiff {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Diffs every consecutive pair of `path`.
    ///
    /// A path of zero or one hands yields an empty trace.
    pub fn from_path(path: &[Hand]) -> Result<Self> {
        path.windows(2)
            .map(|pair| HandDiff::from_hands(&pair[0], &pair[1]))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, HandDiff> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HandDiff> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[HandDiff] {
        &self.0
    }

    /// Drawn tiles in path order.
    pub fn drawn(&self) -> Vec<Tile> {
        self.0.iter().map(HandDiff::drawn).collect()
    }

    /// Discarded tiles in path order.
    pub fn discarded(&self) -> Vec<Tile> {
        self.0.iter().map(HandDiff::discarded).collect()
    }
}

impl From<Vec<HandDiff>> for HandsDiff {
    fn from(diffs: Vec<HandDiff>) -> Self {
        Self(diffs)
    }
}

impl<'a> IntoIterator for &'a HandsDiff {
    type Item = &'a HandDiff;
    type IntoIter = slice::Iter<'a, HandDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for HandsDiff {
    type Item = HandDiff;
    type IntoIter = std::vec::IntoIter<HandDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for HandsDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diff) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {diff}", i + 1)?;
        }
        Ok(())
    }
}
