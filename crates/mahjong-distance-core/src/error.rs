//! Error types for hand distance operations

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::tile::Tile;

/// Main error type for hand distance operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandDistanceError {
    /// Integer tile code outside `0..NUM_TILE_CODES`
    #[error("Invalid tile code: {0}")]
    InvalidTileCode(u32),

    /// Symbolic tile or hand notation that could not be parsed
    #[error("Invalid tile notation: {0:?}")]
    InvalidNotation(String),

    /// Hand built from the wrong number of tiles
    #[error("Invalid hand size: expected {expected} tiles, got {actual}")]
    InvalidHandSize { expected: String, actual: usize },

    /// More copies of a tile than the deck (or the remaining supply) holds
    #[error("Supply exceeded for {tile}: {count} held, at most {cap} available")]
    SupplyExceeded { tile: Tile, count: u8, cap: u8 },

    /// Substitution discarding a tile the hand does not hold
    #[error("Tile {0} is not in hand")]
    TileNotInHand(Tile),

    /// Two hands are not exactly one substitution apart
    #[error("Hands are not adjacent: {added} tiles added, {removed} removed")]
    NotAdjacent { added: u32, removed: u32 },

    /// No path within the configured limits
    #[error("Distance unreachable: {0}")]
    DistanceUnreachable(UnreachableReason),
}

/// Why a search ended without reaching its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// Every reachable hand was visited.
    Exhausted,
    /// Depth cap reached with frontier still open.
    DepthLimit { max_depth: u32 },
    /// Node budget spent.
    NodeLimit { limit: u64 },
    /// Wall-clock deadline passed.
    Deadline { elapsed: Duration },
}

impl fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreachableReason::Exhausted => write!(f, "search space exhausted"),
            UnreachableReason::DepthLimit { max_depth } => {
                write!(f, "no path within {max_depth} substitutions")
            }
            UnreachableReason::NodeLimit { limit } => write!(f, "node limit {limit} reached"),
            UnreachableReason::Deadline { elapsed } => {
                write!(f, "deadline passed after {} ms", elapsed.as_millis())
            }
        }
    }
}

/// Result type alias for hand distance operations
pub type Result<T> = std::result::Result<T, HandDistanceError>;
