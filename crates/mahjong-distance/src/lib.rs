//! Riichi Mahjong hand distance.
//!
//! Counts the fewest draw-one, discard-one substitutions between two hands,
//! or from a hand to the nearest win, and reports the path taken.
//!
//! # Example
//!
//! ```rust
//! use mahjong_distance::prelude::*;
//!
//! let from: Hand = "123m456p789s2557s".parse().unwrap();
//! let to: Hand = "123m456p789s2345s".parse().unwrap();
//!
//! let path = mahjong_distance::hand_distance(&from, &to).unwrap();
//! assert_eq!(path.distance, 2);
//! assert_eq!(path.trace.len(), 2);
//! ```

// Tiles, hands and diffs
pub use mahjong_distance_core::{
    HandDiff, HandDistanceError, Hands, HandsDiff, Honor, Hand, Result, Suit, Tile, TileCounts,
    TileDelta, TilePool, TileSet, TileSupply, UnreachableReason, Wind,
};

// Scoring collaborator
pub use mahjong_distance_scoring::{
    CachedOracle, Evaluation, Qualification, ScoreBreakdown, ScoringOracle, ShapeOracle,
    WinCondition, WinContext, WinShape, Yaku,
};

// Configuration
pub use mahjong_distance_config::{ConfigError, DistanceConfig, ThreadCount};

// Search
pub use mahjong_distance_search::{
    DistanceEngine, DistanceMatrix, FoundPath, NeighborFilter, NeighborGenerator, SearchLimits,
    SearchOutcome, SearchStats, TargetPredicate,
};

pub mod target {
    pub use mahjong_distance_search::target::*;
}

#[cfg(feature = "console")]
pub mod console;

mod query;
pub use query::{default_engine, distance_to_win, hand_distance, CONFIG_FILE};

pub mod prelude {
    pub use super::{distance_to_win, hand_distance};
    pub use super::{DistanceConfig, DistanceEngine, SearchLimits, SearchOutcome};
    pub use super::{Hand, HandDiff, HandsDiff, Tile, TileSet, TileSupply};
    pub use super::{Qualification, ScoringOracle, WinContext};
}
