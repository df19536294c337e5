//! Shortest-path search over the graph of Riichi Mahjong hands.
//!
//! Nodes are hands, edges are single substitutions (draw one tile, discard
//! one tile). The crate is organized as:
//! - `neighbor` - enumerating the hands one substitution away
//! - `target` - what a search is looking for, with optional distance bounds
//! - `frontier` - the layered breadth-first state machine
//! - `engine` - limits, iterative widening, batch queries and parallelism
//! - `outcome` - found paths, unreachable markers and distance matrices
//!
//! # Example
//!
//! ```
//! use mahjong_distance_core::{Hand, TileSupply};
//! use mahjong_distance_search::DistanceEngine;
//!
//! let from: Hand = "123m456p789s2355s".parse().unwrap();
//! let to: Hand = "123m456p789s2345s".parse().unwrap();
//! let supply = TileSupply::for_hand(&from, true).unwrap();
//!
//! let outcome = DistanceEngine::new().hand_distance(&from, &to, &supply).unwrap();
//! assert_eq!(outcome.distance(), Some(1));
//! ```

pub mod engine;
pub mod frontier;
pub mod limits;
pub mod neighbor;
pub mod outcome;
pub mod stats;
pub mod target;

pub use engine::DistanceEngine;
pub use frontier::{FrontierSearch, Parallelism, SearchNode, SearchPhase};
pub use limits::SearchLimits;
pub use neighbor::{NeighborFilter, NeighborGenerator, NeighborSet, NoFilter, Substitution};
pub use outcome::{DistanceMatrix, FoundPath, SearchOutcome};
pub use stats::SearchStats;
pub use target::{
    AnyHand, Both, CompleteShape, ExactHand, FnTarget, OracleTarget, TargetPredicate, TenpaiShape,
};
