//! Mahjong Distance Core - tile, hand and supply types
//!
//! This crate provides the value types the distance search walks over:
//! - `Tile` and `TileSet` for the 37 tile codes (34 types plus red fives)
//! - `Hand` and `Hands`, immutable count-vector multisets of tiles
//! - `TileSupply` and `TilePool` for the tiles still available to draw
//! - `HandDiff` and `HandsDiff` for single-substitution traces

pub mod diff;
pub mod error;
pub mod hand;
mod notation;
pub mod supply;
pub mod tile;

pub use diff::{HandDiff, HandsDiff};
pub use error::{HandDistanceError, Result, UnreachableReason};
pub use hand::{Hand, Hands, TileCounts, TileDelta, HAND_SIZES, MAX_HAND_SIZE};
pub use supply::{TilePool, TileSupply, DECK_SIZE};
pub use tile::{Honor, Suit, Tile, TileSet, Wind, NUM_TILE_CODES, NUM_TILE_TYPES};
