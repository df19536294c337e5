//! Shared test fixtures for the mahjong-distance crates.
//!
//! Depends only on `mahjong-distance-core`, so every other crate can take it
//! as a dev-dependency.
//!
//! - [`hands`] - named hands in well-known shapes
//! - [`deal`] - seeded wall shuffles and random hands
//!
//! ```toml
//! [dev-dependencies]
//! mahjong-distance-test = { workspace = true }
//! ```

pub mod deal;
pub mod hands;

pub use deal::{random_hand, shuffled_wall};
pub use hands::hand;
