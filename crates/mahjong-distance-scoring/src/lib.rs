//! Scoring collaborators for the hand-distance search.
//!
//! Yaku detection lives outside this workspace. The search only asks a
//! [`ScoringOracle`] whether a hand is a qualifying win and, optionally, how
//! much it is worth. The [`shape`] module covers what can be decided from tile
//! counts alone: shanten numbers, complete and tenpai shapes, and waits.

pub mod context;
pub mod evaluation;
pub mod oracle;
pub mod shape;

pub use context::{WinCondition, WinContext};
pub use evaluation::{Evaluation, FuDetail, Qualification, ScoreBreakdown, Yaku};
pub use oracle::{CachedOracle, ScoringOracle, ShapeOracle};
pub use shape::WinShape;
