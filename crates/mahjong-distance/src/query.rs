//! One-call queries with the default engine.

use mahjong_distance_config::DistanceConfig;
use mahjong_distance_core::{Hand, Result};
use mahjong_distance_search::{DistanceEngine, FoundPath};

/// Read from the working directory when present.
pub const CONFIG_FILE: &str = "distance.toml";

/// An engine configured from [`CONFIG_FILE`], or from defaults when the file
/// is missing or invalid.
pub fn default_engine() -> DistanceEngine {
    #[cfg(feature = "console")]
    crate::console::init();

    let config = DistanceConfig::load(CONFIG_FILE).unwrap_or_default();
    DistanceEngine::from_config(&config)
}

/// Shortest path from `from` to `to`, drawing from every tile `from` does
/// not hold.
///
/// # Errors
///
/// `DistanceUnreachable` when no path exists within the configured limits.
pub fn hand_distance(from: &Hand, to: &Hand) -> Result<FoundPath> {
    let engine = default_engine();
    let supply = engine.supply_for(from)?;
    engine.hand_distance(from, to, &supply)?.into_result()
}

/// Shortest path to a complete 14-tile shape, or to tenpai for 13 tiles.
pub fn distance_to_win(hand: &Hand) -> Result<FoundPath> {
    let engine = default_engine();
    let supply = engine.supply_for(hand)?;
    engine.distance_to_win(hand, &supply)?.into_result()
}
