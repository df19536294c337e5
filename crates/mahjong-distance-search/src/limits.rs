//! Search limits.

use std::time::{Duration, Instant};

use mahjong_distance_config::SearchConfig;

/// Caps that end a search early with an unreachable outcome.
///
/// Hitting a cap never yields a shorter distance than the true one; it
/// yields no distance.
///
/// ```
/// use std::time::Duration;
/// use mahjong_distance_search::SearchLimits;
///
/// let limits = SearchLimits::new(4)
///     .with_node_limit(10_000)
///     .with_time_limit(Duration::from_millis(50));
/// assert_eq!(limits.max_depth, 4);
/// assert_eq!(limits.node_limit, Some(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Most substitutions explored.
    pub max_depth: u32,
    /// Most hands held in one pass's visited set.
    pub node_limit: Option<u64>,
    /// Wall-clock budget for the whole query.
    pub time_limit: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchLimits {
    fn from(config: &SearchConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            node_limit: config.node_limit,
            time_limit: config.time_limit(),
        }
    }
}

impl SearchLimits {
    /// Depth cap only.
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            node_limit: None,
            time_limit: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Absolute deadline for a query started at `start`.
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit.and_then(|limit| start.checked_add(limit))
    }
}
