//! Configuration for hand-distance searches.
//!
//! Load search limits, deck rules and scoring context from TOML or YAML
//! without code changes.
//!
//! # Examples
//!
//! ```
//! use mahjong_distance_config::{DistanceConfig, ThreadCount};
//! use std::time::Duration;
//!
//! let config = DistanceConfig::from_toml_str(r#"
//!     [rules]
//!     red_fives = false
//!
//!     [search]
//!     max_depth = 5
//!     time_limit_ms = 250
//!     thread_count = "auto"
//!
//!     [scoring]
//!     seat_wind = "south"
//!     min_han = 2
//! "#).unwrap();
//!
//! assert!(!config.rules.red_fives);
//! assert_eq!(config.search.max_depth, 5);
//! assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
//! assert_eq!(config.search.thread_count, ThreadCount::Auto);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use mahjong_distance_config::DistanceConfig;
//!
//! let config = DistanceConfig::load("distance.toml").unwrap_or_default();
//! assert_eq!(config.search.max_depth, 8);
//! ```

use std::path::Path;
use std::time::Duration;

use mahjong_distance_core::Wind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main distance configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DistanceConfig {
    /// Deck rules.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Search limits and parallelism.
    #[serde(default)]
    pub search: SearchConfig,

    /// Context for oracle-qualified targets.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl DistanceConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::from_toml_file(path).inspect_err(|e| {
            debug!(event = "config_load_failed", path = %path.display(), error = %e);
        })
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "search.max_depth must be at least 1".to_string(),
            ));
        }
        if self.search.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "search.thread_count must be at least 1".to_string(),
            ));
        }
        if self.search.node_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "search.node_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the substitution cap.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.search.max_depth = max_depth;
        self
    }

    /// Sets the node budget; `None` removes it.
    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.search.node_limit = node_limit;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit_ms(mut self, millis: u64) -> Self {
        self.search.time_limit_ms = Some(millis);
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.search.thread_count = thread_count;
        self
    }

    pub fn with_red_fives(mut self, red_fives: bool) -> Self {
        self.rules.red_fives = red_fives;
        self
    }

    /// Returns the search time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.search.time_limit()
    }
}

/// Deck rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RulesConfig {
    /// One red five per suit replaces a plain five.
    #[serde(default = "default_true")]
    pub red_fives: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { red_fives: true }
    }
}

/// Search limits and parallelism.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum substitutions explored.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum hands visited per search.
    #[serde(default = "default_node_limit")]
    pub node_limit: Option<u64>,

    /// Wall-clock limit per search in milliseconds.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,

    /// Threads for frontier expansion.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Frontier size at which expansion fans out across threads.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            node_limit: default_node_limit(),
            time_limit_ms: None,
            thread_count: ThreadCount::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl SearchConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Frontier expansion thread count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Expand on the calling thread.
    #[default]
    None,

    /// Use the global rayon pool.
    Auto,

    /// Dedicated pool of this many threads.
    Count(usize),
}

/// Scoring context for oracle-qualified targets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    #[serde(default)]
    pub seat_wind: Wind,

    #[serde(default)]
    pub round_wind: Wind,

    /// Score as tsumo rather than ron.
    #[serde(default)]
    pub self_drawn: bool,

    /// Minimum han for a qualifying win.
    #[serde(default = "default_min_han")]
    pub min_han: u32,

    /// Reject wins without a yaku.
    #[serde(default = "default_true")]
    pub require_yaku: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            seat_wind: Wind::East,
            round_wind: Wind::East,
            self_drawn: false,
            min_han: default_min_han(),
            require_yaku: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> u32 {
    8
}

fn default_node_limit() -> Option<u64> {
    Some(2_000_000)
}

fn default_parallel_threshold() -> usize {
    256
}

fn default_min_han() -> u32 {
    1
}
