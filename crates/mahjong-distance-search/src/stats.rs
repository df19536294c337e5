//! Search statistics.

use std::time::{Duration, Instant};

/// Counters for one search, summed over widening passes.
///
/// # Example
///
/// ```
/// use mahjong_distance_search::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_expansion(3);
/// stats.record_duplicate();
/// stats.record_pruned();
///
/// assert_eq!(stats.nodes_expanded, 1);
/// assert_eq!(stats.neighbors_generated, 3);
/// assert_eq!(stats.duplicates, 1);
/// assert_eq!(stats.pruned, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    finished: Option<Duration>,
    /// Bounded passes run (1 without iterative widening).
    pub passes: u32,
    /// Layers expanded across all passes.
    pub layers: u32,
    /// Hands whose neighbors were generated.
    pub nodes_expanded: u64,
    /// Neighbors produced, duplicates included.
    pub neighbors_generated: u64,
    /// Neighbors already seen.
    pub duplicates: u64,
    /// Neighbors cut by the distance bound.
    pub pruned: u64,
    /// Largest visited set of any pass.
    pub peak_visited: u64,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.finished = None;
    }

    /// Freezes `elapsed`.
    pub fn finish(&mut self) {
        self.finished = Some(self.running_time());
    }

    fn running_time(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Time from `start` to `finish`, or to now if still running.
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.running_time())
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    pub fn record_pass(&mut self) {
        self.passes += 1;
    }

    pub fn record_layer(&mut self, visited: usize) {
        self.layers += 1;
        self.peak_visited = self.peak_visited.max(visited as u64);
    }

    /// Records one expanded hand and the neighbors it produced.
    pub fn record_expansion(&mut self, neighbors: usize) {
        self.nodes_expanded += 1;
        self.neighbors_generated += neighbors as u64;
    }

    pub fn record_duplicate(&mut self) {
        self.duplicates += 1;
    }

    pub fn record_pruned(&mut self) {
        self.pruned += 1;
    }

    /// Adds another pass's counters into this one. Timing is kept.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.passes += other.passes;
        self.layers += other.layers;
        self.nodes_expanded += other.nodes_expanded;
        self.neighbors_generated += other.neighbors_generated;
        self.duplicates += other.duplicates;
        self.pruned += other.pruned;
        self.peak_visited = self.peak_visited.max(other.peak_visited);
    }

    /// Hands expanded per second.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.nodes_expanded as f64 / secs) as u64
        } else {
            0
        }
    }
}
