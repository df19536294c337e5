//! Layered breadth-first search over the hand graph.
//!
//! One `FrontierSearch` is one pass: it seeds the sources at depth 0 and
//! replaces the frontier with its unvisited neighbors one layer at a time.
//! Visited hands are keyed by `(pool, counts)`, so two sources drawing from
//! different pools never share nodes.
//!
//! A pass may carry a limit. Children whose `depth + lower_bound` exceeds it
//! are cut and remembered only through `next_limit`, which is the smallest
//! limit under which some cut child would have survived.

use std::collections::HashMap;
use std::time::Instant;

use mahjong_distance_core::{Hand, Result, TileCounts, TilePool, TileSupply, UnreachableReason};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

use crate::limits::SearchLimits;
use crate::neighbor::{NeighborFilter, NeighborGenerator};
use crate::outcome::FoundPath;
use crate::stats::SearchStats;
use crate::target::TargetPredicate;

/// Children merged between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 4096;

/// Lifecycle of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Created, no sources seeded.
    Initialized,
    /// Frontier open, target not yet seen.
    Expanding,
    /// A target was reached.
    Found,
    /// The pass ended without a target; see `unreachable_reason`.
    Exhausted,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchPhase::Found | SearchPhase::Exhausted)
    }
}

/// Where neighbor generation runs.
#[derive(Debug, Clone, Copy, Default)]
pub enum Parallelism<'p> {
    #[default]
    Sequential,
    /// The global rayon pool, for frontiers of at least `threshold` hands.
    Global { threshold: usize },
    /// A dedicated pool, for frontiers of at least `threshold` hands.
    Pool {
        pool: &'p ThreadPool,
        threshold: usize,
    },
}

/// A visited hand.
#[derive(Debug, Clone)]
pub struct SearchNode {
    hand: Hand,
    pool: usize,
    parent: Option<usize>,
    depth: u32,
    source: usize,
}

impl SearchNode {
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Parent node index; `None` for sources.
    #[inline]
    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Index of the source this node descends from.
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }
}

enum Candidate {
    Open { hand: Hand, is_target: bool },
    Cut { reach: u32 },
}

/// Children of one frontier node, in generation order.
struct Expansion {
    parent: usize,
    generated: usize,
    duplicates: usize,
    candidates: Vec<Candidate>,
}

/// One breadth-first pass.
///
/// # Example
///
/// ```
/// use mahjong_distance_core::{Hand, TileSupply};
/// use mahjong_distance_search::{ExactHand, FrontierSearch, NeighborGenerator, SearchLimits, SearchPhase};
///
/// let from: Hand = "123m456p789s2355s".parse().unwrap();
/// let to: Hand = "123m456p789s2345s".parse().unwrap();
/// let supply = TileSupply::for_hand(&from, false).unwrap();
///
/// let generator = NeighborGenerator::new();
/// let target = ExactHand(to);
/// let mut search = FrontierSearch::new(&generator, &target, SearchLimits::new(4));
/// search.seed(&[from], &supply);
///
/// assert_eq!(search.expand_layer(), SearchPhase::Found);
/// assert_eq!(search.depth(), 1);
/// ```
pub struct FrontierSearch<'a, F, T: ?Sized> {
    generator: &'a NeighborGenerator<F>,
    target: &'a T,
    limits: SearchLimits,
    pass_limit: u32,
    bounded: bool,
    parallelism: Parallelism<'a>,
    started: Instant,
    deadline: Option<Instant>,
    nodes: Vec<SearchNode>,
    index: HashMap<(usize, TileCounts), usize>,
    pools: Vec<TilePool>,
    frontier: Vec<usize>,
    depth: u32,
    phase: SearchPhase,
    found: Option<usize>,
    stop: Option<UnreachableReason>,
    next_limit: Option<u32>,
    stats: SearchStats,
}

impl<'a, F, T> FrontierSearch<'a, F, T>
where
    F: NeighborFilter,
    T: TargetPredicate + ?Sized,
{
    /// Unbounded pass up to `limits.max_depth`.
    pub fn new(generator: &'a NeighborGenerator<F>, target: &'a T, limits: SearchLimits) -> Self {
        let started = Instant::now();
        let mut stats = SearchStats::default();
        stats.start();
        stats.record_pass();
        Self {
            generator,
            target,
            limits,
            pass_limit: limits.max_depth,
            bounded: false,
            parallelism: Parallelism::Sequential,
            started,
            deadline: limits.deadline(started),
            nodes: Vec::new(),
            index: HashMap::new(),
            pools: Vec::new(),
            frontier: Vec::new(),
            depth: 0,
            phase: SearchPhase::Initialized,
            found: None,
            stop: None,
            next_limit: None,
            stats,
        }
    }

    /// Cuts children the target's lower bound places beyond `limit`.
    pub fn with_pass_limit(mut self, limit: u32) -> Self {
        self.pass_limit = limit.min(self.limits.max_depth);
        self.bounded = true;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism<'a>) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Shares a query-wide clock across passes.
    pub fn with_clock(mut self, started: Instant, deadline: Option<Instant>) -> Self {
        self.started = started;
        self.deadline = deadline;
        self
    }

    /// Places the sources at depth 0, each walking its own pool of
    /// `source + supply`. Repeated sources are kept once.
    pub fn seed(&mut self, sources: &[Hand], supply: &TileSupply) {
        self.phase = SearchPhase::Expanding;
        for (source, hand) in sources.iter().enumerate() {
            let pool = self.pool_id(TilePool::new(hand, supply));
            let key = (pool, *hand.counts());
            if self.index.contains_key(&key) {
                self.stats.record_duplicate();
                continue;
            }
            let idx = self.push_node(key, hand.clone(), pool, None, 0, source);
            if self.found.is_none() && self.target.is_target(hand) {
                self.found = Some(idx);
                self.phase = SearchPhase::Found;
            }
            match self.cut(0, hand) {
                Some(reach) => {
                    self.stats.record_pruned();
                    self.note_cut(reach);
                }
                None => self.frontier.push(idx),
            }
        }
        self.stats.record_layer(self.nodes.len());
    }

    fn pool_id(&mut self, pool: TilePool) -> usize {
        if let Some(id) = self.pools.iter().position(|p| *p == pool) {
            return id;
        }
        self.pools.push(pool);
        self.pools.len() - 1
    }

    fn push_node(
        &mut self,
        key: (usize, TileCounts),
        hand: Hand,
        pool: usize,
        parent: Option<usize>,
        depth: u32,
        source: usize,
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(SearchNode {
            hand,
            pool,
            parent,
            depth,
            source,
        });
        self.index.insert(key, idx);
        idx
    }

    /// The reach of a hand at `depth` if the pass limit cuts it.
    fn cut(&self, depth: u32, hand: &Hand) -> Option<u32> {
        if !self.bounded {
            return None;
        }
        let reach = depth.saturating_add(self.target.lower_bound(hand)?);
        (reach > self.pass_limit).then_some(reach)
    }

    fn note_cut(&mut self, reach: u32) {
        self.next_limit = Some(self.next_limit.map_or(reach, |n| n.min(reach)));
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn halt(&mut self, reason: UnreachableReason) -> SearchPhase {
        self.stop = Some(reason);
        self.phase = SearchPhase::Exhausted;
        self.phase
    }

    /// Expands the frontier by one layer and returns the new phase.
    pub fn expand_layer(&mut self) -> SearchPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        if self.frontier.is_empty() {
            self.phase = SearchPhase::Exhausted;
            return self.phase;
        }
        if self.depth >= self.pass_limit {
            self.note_cut(self.depth + 1);
            self.phase = SearchPhase::Exhausted;
            return self.phase;
        }
        if self.deadline_passed() {
            let elapsed = self.started.elapsed();
            return self.halt(UnreachableReason::Deadline { elapsed });
        }

        let expansions = self.generate();
        let mut next = Vec::new();
        let mut merged = 0usize;

        for expansion in expansions {
            self.stats.record_expansion(expansion.generated);
            self.stats.duplicates += expansion.duplicates as u64;
            let (pool, source) = {
                let parent = &self.nodes[expansion.parent];
                (parent.pool, parent.source)
            };

            for candidate in expansion.candidates {
                merged += 1;
                if merged % DEADLINE_CHECK_INTERVAL == 0 && self.deadline_passed() {
                    let elapsed = self.started.elapsed();
                    return self.halt(UnreachableReason::Deadline { elapsed });
                }
                match candidate {
                    Candidate::Cut { reach } => {
                        self.stats.record_pruned();
                        self.note_cut(reach);
                    }
                    Candidate::Open { hand, is_target } => {
                        let key = (pool, *hand.counts());
                        if self.index.contains_key(&key) {
                            self.stats.record_duplicate();
                            continue;
                        }
                        if let Some(limit) = self.limits.node_limit {
                            if self.nodes.len() as u64 >= limit {
                                return self.halt(UnreachableReason::NodeLimit { limit });
                            }
                        }
                        let idx = self.push_node(
                            key,
                            hand,
                            pool,
                            Some(expansion.parent),
                            self.depth + 1,
                            source,
                        );
                        if is_target {
                            self.found = Some(idx);
                            self.phase = SearchPhase::Found;
                            self.finish_layer(next);
                            return self.phase;
                        }
                        next.push(idx);
                    }
                }
            }
        }

        self.finish_layer(next);
        self.phase
    }

    fn finish_layer(&mut self, next: Vec<usize>) {
        self.frontier = next;
        self.depth += 1;
        self.stats.record_layer(self.nodes.len());
        debug!(
            event = "layer_expanded",
            depth = self.depth,
            frontier = self.frontier.len(),
            visited = self.nodes.len(),
            pruned = self.stats.pruned,
        );
    }

    fn generate(&self) -> Vec<Expansion> {
        let expand = |&idx: &usize| self.expand_node(idx);
        match self.parallelism {
            Parallelism::Global { threshold } if self.frontier.len() >= threshold => {
                self.frontier.par_iter().map(expand).collect()
            }
            Parallelism::Pool { pool, threshold } if self.frontier.len() >= threshold => {
                pool.install(|| self.frontier.par_iter().map(expand).collect())
            }
            _ => self.frontier.iter().map(expand).collect(),
        }
    }

    fn expand_node(&self, idx: usize) -> Expansion {
        let node = &self.nodes[idx];
        let depth = node.depth + 1;
        let mut expansion = Expansion {
            parent: idx,
            generated: 0,
            duplicates: 0,
            candidates: Vec::new(),
        };
        let Some(supply) = self.pools[node.pool].supply_for(&node.hand) else {
            return expansion;
        };

        let neighbors = self.generator.neighbors(&node.hand, &supply);
        expansion.generated = neighbors.len();
        for hand in neighbors {
            if self.index.contains_key(&(node.pool, *hand.counts())) {
                expansion.duplicates += 1;
                continue;
            }
            let candidate = match self.cut(depth, &hand) {
                Some(reach) => Candidate::Cut { reach },
                None => {
                    let is_target = self.target.is_target(&hand);
                    Candidate::Open { hand, is_target }
                }
            };
            expansion.candidates.push(candidate);
        }
        expansion
    }

    /// Runs layers until the pass ends.
    pub fn run(&mut self) -> SearchPhase {
        while !self.expand_layer().is_terminal() {}
        self.stats.finish();
        self.phase
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Layers expanded so far.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn pass_limit(&self) -> u32 {
        self.pass_limit
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Hands on the current frontier, in discovery order.
    pub fn frontier_hands(&self) -> impl Iterator<Item = &Hand> + '_ {
        self.frontier.iter().map(|&i| &self.nodes[i].hand)
    }

    pub fn visited_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: usize) -> Option<&SearchNode> {
        self.nodes.get(idx)
    }

    /// Index of the target node, once found.
    pub fn found_index(&self) -> Option<usize> {
        self.found
    }

    /// Smallest pass limit under which a cut child would have been kept.
    pub fn next_limit(&self) -> Option<u32> {
        self.next_limit
    }

    /// Hands from the node's source to the node.
    pub fn path_to(&self, idx: usize) -> Vec<Hand> {
        let mut path = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let Some(node) = self.nodes.get(i) else {
                break;
            };
            path.push(node.hand.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    /// The path to the target, once found.
    pub fn found_path(&self) -> Result<Option<FoundPath>> {
        self.found
            .map(|idx| FoundPath::from_hands(self.nodes[idx].source, self.path_to(idx)))
            .transpose()
    }

    /// Why an exhausted pass found nothing.
    ///
    /// A pass that cut a hand, or stopped at its limit with the frontier
    /// open, reports `DepthLimit` with its own limit.
    pub fn unreachable_reason(&self) -> Option<UnreachableReason> {
        if self.phase != SearchPhase::Exhausted {
            return None;
        }
        if let Some(reason) = self.stop {
            return Some(reason);
        }
        // A cut of reach u32::MAX came from a hand no target is reachable from.
        Some(match self.next_limit {
            Some(reach) if reach != u32::MAX => UnreachableReason::DepthLimit {
                max_depth: self.pass_limit,
            },
            _ => UnreachableReason::Exhausted,
        })
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_stats(self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests;
