//! Distance queries.
//!
//! `DistanceEngine` owns the neighbor generator, the limits and the thread
//! pool, and turns a query into one or more `FrontierSearch` passes.
//!
//! When the target bounds every source, passes are widened from the
//! smallest source bound: each pass keeps only children whose depth plus
//! bound fits the pass limit, and the next limit is the smallest reach any
//! pass cut. The first pass that finds a target finds it at its true
//! distance. Targets without bounds get a single plain pass.

use std::time::Instant;

use mahjong_distance_config::{DistanceConfig, ThreadCount};
use mahjong_distance_core::{
    Hand, HandDistanceError, Hands, Result, TilePool, TileSupply, UnreachableReason,
};
use mahjong_distance_scoring::{Qualification, ScoringOracle, WinContext};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::frontier::{FrontierSearch, Parallelism, SearchPhase};
use crate::limits::SearchLimits;
use crate::neighbor::{NeighborFilter, NeighborGenerator, NoFilter};
use crate::outcome::{DistanceMatrix, SearchOutcome};
use crate::stats::SearchStats;
use crate::target::{
    Both, CompleteShape, ExactHand, FnTarget, OracleTarget, TargetPredicate, TenpaiShape,
};

/// Shortest-path queries over the hand graph.
///
/// # Example
///
/// ```
/// use mahjong_distance_core::Hand;
/// use mahjong_distance_search::{DistanceEngine, SearchLimits};
///
/// let engine = DistanceEngine::new().with_limits(SearchLimits::new(4));
/// let hand: Hand = "123m456p789s2557s".parse().unwrap();
/// let supply = engine.supply_for(&hand).unwrap();
///
/// let outcome = engine.distance_to_win(&hand, &supply).unwrap();
/// assert_eq!(outcome.distance(), Some(1));
/// ```
pub struct DistanceEngine<F = NoFilter> {
    generator: NeighborGenerator<F>,
    limits: SearchLimits,
    threads: ThreadCount,
    parallel_threshold: usize,
    pool: Option<ThreadPool>,
    context: WinContext,
    qualification: Qualification,
    red_fives: bool,
}

impl DistanceEngine<NoFilter> {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&DistanceConfig::default())
    }

    pub fn from_config(config: &DistanceConfig) -> Self {
        let search = &config.search;
        let scoring = &config.scoring;
        Self {
            generator: NeighborGenerator::new(),
            limits: SearchLimits::from(search),
            threads: search.thread_count,
            parallel_threshold: search.parallel_threshold,
            pool: build_pool(search.thread_count),
            context: WinContext::new()
                .with_seat_wind(scoring.seat_wind)
                .with_round_wind(scoring.round_wind)
                .with_self_drawn(scoring.self_drawn),
            qualification: Qualification {
                min_han: scoring.min_han,
                require_yaku: scoring.require_yaku,
            },
            red_fives: config.rules.red_fives,
        }
    }
}

impl Default for DistanceEngine<NoFilter> {
    fn default() -> Self {
        Self::new()
    }
}

fn build_pool(threads: ThreadCount) -> Option<ThreadPool> {
    let ThreadCount::Count(n) = threads else {
        return None;
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .inspect_err(|e| warn!(event = "thread_pool_failed", threads = n, error = %e))
        .ok()
}

impl<F: NeighborFilter> DistanceEngine<F> {
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Restricts every search to neighbors `filter` admits.
    pub fn with_filter<G: NeighborFilter>(self, filter: G) -> DistanceEngine<G> {
        DistanceEngine {
            generator: self.generator.with_filter(filter),
            limits: self.limits,
            threads: self.threads,
            parallel_threshold: self.parallel_threshold,
            pool: self.pool,
            context: self.context,
            qualification: self.qualification,
            red_fives: self.red_fives,
        }
    }

    pub fn with_thread_count(mut self, threads: ThreadCount) -> Self {
        self.pool = build_pool(threads);
        self.threads = threads;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_context(mut self, context: WinContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_qualification(mut self, qualification: Qualification) -> Self {
        self.qualification = qualification;
        self
    }

    pub fn with_red_fives(mut self, red_fives: bool) -> Self {
        self.red_fives = red_fives;
        self
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    pub fn context(&self) -> &WinContext {
        &self.context
    }

    pub fn qualification(&self) -> &Qualification {
        &self.qualification
    }

    pub fn red_fives(&self) -> bool {
        self.red_fives
    }

    pub fn generator(&self) -> &NeighborGenerator<F> {
        &self.generator
    }

    /// The full deck minus `hand`, under this engine's red-five rule.
    pub fn supply_for(&self, hand: &Hand) -> Result<TileSupply> {
        TileSupply::for_hand(hand, self.red_fives)
    }

    fn parallelism(&self) -> Parallelism<'_> {
        let threshold = self.parallel_threshold;
        match (&self.pool, self.threads) {
            (Some(pool), _) => Parallelism::Pool { pool, threshold },
            (None, ThreadCount::Auto) => Parallelism::Global { threshold },
            _ => Parallelism::Sequential,
        }
    }

    /// Runs `job` for `0..jobs`, across threads when configured.
    fn fan_out<R, J>(&self, jobs: usize, job: J) -> Vec<R>
    where
        R: Send,
        J: Fn(usize) -> R + Send + Sync,
    {
        match (&self.pool, self.threads) {
            (Some(pool), _) => pool.install(|| (0..jobs).into_par_iter().map(&job).collect()),
            (None, ThreadCount::Auto) => (0..jobs).into_par_iter().map(&job).collect(),
            _ => (0..jobs).map(job).collect(),
        }
    }

    /// Shortest path from any of `sources` to a hand `target` accepts.
    pub fn search<T>(
        &self,
        sources: &[Hand],
        target: &T,
        supply: &TileSupply,
    ) -> Result<SearchOutcome>
    where
        T: TargetPredicate + ?Sized,
    {
        self.search_with_stats(sources, target, supply)
            .map(|(outcome, _)| outcome)
    }

    /// `search`, also returning counters summed over every pass.
    pub fn search_with_stats<T>(
        &self,
        sources: &[Hand],
        target: &T,
        supply: &TileSupply,
    ) -> Result<(SearchOutcome, SearchStats)>
    where
        T: TargetPredicate + ?Sized,
    {
        self.run_search(sources, target, supply, self.parallelism())
    }

    fn run_search<T>(
        &self,
        sources: &[Hand],
        target: &T,
        supply: &TileSupply,
        parallelism: Parallelism<'_>,
    ) -> Result<(SearchOutcome, SearchStats)>
    where
        T: TargetPredicate + ?Sized,
    {
        let started = Instant::now();
        let deadline = self.limits.deadline(started);
        let max_depth = self.limits.max_depth;
        let mut stats = SearchStats::default();
        stats.start();

        info!(
            event = "search_start",
            sources = sources.len(),
            target = %target.label(),
            max_depth,
        );

        // Widen only if every source has a bound.
        let mut limit = sources
            .iter()
            .map(|hand| target.lower_bound(hand))
            .collect::<Option<Vec<u32>>>()
            .and_then(|bounds| bounds.into_iter().min());

        if let Some(first) = limit.filter(|&l| l > max_depth) {
            let reason = if first == u32::MAX {
                UnreachableReason::Exhausted
            } else {
                UnreachableReason::DepthLimit { max_depth }
            };
            return Ok(self.unreachable(reason, stats));
        }

        loop {
            let mut pass = FrontierSearch::new(&self.generator, target, self.limits)
                .with_clock(started, deadline)
                .with_parallelism(parallelism);
            if let Some(l) = limit {
                pass = pass.with_pass_limit(l);
            }
            pass.seed(sources, supply);
            let phase = pass.run();
            stats.absorb(pass.stats());

            if phase == SearchPhase::Found {
                if let Some(path) = pass.found_path()? {
                    stats.finish();
                    info!(
                        event = "search_found",
                        distance = path.distance,
                        source = path.source,
                        passes = stats.passes,
                        nodes = stats.nodes_expanded,
                        elapsed_ms = stats.elapsed_ms(),
                    );
                    return Ok((SearchOutcome::Found(path), stats));
                }
            }

            let reason = pass
                .unreachable_reason()
                .unwrap_or(UnreachableReason::Exhausted);
            let UnreachableReason::DepthLimit { .. } = reason else {
                return Ok(self.unreachable(reason, stats));
            };
            match (limit, pass.next_limit()) {
                (Some(current), Some(next)) if next <= max_depth => {
                    debug!(event = "widen", from = current, to = next);
                    limit = Some(next);
                }
                _ => {
                    let reason = UnreachableReason::DepthLimit { max_depth };
                    return Ok(self.unreachable(reason, stats));
                }
            }
        }
    }

    fn unreachable(
        &self,
        reason: UnreachableReason,
        mut stats: SearchStats,
    ) -> (SearchOutcome, SearchStats) {
        stats.finish();
        info!(
            event = "search_unreachable",
            reason = %reason,
            passes = stats.passes,
            nodes = stats.nodes_expanded,
            elapsed_ms = stats.elapsed_ms(),
        );
        (SearchOutcome::Unreachable(reason), stats)
    }

    /// `Exhausted` without a search when `to` holds tiles outside the pool
    /// of `from` and `supply`.
    fn outside_pool(&self, from: &Hand, to: &Hand, supply: &TileSupply) -> Option<SearchOutcome> {
        if TilePool::new(from, supply).admits(to) {
            return None;
        }
        let mut stats = SearchStats::default();
        stats.start();
        Some(self.unreachable(UnreachableReason::Exhausted, stats).0)
    }

    /// Substitutions from `from` to `to`.
    ///
    /// Hands of different sizes are never connected, nor is a target needing
    /// tiles that neither `from` nor `supply` holds.
    pub fn hand_distance(
        &self,
        from: &Hand,
        to: &Hand,
        supply: &TileSupply,
    ) -> Result<SearchOutcome> {
        if let Some(outcome) = self.outside_pool(from, to, supply) {
            return Ok(outcome);
        }
        self.search(std::slice::from_ref(from), &ExactHand(to.clone()), supply)
    }

    /// Every source against one shared target, in source order.
    ///
    /// Each entry is searched on its own; an unreachable pair does not
    /// affect the others.
    pub fn distances_to(
        &self,
        sources: &[Hand],
        target: &Hand,
        supply: &TileSupply,
    ) -> Result<Vec<SearchOutcome>> {
        let goal = ExactHand(target.clone());
        self.fan_out(sources.len(), |i| {
            self.pair_search(&sources[i], &goal, supply, i)
        })
        .into_iter()
        .collect()
    }

    /// Distances between every source and every target.
    pub fn distance_matrix(
        &self,
        sources: &[Hand],
        targets: &[Hand],
        supply: &TileSupply,
    ) -> Result<DistanceMatrix> {
        let (rows, cols) = (sources.len(), targets.len());
        let started = Instant::now();
        info!(event = "matrix_start", rows, cols);

        let goals: Vec<ExactHand> = targets.iter().cloned().map(ExactHand).collect();
        let entries = self
            .fan_out(rows * cols, |i| {
                let (row, col) = (i / cols, i % cols);
                self.pair_search(&sources[row], &goals[col], supply, row)
            })
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let matrix = DistanceMatrix::new(rows, cols, entries);
        info!(
            event = "matrix_end",
            rows,
            cols,
            reachable = matrix.reachable_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
        );
        Ok(matrix)
    }

    /// One source against one goal, frontier expanded on the calling thread.
    fn pair_search(
        &self,
        source: &Hand,
        goal: &ExactHand,
        supply: &TileSupply,
        source_index: usize,
    ) -> Result<SearchOutcome> {
        if let Some(outcome) = self.outside_pool(source, &goal.0, supply) {
            return Ok(outcome);
        }
        let (outcome, _) = self.run_search(
            std::slice::from_ref(source),
            goal,
            supply,
            Parallelism::Sequential,
        )?;
        Ok(match outcome {
            SearchOutcome::Found(mut path) => {
                path.source = source_index;
                SearchOutcome::Found(path)
            }
            unreachable => unreachable,
        })
    }

    /// Substitutions to a complete hand (14 tiles) or to tenpai (13 tiles).
    ///
    /// Sizes of the form `3n` are neither and come back `Exhausted`.
    pub fn distance_to_win(&self, hand: &Hand, supply: &TileSupply) -> Result<SearchOutcome> {
        let sources = std::slice::from_ref(hand);
        match hand.len() % 3 {
            2 => self.search(sources, &CompleteShape, supply),
            1 => self.search(sources, &TenpaiShape, supply),
            _ => Ok(SearchOutcome::Unreachable(UnreachableReason::Exhausted)),
        }
    }

    /// `distance_to_win`, with the target also required to satisfy the
    /// engine's qualification under `oracle`.
    ///
    /// For a 13-tile hand the target is a tenpai hand with some wait that
    /// completes it into a qualifying win.
    pub fn distance_to_qualifying_win<O>(
        &self,
        hand: &Hand,
        supply: &TileSupply,
        oracle: &O,
    ) -> Result<SearchOutcome>
    where
        O: ScoringOracle + ?Sized,
    {
        let sources = std::slice::from_ref(hand);
        let qualifying = OracleTarget::new(oracle, self.context.clone(), self.qualification);
        match hand.len() % 3 {
            2 => self.search(sources, &Both(CompleteShape, qualifying), supply),
            1 => self.search(sources, &Both(TenpaiShape, qualifying), supply),
            _ => Ok(SearchOutcome::Unreachable(UnreachableReason::Exhausted)),
        }
    }

    /// Hands grouped by exact distance from `hand`, `0..=radius`.
    ///
    /// # Errors
    ///
    /// `DistanceUnreachable` when the node limit or deadline stops the walk
    /// before `radius`.
    pub fn neighborhood(
        &self,
        hand: &Hand,
        supply: &TileSupply,
        radius: u32,
    ) -> Result<Vec<Hands>> {
        let never = FnTarget::new(|_: &Hand| false).with_label("neighborhood");
        let limits = self.limits.with_max_depth(radius);
        let mut search = FrontierSearch::new(&self.generator, &never, limits)
            .with_parallelism(self.parallelism());
        search.seed(std::slice::from_ref(hand), supply);

        let mut layers = vec![search.frontier_hands().cloned().collect::<Hands>()];
        for _ in 0..radius {
            search.expand_layer();
            if let Some(
                reason @ (UnreachableReason::NodeLimit { .. } | UnreachableReason::Deadline { .. }),
            ) = search.unreachable_reason()
            {
                return Err(HandDistanceError::DistanceUnreachable(reason));
            }
            layers.push(search.frontier_hands().cloned().collect());
        }
        debug!(
            event = "neighborhood",
            radius,
            sizes = ?layers.iter().map(Hands::len).collect::<Vec<_>>(),
        );
        Ok(layers)
    }
}

#[cfg(test)]
mod tests;
