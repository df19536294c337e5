//! The scoring oracle contract and the oracles shipped with it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use mahjong_distance_core::Hand;
use tracing::trace;

use crate::context::WinContext;
use crate::evaluation::{Evaluation, ScoreBreakdown};
use crate::shape;

/// Evaluates a hand under a win context.
///
/// Implementations must be deterministic and side-effect free for a given
/// `(hand, context)`: the search may call them from several threads, in any
/// order, and may cache their answers.
pub trait ScoringOracle: Send + Sync {
    fn evaluate(&self, hand: &Hand, context: &WinContext) -> Evaluation;
}

impl<F> ScoringOracle for F
where
    F: Fn(&Hand, &WinContext) -> Evaluation + Send + Sync,
{
    fn evaluate(&self, hand: &Hand, context: &WinContext) -> Evaluation {
        self(hand, context)
    }
}

/// Recognizes winning shapes without detecting yaku.
///
/// Wins carry the shape only: no yaku, zero han, zero fu.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeOracle;

impl ScoringOracle for ShapeOracle {
    fn evaluate(&self, hand: &Hand, _context: &WinContext) -> Evaluation {
        match shape::win_shape(&hand.plain_counts()) {
            Some(win) => Evaluation::Win(ScoreBreakdown::new().with_shape(win)),
            None => Evaluation::NotAWin,
        }
    }
}

/// Memoizes another oracle by `(hand, context)`.
///
/// Holds at most `max_entries` results; when full, the cache is cleared
/// before the next insert.
pub struct CachedOracle<O> {
    inner: O,
    cache: Mutex<HashMap<(Hand, WinContext), Evaluation>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<O: ScoringOracle> CachedOracle<O> {
    pub const DEFAULT_MAX_ENTRIES: usize = 100_000;

    pub fn new(inner: O) -> Self {
        Self::with_max_entries(inner, Self::DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(inner: O, max_entries: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl<O: ScoringOracle> ScoringOracle for CachedOracle<O> {
    fn evaluate(&self, hand: &Hand, context: &WinContext) -> Evaluation {
        // Hands compare by counts, so the key carries the resolved winning tile.
        let resolved = match context.winning_tile_for(hand) {
            Some(tile) => context.clone().with_winning_tile(tile),
            None => context.clone(),
        };
        let key = (hand.clone(), resolved);
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return hit.clone();
            }
        }

        // Evaluate outside the lock; a racing thread may compute the same key.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.inner.evaluate(hand, context);

        if let Ok(mut cache) = self.cache.lock() {
            if cache.len() >= self.max_entries {
                trace!(event = "oracle_cache_clear", entries = cache.len());
                cache.clear();
            }
            cache.insert(key, result.clone());
        }
        result
    }
}
