//! Search targets.
//!
//! A target is a predicate over hands with an optional admissible lower
//! bound: a number of substitutions no path from the hand to a target can
//! beat. Bounds let the engine prune and widen instead of running a plain
//! breadth-first search.

use std::collections::HashSet;

use mahjong_distance_core::{Hand, Hands, TileCounts};
use mahjong_distance_scoring::shape;
use mahjong_distance_scoring::{Qualification, ScoringOracle, WinContext};

/// What a search is looking for.
pub trait TargetPredicate: Send + Sync {
    fn is_target(&self, hand: &Hand) -> bool;

    /// Fewest substitutions from `hand` to any target, or `None` when unknown.
    ///
    /// Must never exceed the true distance. `Some(u32::MAX)` marks a hand
    /// no target is reachable from.
    fn lower_bound(&self, _hand: &Hand) -> Option<u32> {
        None
    }

    /// Short name for logs.
    fn label(&self) -> String;
}

impl<T: TargetPredicate + ?Sized> TargetPredicate for &T {
    fn is_target(&self, hand: &Hand) -> bool {
        (**self).is_target(hand)
    }

    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        (**self).lower_bound(hand)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

fn exact_bound(from: &Hand, to: &Hand) -> u32 {
    if from.len() != to.len() {
        return u32::MAX;
    }
    from.overlap_distance(to)
}

/// One specific hand.
#[derive(Debug, Clone)]
pub struct ExactHand(pub Hand);

impl TargetPredicate for ExactHand {
    fn is_target(&self, hand: &Hand) -> bool {
        *hand == self.0
    }

    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        Some(exact_bound(hand, &self.0))
    }

    fn label(&self) -> String {
        format!("hand {}", self.0)
    }
}

/// Any hand of a set.
#[derive(Debug, Clone)]
pub struct AnyHand {
    hands: Hands,
    members: HashSet<TileCounts>,
}

impl AnyHand {
    pub fn new(hands: impl IntoIterator<Item = Hand>) -> Self {
        let hands: Hands = hands.into_iter().collect();
        let members = hands.iter().map(|h| *h.counts()).collect();
        Self { hands, members }
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }
}

impl TargetPredicate for AnyHand {
    fn is_target(&self, hand: &Hand) -> bool {
        self.members.contains(hand.counts())
    }

    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        Some(
            self.hands
                .iter()
                .map(|target| exact_bound(hand, target))
                .min()
                .unwrap_or(u32::MAX),
        )
    }

    fn label(&self) -> String {
        format!("any of {} hands", self.hands.len())
    }
}

/// A complete `3n + 2` hand in any winning pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteShape;

impl TargetPredicate for CompleteShape {
    fn is_target(&self, hand: &Hand) -> bool {
        shape::is_complete(&hand.plain_counts())
    }

    /// Shanten plus one: each substitution lowers shanten by at most one.
    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        if hand.len() % 3 != 2 {
            return Some(u32::MAX);
        }
        Some((shape::hand_shanten(hand) + 1).max(0) as u32)
    }

    fn label(&self) -> String {
        "complete".to_string()
    }
}

/// A `3n + 1` hand with at least one live wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenpaiShape;

impl TargetPredicate for TenpaiShape {
    fn is_target(&self, hand: &Hand) -> bool {
        shape::is_tenpai(&hand.plain_counts())
    }

    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        if hand.len() % 3 != 1 {
            return Some(u32::MAX);
        }
        Some(shape::hand_shanten(hand).max(0) as u32)
    }

    fn label(&self) -> String {
        "tenpai".to_string()
    }
}

/// A hand the scoring oracle accepts as a qualifying win.
///
/// A `3n + 2` hand is evaluated as is, its last tile the winning tile unless
/// the context names one. A `3n + 1` hand qualifies when some wait completes
/// it into a qualifying win.
pub struct OracleTarget<'a, O: ?Sized> {
    oracle: &'a O,
    context: WinContext,
    rule: Qualification,
}

impl<'a, O: ScoringOracle + ?Sized> OracleTarget<'a, O> {
    pub fn new(oracle: &'a O, context: WinContext, rule: Qualification) -> Self {
        Self {
            oracle,
            context,
            rule,
        }
    }

    pub fn context(&self) -> &WinContext {
        &self.context
    }

    pub fn rule(&self) -> &Qualification {
        &self.rule
    }

    fn qualifies(&self, hand: &Hand, context: &WinContext) -> bool {
        self.oracle.evaluate(hand, context).qualifies(&self.rule)
    }

    fn any_wait_qualifies(&self, hand: &Hand) -> bool {
        let base = hand.to_tiles();
        shape::waits(&hand.plain_counts()).into_iter().any(|wait| {
            let mut tiles = base.clone();
            tiles.push(wait);
            let Ok(completed) = Hand::from_tiles_sized(&tiles, tiles.len()) else {
                return false;
            };
            let context = self.context.clone().with_winning_tile(wait);
            self.qualifies(&completed, &context)
        })
    }
}

impl<O: ScoringOracle + ?Sized> TargetPredicate for OracleTarget<'_, O> {
    fn is_target(&self, hand: &Hand) -> bool {
        match hand.len() % 3 {
            2 => self.qualifies(hand, &self.context),
            1 => self.any_wait_qualifies(hand),
            _ => false,
        }
    }

    fn label(&self) -> String {
        format!("qualifying win (min {} han)", self.rule.min_han)
    }
}

/// Both targets at once. `A` is checked first.
#[derive(Debug, Clone)]
pub struct Both<A, B>(pub A, pub B);

impl<A: TargetPredicate, B: TargetPredicate> TargetPredicate for Both<A, B> {
    fn is_target(&self, hand: &Hand) -> bool {
        self.0.is_target(hand) && self.1.is_target(hand)
    }

    fn lower_bound(&self, hand: &Hand) -> Option<u32> {
        match (self.0.lower_bound(hand), self.1.lower_bound(hand)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    fn label(&self) -> String {
        format!("{} and {}", self.0.label(), self.1.label())
    }
}

/// A plain closure as a target, with no bound.
pub struct FnTarget<F> {
    predicate: F,
    label: String,
}

impl<F> FnTarget<F>
where
    F: Fn(&Hand) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            label: "predicate".to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<F> TargetPredicate for FnTarget<F>
where
    F: Fn(&Hand) -> bool + Send + Sync,
{
    fn is_target(&self, hand: &Hand) -> bool {
        (self.predicate)(hand)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests;
