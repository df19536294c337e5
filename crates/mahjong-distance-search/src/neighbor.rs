//! Hands one substitution away.
//!
//! A substitution discards one tile the hand holds and draws one tile the
//! supply still has. Redrawing the discarded code is a no-op and is never
//! generated. Distinct `(discarded, drawn)` pairs always give distinct hands,
//! but results are still collected as a set of nodes, not a list of moves.

use std::collections::HashSet;
use std::fmt;

use mahjong_distance_core::{Hand, Tile, TileCounts, TileSet, TileSupply};
use tracing::trace;

/// One draw paired with one discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substitution {
    pub drawn: Tile,
    pub discarded: Tile,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.drawn, self.discarded)
    }
}

/// Opt-in restriction on which neighbors a search may step to.
///
/// Any `Fn(&Hand) -> bool + Send + Sync` closure is a filter.
pub trait NeighborFilter: Send + Sync {
    fn admit(&self, hand: &Hand) -> bool;
}

/// Admits every neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl NeighborFilter for NoFilter {
    #[inline]
    fn admit(&self, _hand: &Hand) -> bool {
        true
    }
}

impl<F> NeighborFilter for F
where
    F: Fn(&Hand) -> bool + Send + Sync,
{
    fn admit(&self, hand: &Hand) -> bool {
        self(hand)
    }
}

/// Insertion-ordered set of hands.
#[derive(Clone, Default)]
pub struct NeighborSet {
    hands: Vec<Hand>,
    seen: HashSet<TileCounts>,
}

impl NeighborSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hand` unless an equal hand is present; returns whether it was added.
    pub fn insert(&mut self, hand: Hand) -> bool {
        if !self.seen.insert(*hand.counts()) {
            return false;
        }
        self.hands.push(hand);
        true
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.seen.contains(hand.counts())
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.hands.iter()
    }

    pub fn as_slice(&self) -> &[Hand] {
        &self.hands
    }

    pub fn into_vec(self) -> Vec<Hand> {
        self.hands
    }
}

impl fmt::Debug for NeighborSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hands.iter()).finish()
    }
}

impl IntoIterator for NeighborSet {
    type Item = Hand;
    type IntoIter = std::vec::IntoIter<Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.into_iter()
    }
}

impl<'a> IntoIterator for &'a NeighborSet {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

impl FromIterator<Hand> for NeighborSet {
    fn from_iter<I: IntoIterator<Item = Hand>>(iter: I) -> Self {
        let mut set = Self::new();
        for hand in iter {
            set.insert(hand);
        }
        set
    }
}

/// Enumerates the hands one substitution away.
///
/// Order is discard code ascending, then draw code ascending.
///
/// # Example
///
/// ```
/// use mahjong_distance_core::{Hand, TileSupply};
/// use mahjong_distance_search::NeighborGenerator;
///
/// let hand: Hand = "123m456p789s2355s".parse().unwrap();
/// let supply = TileSupply::for_hand(&hand, false).unwrap();
///
/// let neighbors = NeighborGenerator::new().neighbors(&hand, &supply);
/// assert!(!neighbors.contains(&hand));
/// assert!(neighbors.iter().all(|n| hand.difference(n).is_adjacent()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NeighborGenerator<F = NoFilter> {
    filter: F,
}

impl NeighborGenerator<NoFilter> {
    pub fn new() -> Self {
        Self { filter: NoFilter }
    }
}

impl<F: NeighborFilter> NeighborGenerator<F> {
    /// Restricts generated neighbors to those `filter` admits.
    pub fn with_filter<G: NeighborFilter>(self, filter: G) -> NeighborGenerator<G> {
        NeighborGenerator { filter }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Legal substitutions with the hands they lead to, filter not applied.
    pub fn successors<'a>(
        &'a self,
        hand: &'a Hand,
        supply: &'a TileSupply,
    ) -> impl Iterator<Item = (Substitution, Hand)> + 'a {
        TileSet::all_codes()
            .filter(move |&discarded| hand.contains(discarded))
            .flat_map(move |discarded| {
                supply
                    .available()
                    .filter(move |&drawn| drawn != discarded)
                    .filter_map(move |drawn| {
                        hand.substitute(drawn, discarded)
                            .ok()
                            .map(|next| (Substitution { drawn, discarded }, next))
                    })
            })
    }

    /// Legal `(drawn, discarded)` pairs, filter not applied.
    pub fn substitutions<'a>(
        &'a self,
        hand: &'a Hand,
        supply: &'a TileSupply,
    ) -> impl Iterator<Item = Substitution> + 'a {
        self.successors(hand, supply).map(|(sub, _)| sub)
    }

    /// The deduplicated hands one substitution away that the filter admits.
    pub fn neighbors(&self, hand: &Hand, supply: &TileSupply) -> NeighborSet {
        let set: NeighborSet = self
            .successors(hand, supply)
            .map(|(_, next)| next)
            .filter(|next| self.filter.admit(next))
            .collect();
        trace!(event = "neighbors", hand = %hand, count = set.len());
        set
    }
}
