//! Hands as immutable tile multisets.
//!
//! A `Hand` keeps the caller's tile order for display, but equality, hashing
//! and ordering look only at the count vector, so two hands holding the same
//! tiles are the same search-graph node.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Index};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{HandDistanceError, Result};
use crate::notation::parse_tiles;
use crate::tile::{Suit, Tile, TileSet, COPIES_PER_TYPE, NUM_TILE_CODES, NUM_TILE_TYPES};

/// Per-code tile counts, indexed by `Tile::code()`.
pub type TileCounts = [u8; NUM_TILE_CODES];

/// Sizes accepted by `Hand::from_tiles`: waiting (13) or complete (14).
pub const HAND_SIZES: [usize; 2] = [13, 14];

/// Largest closed hand.
pub const MAX_HAND_SIZE: usize = 14;

const FIVE_CODES: [(usize, usize); 3] = [(4, 34), (13, 35), (22, 36)];

/// Checks the per-code caps and the shared plain/red five cap.
fn check_caps(counts: &TileCounts) -> Result<()> {
    for tile in TileSet::all_codes() {
        let count = counts[tile.index()];
        if count > tile.cap() {
            return Err(HandDistanceError::SupplyExceeded {
                tile,
                count,
                cap: tile.cap(),
            });
        }
    }
    for (plain, red) in FIVE_CODES {
        check_five_group(counts, plain, red)?;
    }
    Ok(())
}

fn check_five_group(counts: &TileCounts, plain: usize, red: usize) -> Result<()> {
    let combined = counts[plain] + counts[red];
    if combined > COPIES_PER_TYPE {
        return Err(HandDistanceError::SupplyExceeded {
            tile: TileSet::decode(plain as u32)?,
            count: combined,
            cap: COPIES_PER_TYPE,
        });
    }
    Ok(())
}

/// Checks only the caps a single added tile can break.
fn check_tile_cap(counts: &TileCounts, tile: Tile) -> Result<()> {
    let count = counts[tile.index()];
    if count > tile.cap() {
        return Err(HandDistanceError::SupplyExceeded {
            tile,
            count,
            cap: tile.cap(),
        });
    }
    match tile.five_group() {
        Some(group) => {
            let (plain, red) = FIVE_CODES[group];
            check_five_group(counts, plain, red)
        }
        None => Ok(()),
    }
}

fn size_error(expected: impl Into<String>, actual: usize) -> HandDistanceError {
    HandDistanceError::InvalidHandSize {
        expected: expected.into(),
        actual,
    }
}

/// An immutable multiset of tiles.
///
/// # Example
///
/// ```
/// use mahjong_distance_core::Hand;
///
/// let hand: Hand = "123m456p789s1122z".parse().unwrap();
/// assert_eq!(hand.len(), 13);
/// assert_eq!(hand.to_string(), "123m456p789s1122z");
///
/// let shuffled: Hand = "2z 1z 2z 1z 987s 654p 321m".parse().unwrap();
/// assert_eq!(hand, shuffled);
/// ```
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Tile>", into = "Vec<Tile>")
)]
pub struct Hand {
    counts: TileCounts,
    tiles: SmallVec<[Tile; MAX_HAND_SIZE]>,
}

impl Hand {
    /// Builds a 13- or 14-tile hand.
    ///
    /// # Errors
    ///
    /// `InvalidHandSize` for any other length, `SupplyExceeded` when a tile
    /// appears more often than the deck holds.
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self> {
        if !HAND_SIZES.contains(&tiles.len()) {
            return Err(size_error("13 or 14", tiles.len()));
        }
        Self::build(tiles)
    }

    /// Builds a hand of exactly `size` tiles (1 to 14).
    pub fn from_tiles_sized(tiles: &[Tile], size: usize) -> Result<Self> {
        if size == 0 || size > MAX_HAND_SIZE {
            return Err(size_error(format!("1..={MAX_HAND_SIZE}"), size));
        }
        if tiles.len() != size {
            return Err(size_error(size.to_string(), tiles.len()));
        }
        Self::build(tiles)
    }

    /// Builds a hand from integer tile codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self> {
        let tiles = codes
            .iter()
            .map(|&c| TileSet::decode(c as u32))
            .collect::<Result<Vec<_>>>()?;
        Self::from_tiles(&tiles)
    }

    /// Builds a 13- or 14-tile hand from a count vector.
    pub fn from_counts(counts: TileCounts) -> Result<Self> {
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if !HAND_SIZES.contains(&total) {
            return Err(size_error("13 or 14", total));
        }
        check_caps(&counts)?;
        let tiles = TileSet::all_codes()
            .flat_map(|t| std::iter::repeat(t).take(counts[t.index()] as usize))
            .collect::<Vec<_>>();
        Ok(Self::sorted(counts, tiles))
    }

    fn build(tiles: &[Tile]) -> Result<Self> {
        let mut counts = [0u8; NUM_TILE_CODES];
        for &tile in tiles {
            counts[tile.index()] = counts[tile.index()].saturating_add(1);
        }
        check_caps(&counts)?;
        Ok(Self {
            counts,
            tiles: SmallVec::from_slice(tiles),
        })
    }

    fn sorted(counts: TileCounts, mut tiles: Vec<Tile>) -> Self {
        tiles.sort_by_key(|t| t.sort_key());
        Self {
            counts,
            tiles: SmallVec::from_vec(tiles),
        }
    }

    /// Draws `drawn` and discards one `discarded`, returning the new hand.
    ///
    /// The drawn tile goes to the end of the display order.
    ///
    /// # Errors
    ///
    /// `TileNotInHand` if `discarded` is absent, `SupplyExceeded` if the draw
    /// breaks a cap.
    pub fn substitute(&self, drawn: Tile, discarded: Tile) -> Result<Self> {
        if self.count(discarded) == 0 {
            return Err(HandDistanceError::TileNotInHand(discarded));
        }
        let mut counts = self.counts;
        counts[discarded.index()] -= 1;
        counts[drawn.index()] += 1;
        check_tile_cap(&counts, drawn)?;

        let mut tiles = self.tiles.clone();
        if let Some(pos) = tiles.iter().position(|&t| t == discarded) {
            tiles.remove(pos);
        }
        tiles.push(drawn);
        Ok(Self { counts, tiles })
    }

    /// Copies of `tile` held (exact code; red and plain fives are distinct).
    #[inline]
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts[tile.index()]
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }

    /// The canonical comparable form.
    #[inline]
    pub fn counts(&self) -> &TileCounts {
        &self.counts
    }

    pub fn to_count_vector(&self) -> TileCounts {
        self.counts
    }

    /// Counts over the 34 plain types, red fives folded into their five.
    pub fn plain_counts(&self) -> [u8; NUM_TILE_TYPES] {
        let mut plain = [0u8; NUM_TILE_TYPES];
        for tile in TileSet::all_codes() {
            plain[tile.base().index()] += self.counts[tile.index()];
        }
        plain
    }

    /// Tiles in display order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn to_tiles(&self) -> Vec<Tile> {
        self.tiles.to_vec()
    }

    /// The most recently added tile; scoring treats it as the winning tile.
    pub fn last_tile(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// What `other` holds that `self` lacks (`added`) and vice versa.
    ///
    /// ```
    /// use mahjong_distance_core::Hand;
    ///
    /// let a: Hand = "123m456p789s1122z".parse().unwrap();
    /// let b: Hand = "123m456p789s1123z".parse().unwrap();
    /// let delta = a.difference(&b);
    /// assert!(delta.is_adjacent());
    /// assert_eq!(delta.added_tiles()[0].to_string(), "3z");
    /// assert_eq!(delta.removed_tiles()[0].to_string(), "2z");
    /// ```
    pub fn difference(&self, other: &Hand) -> TileDelta {
        let mut added = [0u8; NUM_TILE_CODES];
        let mut removed = [0u8; NUM_TILE_CODES];
        for code in 0..NUM_TILE_CODES {
            let (a, b) = (self.counts[code], other.counts[code]);
            if b > a {
                added[code] = b - a;
            } else {
                removed[code] = a - b;
            }
        }
        TileDelta { added, removed }
    }

    /// Coarse tile-overlap distance; a lower bound on substitutions.
    pub fn overlap_distance(&self, other: &Hand) -> u32 {
        self.difference(other).distance()
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.counts.hash(state);
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.counts.cmp(&other.counts)
    }
}

impl fmt::Display for Hand {
    /// Compact notation, sorted: `123m0p55s11z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tiles = self.tiles.to_vec();
        tiles.sort_by_key(|t| t.sort_key());
        for suit in [Suit::Man, Suit::Pin, Suit::Sou, Suit::Honor] {
            let mut any = false;
            for tile in tiles.iter().filter(|t| t.suit() == suit) {
                let symbol = tile.to_string();
                f.write_str(&symbol[..1])?;
                any = true;
            }
            if any {
                write!(f, "{}", suit.letter())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({self})")
    }
}

impl FromStr for Hand {
    type Err = HandDistanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tiles(&parse_tiles(s)?)
    }
}

impl TryFrom<Vec<Tile>> for Hand {
    type Error = HandDistanceError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self> {
        Self::from_tiles(&tiles)
    }
}

impl From<Hand> for Vec<Tile> {
    fn from(hand: Hand) -> Self {
        hand.tiles.into_vec()
    }
}

impl Add for Hand {
    type Output = Hands;

    fn add(self, other: Hand) -> Hands {
        Hands(vec![self, other])
    }
}

/// Count difference between two hands.
///
/// Produced by `Hand::difference`; `added` holds what the second hand has in
/// excess, `removed` what the first hand has in excess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDelta {
    added: TileCounts,
    removed: TileCounts,
}

impl TileDelta {
    pub fn added(&self) -> &TileCounts {
        &self.added
    }

    pub fn removed(&self) -> &TileCounts {
        &self.removed
    }

    pub fn added_count(&self) -> u32 {
        self.added.iter().map(|&c| c as u32).sum()
    }

    pub fn removed_count(&self) -> u32 {
        self.removed.iter().map(|&c| c as u32).sum()
    }

    pub fn added_tiles(&self) -> Vec<Tile> {
        expand(&self.added)
    }

    pub fn removed_tiles(&self) -> Vec<Tile> {
        expand(&self.removed)
    }

    pub fn is_identical(&self) -> bool {
        self.added_count() == 0 && self.removed_count() == 0
    }

    /// Exactly one tile drawn and one discarded.
    pub fn is_adjacent(&self) -> bool {
        self.added_count() == 1 && self.removed_count() == 1
    }

    /// Substitutions needed ignoring supply: the larger side of the delta.
    pub fn distance(&self) -> u32 {
        self.added_count().max(self.removed_count())
    }
}

fn expand(counts: &TileCounts) -> Vec<Tile> {
    TileSet::all_codes()
        .flat_map(|t| std::iter::repeat(t).take(counts[t.index()] as usize))
        .collect()
}

/// An ordered sequence of hands, used as multiple search sources or targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Hands(Vec<Hand>);

impl Hands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hand: Hand) {
        self.0.push(hand);
    }

    /// Joins several collections, keeping order.
    pub fn concat(parts: impl IntoIterator<Item = Hands>) -> Self {
        Self(parts.into_iter().flat_map(|h| h.0).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hand> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Hand] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Hand> {
        self.0
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.0.contains(hand)
    }

    /// Coarse overlap distance from `other` to every hand, in order.
    pub fn coarse_distances(&self, other: &Hand) -> Vec<u32> {
        self.0.iter().map(|h| other.overlap_distance(h)).collect()
    }
}

impl From<Vec<Hand>> for Hands {
    fn from(hands: Vec<Hand>) -> Self {
        Self(hands)
    }
}

impl FromIterator<Hand> for Hands {
    fn from_iter<I: IntoIterator<Item = Hand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Hand> for Hands {
    fn extend<I: IntoIterator<Item = Hand>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Hands {
    type Item = Hand;
    type IntoIter = std::vec::IntoIter<Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Hands {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for Hands {
    type Output = Hand;

    fn index(&self, index: usize) -> &Hand {
        &self.0[index]
    }
}

impl Add<Hand> for Hands {
    type Output = Hands;

    fn add(mut self, hand: Hand) -> Hands {
        self.0.push(hand);
        self
    }
}

impl fmt::Display for Hands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, hand) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{hand}")?;
        }
        f.write_str("]")
    }
}
