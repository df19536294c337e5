//! Remaining-tile accounting.
//!
//! `TileSupply` counts the tiles still in the wall. `TilePool` is the fixed
//! sum of a hand and its wall: a substitution moves one tile from the wall
//! into the hand and the discard back, so every hand on a search path draws
//! from the same pool.

use std::fmt;

use crate::error::{HandDistanceError, Result};
use crate::hand::{Hand, TileCounts};
use crate::tile::{Tile, TileSet, COPIES_PER_TYPE, NUM_TILE_CODES, NUM_TILE_TYPES};

/// Tiles in a full deck.
pub const DECK_SIZE: usize = NUM_TILE_TYPES * COPIES_PER_TYPE as usize;

/// Remaining count per tile code.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TileSupply {
    remaining: TileCounts,
    red_fives: bool,
}

impl TileSupply {
    /// The full 136-tile deck.
    ///
    /// With `red_fives`, each suit holds three plain fives and one red five.
    pub fn full(red_fives: bool) -> Self {
        let mut remaining = [0u8; NUM_TILE_CODES];
        for tile in TileSet::all_tiles() {
            remaining[tile.index()] = COPIES_PER_TYPE;
        }
        if red_fives {
            for red in TileSet::red_fives() {
                remaining[red.base().index()] -= 1;
                remaining[red.index()] = 1;
            }
        }
        Self {
            remaining,
            red_fives,
        }
    }

    /// The full deck minus every visible tile.
    ///
    /// # Errors
    ///
    /// `SupplyExceeded` when more copies of a tile are visible than the deck
    /// holds. Red fives seen in a deck without them count as an overflow.
    pub fn from_visible(visible: &[Tile], red_fives: bool) -> Result<Self> {
        let mut supply = Self::full(red_fives);
        let mut seen = [0u8; NUM_TILE_CODES];
        for tile in visible {
            seen[tile.index()] = seen[tile.index()].saturating_add(1);
        }
        // First overflowing tile in visible order, with every copy seen.
        if let Some(&tile) = visible
            .iter()
            .find(|t| seen[t.index()] > supply.remaining[t.index()])
        {
            return Err(HandDistanceError::SupplyExceeded {
                tile,
                count: seen[tile.index()],
                cap: supply.remaining[tile.index()],
            });
        }
        for (left, taken) in supply.remaining.iter_mut().zip(seen) {
            *left -= taken;
        }
        Ok(supply)
    }

    /// The full deck minus the tiles of `hand`.
    pub fn for_hand(hand: &Hand, red_fives: bool) -> Result<Self> {
        Self::from_visible(hand.tiles(), red_fives)
    }

    /// Removes one copy of `tile`.
    ///
    /// # Errors
    ///
    /// `SupplyExceeded` when no copy is left. `count` is the copies taken
    /// from the deck including this one.
    pub fn withdraw(&self, tile: Tile) -> Result<Self> {
        let left = self.remaining[tile.index()];
        if left == 0 {
            let cap = self.deck_count(tile);
            return Err(HandDistanceError::SupplyExceeded {
                tile,
                count: cap.saturating_add(1),
                cap,
            });
        }
        let mut next = self.clone();
        next.remaining[tile.index()] = left - 1;
        Ok(next)
    }

    fn deck_count(&self, tile: Tile) -> u8 {
        Self::full(self.red_fives).remaining[tile.index()]
    }

    #[inline]
    pub fn remaining(&self, tile: Tile) -> u8 {
        self.remaining[tile.index()]
    }

    pub fn counts(&self) -> &TileCounts {
        &self.remaining
    }

    /// Tiles left in the wall.
    pub fn total(&self) -> usize {
        self.remaining.iter().map(|&c| c as usize).sum()
    }

    pub fn red_fives(&self) -> bool {
        self.red_fives
    }

    /// Drawable tiles in code order.
    pub fn available(&self) -> impl Iterator<Item = Tile> + '_ {
        TileSet::all_codes().filter(move |t| self.remaining[t.index()] > 0)
    }
}

impl fmt::Debug for TileSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileSupply")
            .field("total", &self.total())
            .field("red_fives", &self.red_fives)
            .finish()
    }
}

/// Hand plus wall, invariant along every substitution path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilePool {
    counts: TileCounts,
    red_fives: bool,
}

impl TilePool {
    /// The pool a search from `hand` with `supply` walks inside.
    pub fn new(hand: &Hand, supply: &TileSupply) -> Self {
        let mut counts = *supply.counts();
        for (slot, &held) in counts.iter_mut().zip(hand.counts()) {
            *slot = slot.saturating_add(held);
        }
        Self {
            counts,
            red_fives: supply.red_fives(),
        }
    }

    /// True if every tile of `hand` fits in the pool.
    pub fn admits(&self, hand: &Hand) -> bool {
        self.counts
            .iter()
            .zip(hand.counts())
            .all(|(&pool, &held)| held <= pool)
    }

    /// The wall left over when `hand` is held, or `None` if it does not fit.
    pub fn supply_for(&self, hand: &Hand) -> Option<TileSupply> {
        if !self.admits(hand) {
            return None;
        }
        let mut remaining = self.counts;
        for (slot, &held) in remaining.iter_mut().zip(hand.counts()) {
            *slot -= held;
        }
        Some(TileSupply {
            remaining,
            red_fives: self.red_fives,
        })
    }

    #[inline]
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts[tile.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}
