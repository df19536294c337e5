//! Shape analysis over plain tile counts.
//!
//! Every function takes the 34-type count vector from `Hand::plain_counts`,
//! so red fives count as ordinary fives. Shanten is the number of tiles a
//! hand is away from tenpai: -1 complete, 0 tenpai, 1 one-away, and so on.
//! A substitution changes it by at most one, which is what makes it usable
//! as a search bound.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use mahjong_distance_core::{Hand, Tile, TileSet, NUM_TILE_TYPES};

/// Plain tile counts.
pub type PlainCounts = [u8; NUM_TILE_TYPES];

const HONOR_START: usize = 27;
const MAX_SETS: usize = 4;
const COPIES: u8 = 4;

const ORPHANS: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Winning pattern of a complete hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WinShape {
    /// Sets and one pair.
    Standard,
    SevenPairs,
    ThirteenOrphans,
}

fn total(counts: &PlainCounts) -> usize {
    counts.iter().map(|&c| c as usize).sum()
}

/// Sets a hand of this size is built from.
fn set_target(counts: &PlainCounts) -> usize {
    (total(counts) / 3).min(MAX_SETS)
}

/// Shanten over every winning pattern the hand size allows.
///
/// Seven pairs and thirteen orphans only apply to full 13- or 14-tile hands.
///
/// ```
/// use mahjong_distance_core::Hand;
/// use mahjong_distance_scoring::shape::shanten;
///
/// let tenpai: Hand = "123m456p789s2355s".parse().unwrap();
/// assert_eq!(shanten(&tenpai.plain_counts()), 0);
/// ```
pub fn shanten(counts: &PlainCounts) -> i8 {
    let standard = standard_shanten(counts);
    if standard <= 0 || !(13..=14).contains(&total(counts)) {
        return standard;
    }
    standard
        .min(seven_pairs_shanten(counts))
        .min(thirteen_orphans_shanten(counts))
}

/// Shanten toward sets plus a pair.
///
/// Each suit and the honors are split on their own, then the per-block best
/// splits are combined, choosing the pair from at most one block.
pub fn standard_shanten(counts: &PlainCounts) -> i8 {
    let target = set_target(counts);
    let mut combined = BlockTable::EMPTY;
    combined.offer(false, 0, 0);

    for (start, len) in BLOCKS {
        let block = block_table(&counts[start..start + len], start < HONOR_START);
        let mut next = BlockTable::EMPTY;
        for (pair_a, sets_a, partials_a) in combined.entries() {
            for (pair_b, sets_b, partials_b) in block.entries() {
                if pair_a && pair_b {
                    continue;
                }
                next.offer(pair_a || pair_b, sets_a + sets_b, partials_a + partials_b);
            }
        }
        combined = next;
    }

    combined
        .entries()
        .filter(|&(_, sets, _)| sets <= target)
        .map(|(pair, sets, partials)| {
            let useful = partials.min(target - sets);
            2 * target as i8 - 2 * sets as i8 - useful as i8 - i8::from(pair)
        })
        .min()
        .unwrap_or(i8::MAX)
}

/// Shanten toward seven distinct pairs.
pub fn seven_pairs_shanten(counts: &PlainCounts) -> i8 {
    let pairs = counts.iter().filter(|&&c| c >= 2).count() as i8;
    let kinds = counts.iter().filter(|&&c| c > 0).count() as i8;
    6 - pairs + (7 - kinds).max(0)
}

/// Shanten toward thirteen orphans.
pub fn thirteen_orphans_shanten(counts: &PlainCounts) -> i8 {
    let kinds = ORPHANS.iter().filter(|&&i| counts[i] > 0).count() as i8;
    let paired = ORPHANS.iter().any(|&i| counts[i] >= 2);
    13 - kinds - i8::from(paired)
}

/// Complete hand: `3n + 2` tiles arranged in a winning pattern.
pub fn is_complete(counts: &PlainCounts) -> bool {
    total(counts) % 3 == 2 && shanten(counts) == -1
}

/// Waiting hand: `3n + 1` tiles with at least one tile that completes it.
pub fn is_tenpai(counts: &PlainCounts) -> bool {
    total(counts) % 3 == 1 && shanten(counts) == 0 && completing_tiles(counts).next().is_some()
}

/// Plain tiles that complete a `3n + 1` hand, in code order.
///
/// A tile the hand already holds four of is not a wait.
pub fn waits(counts: &PlainCounts) -> Vec<Tile> {
    if total(counts) % 3 != 1 || shanten(counts) > 0 {
        return Vec::new();
    }
    completing_tiles(counts).collect()
}

fn completing_tiles(counts: &PlainCounts) -> impl Iterator<Item = Tile> + '_ {
    TileSet::all_tiles().filter(move |tile| {
        let code = tile.code() as usize;
        if counts[code] >= COPIES {
            return false;
        }
        let mut probe = *counts;
        probe[code] += 1;
        shanten(&probe) == -1
    })
}

/// The pattern a complete hand forms, preferring sets-and-pair.
pub fn win_shape(counts: &PlainCounts) -> Option<WinShape> {
    if total(counts) % 3 != 2 {
        return None;
    }
    if standard_shanten(counts) == -1 {
        return Some(WinShape::Standard);
    }
    if total(counts) == 14 {
        if seven_pairs_shanten(counts) == -1 {
            return Some(WinShape::SevenPairs);
        }
        if thirteen_orphans_shanten(counts) == -1 {
            return Some(WinShape::ThirteenOrphans);
        }
    }
    None
}

/// Shanten of a hand.
pub fn hand_shanten(hand: &Hand) -> i8 {
    shanten(&hand.plain_counts())
}

/// Start and length of the three suits and the honors.
const BLOCKS: [(usize, usize); 4] = [(0, 9), (9, 9), (18, 9), (HONOR_START, 7)];

/// Counts of one block, zero padded, and whether runs are allowed.
type BlockKey = ([u8; 9], bool);

static BLOCK_TABLES: OnceLock<RwLock<HashMap<BlockKey, BlockTable>>> = OnceLock::new();

/// The split table of one block, computed once per distinct block.
fn block_table(block: &[u8], runs: bool) -> BlockTable {
    let mut key = ([0u8; 9], runs);
    key.0[..block.len()].copy_from_slice(block);

    let tables = BLOCK_TABLES.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(table) = tables.read().ok().and_then(|t| t.get(&key).copied()) {
        return table;
    }

    let mut scan = BlockScan {
        counts: key.0,
        len: block.len(),
        runs,
        table: BlockTable::EMPTY,
    };
    scan.scan(0, 0, 0, false);
    if let Ok(mut tables) = tables.write() {
        tables.insert(key, scan.table);
    }
    scan.table
}

/// Most partial sets a split keeps, by pair taken and sets formed.
///
/// Sets and partials are capped at the four sets a hand needs; more never
/// lowers shanten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockTable([[Option<u8>; MAX_SETS + 1]; 2]);

impl BlockTable {
    const EMPTY: Self = Self([[None; MAX_SETS + 1]; 2]);

    fn offer(&mut self, pair: bool, sets: usize, partials: usize) {
        if sets > MAX_SETS {
            return;
        }
        let partials = partials.min(MAX_SETS) as u8;
        let slot = &mut self.0[usize::from(pair)][sets];
        *slot = (*slot).max(Some(partials));
    }

    /// `(pair, sets, partials)` for every reachable split.
    fn entries(&self) -> impl Iterator<Item = (bool, usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(pair, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(sets, p)| p.map(|p| (pair == 1, sets, p as usize)))
        })
    }
}

/// Depth-first split of one block into sets, partial sets, a pair and
/// leftovers.
struct BlockScan {
    counts: [u8; 9],
    len: usize,
    runs: bool,
    table: BlockTable,
}

impl BlockScan {
    fn scan(&mut self, from: usize, sets: usize, partials: usize, pair: bool) {
        let Some(i) = (from..self.len).find(|&i| self.counts[i] > 0) else {
            self.table.offer(pair, sets, partials);
            return;
        };

        if sets < MAX_SETS {
            if self.counts[i] >= 3 {
                self.counts[i] -= 3;
                self.scan(i, sets + 1, partials, pair);
                self.counts[i] += 3;
            }
            if self.runs_from(i, 2) && self.counts[i + 1] > 0 && self.counts[i + 2] > 0 {
                self.take(&[i, i + 1, i + 2]);
                self.scan(i, sets + 1, partials, pair);
                self.put(&[i, i + 1, i + 2]);
            }
        }

        if !pair && self.counts[i] >= 2 {
            self.counts[i] -= 2;
            self.scan(i, sets, partials, true);
            self.counts[i] += 2;
        }

        if partials < MAX_SETS {
            if self.counts[i] >= 2 {
                self.counts[i] -= 2;
                self.scan(i, sets, partials + 1, pair);
                self.counts[i] += 2;
            }
            for gap in 1..=2 {
                if self.runs_from(i, gap) && self.counts[i + gap] > 0 {
                    self.take(&[i, i + gap]);
                    self.scan(i, sets, partials + 1, pair);
                    self.put(&[i, i + gap]);
                }
            }
        }

        // Leave one copy unused.
        self.counts[i] -= 1;
        self.scan(i, sets, partials, pair);
        self.counts[i] += 1;
    }

    /// True if `i + span` stays inside a numbered suit.
    fn runs_from(&self, i: usize, span: usize) -> bool {
        self.runs && i + span < self.len
    }

    fn take(&mut self, tiles: &[usize]) {
        for &t in tiles {
            self.counts[t] -= 1;
        }
    }

    fn put(&mut self, tiles: &[usize]) {
        for &t in tiles {
            self.counts[t] += 1;
        }
    }
}

#[cfg(test)]
mod tests;
