//! Tests for shanten and shape checks.

use super::*;
use mahjong_distance_test::hands::{self, hand, tile};

fn counts(notation: &str) -> PlainCounts {
    hand(notation).plain_counts()
}

fn sized(notation: &str, size: usize) -> PlainCounts {
    let tiles: Vec<Tile> = notation
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    Hand::from_tiles_sized(&tiles, size).unwrap().plain_counts()
}

#[test]
fn test_complete_standard() {
    let c = hands::complete_standard().plain_counts();
    assert_eq!(shanten(&c), -1);
    assert!(is_complete(&c));
    assert_eq!(win_shape(&c), Some(WinShape::Standard));
}

#[test]
fn test_tenpai_two_sided() {
    let c = hands::tenpai_two_sided().plain_counts();
    assert_eq!(shanten(&c), 0);
    assert!(is_tenpai(&c));
    assert_eq!(waits(&c), vec![tile("1s"), tile("4s")]);
    assert!(!is_complete(&c));
}

#[test]
fn test_one_away() {
    let c = hands::one_away().plain_counts();
    assert_eq!(shanten(&c), 1);
    assert!(!is_tenpai(&c));
    assert!(waits(&c).is_empty());
}

#[test]
fn test_seven_pairs() {
    let c = hands::seven_pairs_tenpai().plain_counts();
    assert_eq!(seven_pairs_shanten(&c), 0);
    assert_eq!(shanten(&c), 0);
    assert_eq!(waits(&c), vec![tile("2z")]);

    let complete = counts("1133m5577p99s1122z");
    assert!(is_complete(&complete));
    assert_eq!(win_shape(&complete), Some(WinShape::SevenPairs));
}

#[test]
fn test_seven_pairs_needs_distinct_pairs() {
    // Four 1m make a single pair.
    let c = counts("1111m5577p99s1122z");
    assert_eq!(seven_pairs_shanten(&c), 1);
}

#[test]
fn test_thirteen_orphans() {
    let c = hands::thirteen_orphans_tenpai().plain_counts();
    assert_eq!(thirteen_orphans_shanten(&c), 0);
    assert_eq!(waits(&c).len(), 13);

    let complete = counts("119m19p19s1234567z");
    assert_eq!(win_shape(&complete), Some(WinShape::ThirteenOrphans));
}

#[test]
fn test_phantom_wait_is_not_tenpai() {
    let c = hands::phantom_wait().plain_counts();
    assert_eq!(shanten(&c), 0);
    assert!(waits(&c).is_empty());
    assert!(!is_tenpai(&c));
}

#[test]
fn test_scattered() {
    let c = hands::scattered().plain_counts();
    assert_eq!(standard_shanten(&c), 8);
    assert_eq!(seven_pairs_shanten(&c), 6);
    assert_eq!(shanten(&c), 6);
}

#[test]
fn test_red_fives_fold() {
    let plain = counts("123m456p789s2355s");
    let red = counts("123m406p789s2305s");
    assert_eq!(plain, red);
    assert_eq!(shanten(&red), 0);
}

#[test]
fn test_honors_do_not_run() {
    // 1z2z3z is not a sequence.
    let c = counts("123m456p789s1123z");
    assert_eq!(standard_shanten(&c), 1);
}

#[test]
fn test_small_hands() {
    let four = sized("1m 1m 2m 3m", 4);
    assert_eq!(shanten(&four), 0);
    assert_eq!(waits(&four), vec![tile("1m"), tile("4m")]);

    let two = sized("7z 7z", 2);
    assert!(is_complete(&two));
}

#[test]
fn test_wrong_sizes() {
    let thirteen = hands::tenpai_two_sided().plain_counts();
    assert!(!is_complete(&thirteen));
    assert_eq!(win_shape(&thirteen), None);

    let fourteen = hands::complete_standard().plain_counts();
    assert!(!is_tenpai(&fourteen));
    assert!(waits(&fourteen).is_empty());
}

#[test]
fn test_hand_shanten() {
    assert_eq!(hand_shanten(&hands::one_away()), 1);
}

/// Whole-hand split with no per-block tables.
fn split_shanten(counts: &PlainCounts) -> i8 {
    fn scan(
        counts: &mut PlainCounts,
        target: usize,
        sets: usize,
        partials: usize,
        pair: bool,
        best: &mut i8,
    ) {
        let Some(i) = counts.iter().position(|&c| c > 0) else {
            let useful = partials.min(target - sets);
            let value = 2 * target as i8 - 2 * sets as i8 - useful as i8 - i8::from(pair);
            *best = (*best).min(value);
            return;
        };
        let runs = |span: usize| i < HONOR_START && i % 9 + span < 9;
        if sets < target {
            if counts[i] >= 3 {
                counts[i] -= 3;
                scan(counts, target, sets + 1, partials, pair, best);
                counts[i] += 3;
            }
            if runs(2) && counts[i + 1] > 0 && counts[i + 2] > 0 {
                counts[i] -= 1;
                counts[i + 1] -= 1;
                counts[i + 2] -= 1;
                scan(counts, target, sets + 1, partials, pair, best);
                counts[i] += 1;
                counts[i + 1] += 1;
                counts[i + 2] += 1;
            }
        }
        if !pair && counts[i] >= 2 {
            counts[i] -= 2;
            scan(counts, target, sets, partials, true, best);
            counts[i] += 2;
        }
        if sets + partials < target {
            if counts[i] >= 2 {
                counts[i] -= 2;
                scan(counts, target, sets, partials + 1, pair, best);
                counts[i] += 2;
            }
            for gap in 1..=2 {
                if runs(gap) && counts[i + gap] > 0 {
                    counts[i] -= 1;
                    counts[i + gap] -= 1;
                    scan(counts, target, sets, partials + 1, pair, best);
                    counts[i] += 1;
                    counts[i + gap] += 1;
                }
            }
        }
        counts[i] -= 1;
        scan(counts, target, sets, partials, pair, best);
        counts[i] += 1;
    }

    let mut work = *counts;
    let mut best = i8::MAX;
    scan(&mut work, set_target(counts), 0, 0, false, &mut best);
    best
}

#[test]
fn test_block_tables_match_whole_hand_split() {
    for seed in 0..25 {
        for size in [5, 8, 13, 14] {
            let c = mahjong_distance_test::random_hand(seed, size, true).plain_counts();
            assert_eq!(standard_shanten(&c), split_shanten(&c), "seed {seed} size {size}");
        }
    }
    for fixture in [
        hands::complete_standard(),
        hands::tenpai_two_sided(),
        hands::one_away(),
        hands::phantom_wait(),
        hands::scattered(),
    ] {
        let c = fixture.plain_counts();
        assert_eq!(standard_shanten(&c), split_shanten(&c), "{fixture}");
    }
}

#[test]
fn test_scattered_neighborhood_is_fast() {
    let base = hands::scattered().plain_counts();
    let started = std::time::Instant::now();
    let mut improving = 0;
    for discard in (0..NUM_TILE_TYPES).filter(|&i| base[i] > 0) {
        for draw in (0..NUM_TILE_TYPES).filter(|&i| i != discard && base[i] < COPIES) {
            let mut next = base;
            next[discard] -= 1;
            next[draw] += 1;
            if shanten(&next) < 6 {
                improving += 1;
            }
            assert!(!is_tenpai(&next));
        }
    }
    assert!(improving > 0);
    assert!(
        started.elapsed() < std::time::Duration::from_secs(2),
        "took {:?}",
        started.elapsed()
    );
}
