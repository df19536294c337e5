//! Named hands.
//!
//! Each fixture panics on a bad literal; they are test data, not input.

use mahjong_distance_core::{Hand, Tile};

/// Parses a hand literal such as `"123m456p789s2355s"`.
pub fn hand(notation: &str) -> Hand {
    notation
        .parse()
        .unwrap_or_else(|e| panic!("bad hand fixture {notation:?}: {e}"))
}

/// Parses a tile literal such as `"0p"`.
pub fn tile(notation: &str) -> Tile {
    notation
        .parse()
        .unwrap_or_else(|e| panic!("bad tile fixture {notation:?}: {e}"))
}

/// Four sequences and a pair of fives: a 14-tile win.
pub fn complete_standard() -> Hand {
    hand("123m456p789s234s55s")
}

/// Three sequences, `23s` and a pair of fives; waits on 1s and 4s.
pub fn tenpai_two_sided() -> Hand {
    hand("123m456p789s2355s")
}

/// `tenpai_two_sided` with `23s` broken up; two tiles from a win.
pub fn one_away() -> Hand {
    hand("123m456p789s2557s")
}

/// Six pairs and a lone 2z.
pub fn seven_pairs_tenpai() -> Hand {
    hand("1133m5577p99s112z")
}

/// Every terminal and honor once; a thirteen-sided wait.
pub fn thirteen_orphans_tenpai() -> Hand {
    hand("19m19p19s1234567z")
}

/// Holds all four 1m, so its only shape wait is a tile that does not exist.
pub fn phantom_wait() -> Hand {
    hand("1111m234p567s789s")
}

/// Scattered tiles with no pair and few partial sets.
pub fn scattered() -> Hand {
    hand("147m258p369s1234z")
}
