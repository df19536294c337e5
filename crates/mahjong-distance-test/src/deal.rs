//! Seeded deals from a shuffled 136-tile wall.

use mahjong_distance_core::{Hand, Tile, TileSet, TileSupply};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fisher-Yates shuffle, fixed so fixtures stay stable across `rand` versions.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// The full wall in a seeded order.
pub fn shuffled_wall(seed: u64, red_fives: bool) -> Vec<Tile> {
    let supply = TileSupply::full(red_fives);
    let mut wall: Vec<Tile> = TileSet::all_codes()
        .flat_map(|t| std::iter::repeat(t).take(supply.remaining(t) as usize))
        .collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    fisher_yates_shuffle(&mut wall, &mut rng);
    wall
}

/// The first `size` tiles of a seeded wall (1 to 14).
pub fn random_hand(seed: u64, size: usize, red_fives: bool) -> Hand {
    let wall = shuffled_wall(seed, red_fives);
    let dealt = &wall[..size];
    match size {
        13 | 14 => Hand::from_tiles(dealt),
        _ => Hand::from_tiles_sized(dealt, size),
    }
    .unwrap_or_else(|e| panic!("dealt hand rejected: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_is_full_deck() {
        let wall = shuffled_wall(7, true);
        assert_eq!(wall.len(), mahjong_distance_core::DECK_SIZE);
        assert!(TileSupply::from_visible(&wall, true).is_ok());
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(random_hand(42, 13, true), random_hand(42, 13, true));
        assert_eq!(shuffled_wall(1, false), shuffled_wall(1, false));
        assert_ne!(shuffled_wall(1, false), shuffled_wall(2, false));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(random_hand(3, 14, false).len(), 14);
        assert_eq!(random_hand(3, 5, false).len(), 5);
    }
}
