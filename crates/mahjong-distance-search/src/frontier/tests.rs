use super::*;
use crate::target::{ExactHand, FnTarget, TenpaiShape};
use mahjong_distance_test::hands::{self, hand};

fn plain_supply(hand: &Hand) -> TileSupply {
    TileSupply::for_hand(hand, false).unwrap()
}

#[test]
fn test_phases() {
    let generator = NeighborGenerator::new();
    let start = hands::one_away();
    let target = ExactHand(hand("123m456p789s2345s"));
    let mut search = FrontierSearch::new(&generator, &target, SearchLimits::new(4));
    assert_eq!(search.phase(), SearchPhase::Initialized);

    search.seed(std::slice::from_ref(&start), &plain_supply(&start));
    assert_eq!(search.phase(), SearchPhase::Expanding);
    assert_eq!(search.frontier_len(), 1);
    assert_eq!(search.depth(), 0);

    assert_eq!(search.expand_layer(), SearchPhase::Expanding);
    assert_eq!(search.depth(), 1);
    // 11 distinct tiles to discard (the 5s and 7s pairs count once), 33 other types to draw.
    assert_eq!(search.frontier_len(), 11 * 33);

    assert_eq!(search.expand_layer(), SearchPhase::Found);
    assert_eq!(search.depth(), 2);
    assert_eq!(search.expand_layer(), SearchPhase::Found);

    let path = search.found_path().unwrap().unwrap();
    assert_eq!(path.distance, 2);
    assert_eq!(path.end(), Some(&target.0));
}

#[test]
fn test_source_on_target() {
    let generator = NeighborGenerator::new();
    let start = hands::tenpai_two_sided();
    let mut search = FrontierSearch::new(&generator, &TenpaiShape, SearchLimits::new(4));
    search.seed(std::slice::from_ref(&start), &plain_supply(&start));

    assert_eq!(search.phase(), SearchPhase::Found);
    assert_eq!(search.run(), SearchPhase::Found);
    assert_eq!(search.path_to(0), vec![start]);
    assert_eq!(search.found_index(), Some(0));
}

#[test]
fn test_parent_pointers() {
    let generator = NeighborGenerator::new();
    let start = hands::one_away();
    let target = ExactHand(hand("123m456p789s2345s"));
    let mut search = FrontierSearch::new(&generator, &target, SearchLimits::new(4));
    search.seed(std::slice::from_ref(&start), &plain_supply(&start));
    search.run();

    let idx = search.found_index().unwrap();
    let node = search.node(idx).unwrap();
    assert_eq!(node.depth(), 2);
    assert_eq!(node.source(), 0);
    let parent = search.node(node.parent_index().unwrap()).unwrap();
    assert_eq!(parent.depth(), 1);
    assert_eq!(parent.parent_index(), Some(0));
    assert!(search.node(0).unwrap().parent_index().is_none());

    let path = search.path_to(idx);
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], start);
    assert_eq!(path[1], *parent.hand());
}

#[test]
fn test_empty_seed_is_exhausted() {
    let generator = NeighborGenerator::new();
    let never = FnTarget::new(|_: &Hand| false);
    let mut search = FrontierSearch::new(&generator, &never, SearchLimits::new(4));
    search.seed(&[], &TileSupply::full(false));

    assert_eq!(search.run(), SearchPhase::Exhausted);
    assert_eq!(
        search.unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );
    assert_eq!(search.found_path().unwrap(), None);
}

#[test]
fn test_closed_component_is_exhausted() {
    // Nothing left in the wall: the only hand in the pool is the start.
    let start = hands::tenpai_two_sided();
    let mut visible = start.to_tiles();
    for tile in TileSupply::for_hand(&start, false).unwrap().available() {
        let left = TileSupply::for_hand(&start, false).unwrap().remaining(tile);
        visible.extend(std::iter::repeat(tile).take(left as usize));
    }
    let empty = TileSupply::from_visible(&visible, false).unwrap();
    assert_eq!(empty.total(), 0);

    let generator = NeighborGenerator::new();
    let never = FnTarget::new(|_: &Hand| false);
    let mut search = FrontierSearch::new(&generator, &never, SearchLimits::new(4));
    search.seed(std::slice::from_ref(&start), &empty);

    assert_eq!(search.run(), SearchPhase::Exhausted);
    assert_eq!(search.visited_len(), 1);
    assert_eq!(
        search.unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );
}

#[test]
fn test_pass_limit_cuts() {
    let generator = NeighborGenerator::new();
    let start = hands::one_away();
    let target = ExactHand(hand("123m456p789s2345s"));

    let mut narrow =
        FrontierSearch::new(&generator, &target, SearchLimits::new(4)).with_pass_limit(1);
    narrow.seed(std::slice::from_ref(&start), &plain_supply(&start));
    assert_eq!(narrow.run(), SearchPhase::Exhausted);
    assert_eq!(narrow.next_limit(), Some(2));
    assert_eq!(
        narrow.unreachable_reason(),
        Some(UnreachableReason::DepthLimit { max_depth: 1 })
    );
    assert!(narrow.stats().pruned > 0);

    let mut wide =
        FrontierSearch::new(&generator, &target, SearchLimits::new(4)).with_pass_limit(2);
    wide.seed(std::slice::from_ref(&start), &plain_supply(&start));
    assert_eq!(wide.run(), SearchPhase::Found);
    assert!(wide.visited_len() < 11 * 33);
}

#[test]
fn test_pass_limit_capped_by_max_depth() {
    let generator = NeighborGenerator::new();
    let target = TenpaiShape;
    let search = FrontierSearch::new(&generator, &target, SearchLimits::new(2)).with_pass_limit(9);
    assert_eq!(search.pass_limit(), 2);
}

#[test]
fn test_duplicate_sources_kept_once() {
    let generator = NeighborGenerator::new();
    let start = hands::one_away();
    let never = FnTarget::new(|_: &Hand| false);
    let mut search = FrontierSearch::new(&generator, &never, SearchLimits::new(1));
    search.seed(&[start.clone(), start.clone()], &plain_supply(&start));

    assert_eq!(search.visited_len(), 1);
    assert_eq!(search.frontier_len(), 1);
    assert_eq!(search.stats().duplicates, 1);
}

#[test]
fn test_layers_do_not_revisit() {
    let generator = NeighborGenerator::new();
    let start = hand("1111m2222p3333s1z");
    let never = FnTarget::new(|_: &Hand| false);
    let mut search = FrontierSearch::new(&generator, &never, SearchLimits::new(2));
    search.seed(std::slice::from_ref(&start), &plain_supply(&start));

    search.expand_layer();
    let first: Vec<Hand> = search.frontier_hands().cloned().collect();
    search.expand_layer();
    assert!(search.frontier_hands().all(|h| !first.contains(h) && *h != start));
    assert!(search.stats().duplicates > 0);
}

#[test]
fn test_parallel_layers_match() {
    let generator = NeighborGenerator::new();
    let start = hands::one_away();
    let target = ExactHand(hand("123m456p789s2345s"));
    let supply = plain_supply(&start);

    let mut sequential = FrontierSearch::new(&generator, &target, SearchLimits::new(4));
    sequential.seed(std::slice::from_ref(&start), &supply);
    sequential.run();

    let mut parallel = FrontierSearch::new(&generator, &target, SearchLimits::new(4))
        .with_parallelism(Parallelism::Global { threshold: 1 });
    parallel.seed(std::slice::from_ref(&start), &supply);
    parallel.run();

    assert_eq!(
        sequential.found_path().unwrap(),
        parallel.found_path().unwrap()
    );
    assert_eq!(sequential.visited_len(), parallel.visited_len());
}
