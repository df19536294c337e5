use std::time::Duration;

use super::*;
use mahjong_distance_core::HandDiff;
use mahjong_distance_scoring::shape;
use mahjong_distance_scoring::{Evaluation, ScoreBreakdown, ShapeOracle, Yaku};
use mahjong_distance_test::hands::{self, hand, tile};

fn engine() -> DistanceEngine {
    DistanceEngine::new().with_limits(SearchLimits::new(4))
}

/// Shape win worth one han when every tile is a simple.
fn all_simples(hand: &Hand, _context: &WinContext) -> Evaluation {
    let Some(win) = shape::win_shape(&hand.plain_counts()) else {
        return Evaluation::NotAWin;
    };
    let mut breakdown = ScoreBreakdown::new().with_shape(win);
    if hand.tiles().iter().all(|t| !t.is_terminal_or_honor()) {
        breakdown = breakdown.with_yaku(Yaku::new("tanyao", 1));
    }
    Evaluation::Win(breakdown)
}

#[test]
fn test_tenpai_to_run_is_one_substitution() {
    let engine = engine();
    let from = hands::tenpai_two_sided();
    let to = hand("123m456p789s2345s");
    let supply = engine.supply_for(&from).unwrap();

    let outcome = engine.hand_distance(&from, &to, &supply).unwrap();
    assert_eq!(outcome.distance(), Some(1));

    let trace = outcome.trace().unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.drawn(), vec![tile("4s")]);
    assert_eq!(trace.discarded(), vec![tile("5s")]);
    assert_eq!(trace.get(0), Some(&HandDiff::from_hands(&from, &to).unwrap()));
}

#[test]
fn test_self_distance_is_zero() {
    let engine = engine();
    let hand = hands::scattered();
    let supply = engine.supply_for(&hand).unwrap();

    let path = engine
        .hand_distance(&hand, &hand, &supply)
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(path.distance, 0);
    assert!(path.trace.is_empty());
    assert_eq!(path.path.len(), 1);
}

#[test]
fn test_two_step_path() {
    let engine = engine();
    let from = hands::one_away();
    let to = hand("123m456p789s2345s");
    let supply = engine.supply_for(&from).unwrap();

    let path = engine
        .hand_distance(&from, &to, &supply)
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(path.distance, 2);
    assert_eq!(path.start(), Some(&from));
    assert_eq!(path.end(), Some(&to));
    assert_eq!(path.trace.len(), 2);
    for diff in &path.trace {
        assert!(diff.from().difference(diff.to()).is_adjacent());
    }

    let back = engine
        .hand_distance(&to, &from, &engine.supply_for(&to).unwrap())
        .unwrap();
    assert_eq!(back.distance(), Some(2));
}

#[test]
fn test_depth_cap_is_unreachable() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(3));
    let from = hands::scattered();
    let to = hands::tenpai_two_sided();
    let supply = engine.supply_for(&from).unwrap();

    let outcome = engine.hand_distance(&from, &to, &supply).unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::DepthLimit { max_depth: 3 })
    );
    assert!(matches!(
        outcome.into_result(),
        Err(HandDistanceError::DistanceUnreachable(
            UnreachableReason::DepthLimit { .. }
        ))
    ));
}

#[test]
fn test_different_sizes_are_unreachable() {
    let engine = engine();
    let from = hands::tenpai_two_sided();
    let supply = engine.supply_for(&from).unwrap();

    let outcome = engine
        .hand_distance(&from, &hands::complete_standard(), &supply)
        .unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );
}

#[test]
fn test_target_outside_pool_is_exhausted() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(8));
    let from = hands::tenpai_two_sided();
    let to = hand("123m456p789s2345s");
    let mut supply = engine.supply_for(&from).unwrap();
    for _ in 0..4 {
        supply = supply.withdraw(tile("4s")).unwrap();
    }

    let outcome = engine.hand_distance(&from, &to, &supply).unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );

    let matrix = engine
        .distance_matrix(std::slice::from_ref(&from), &[to, from.clone()], &supply)
        .unwrap();
    assert_eq!(matrix.distance(0, 0), None);
    assert_eq!(matrix.distance(0, 1), Some(0));
}

#[test]
fn test_multi_source_search() {
    let engine = engine();
    let sources = [hands::one_away(), hands::tenpai_two_sided()];
    let target = ExactHand(hand("123m456p789s2345s"));
    let supply = engine.supply_for(&sources[0]).unwrap();

    let path = engine
        .search(&sources, &target, &supply)
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(path.distance, 1);
    assert_eq!(path.source, 1);
    assert_eq!(path.start(), Some(&sources[1]));
}

#[test]
fn test_distance_to_win() {
    let engine = engine();
    let cases = [
        (hands::one_away(), 1),
        (hands::tenpai_two_sided(), 0),
        (hands::complete_standard(), 0),
        (hand("123m456p789s23557s"), 1),
    ];
    for (hand, expected) in cases {
        let supply = engine.supply_for(&hand).unwrap();
        let outcome = engine.distance_to_win(&hand, &supply).unwrap();
        assert_eq!(outcome.distance(), Some(expected), "{hand}");
    }
}

#[test]
fn test_distance_to_win_reaches_target_shape() {
    let engine = engine();
    let hand = hand("123m456p789s23557s");
    let supply = engine.supply_for(&hand).unwrap();

    let path = engine
        .distance_to_win(&hand, &supply)
        .unwrap()
        .into_result()
        .unwrap();
    let end = path.end().unwrap();
    assert!(shape::is_complete(&end.plain_counts()));
}

#[test]
fn test_phantom_wait_needs_a_substitution() {
    // Shanten 0 but no live wait, so the pass at limit 0 finds nothing.
    let engine = engine();
    let hand = hands::phantom_wait();
    let supply = engine.supply_for(&hand).unwrap();

    let (outcome, stats) = engine
        .search_with_stats(std::slice::from_ref(&hand), &TenpaiShape, &supply)
        .unwrap();
    assert_eq!(outcome.distance(), Some(1));
    assert_eq!(stats.passes, 2);
}

#[test]
fn test_distance_to_win_rejects_other_sizes() {
    let engine = engine();
    let base = hands::tenpai_two_sided();
    let twelve = Hand::from_tiles_sized(&base.tiles()[..12], 12).unwrap();
    let supply = engine.supply_for(&base).unwrap();

    let outcome = engine.distance_to_win(&twelve, &supply).unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );
}

#[test]
fn test_distance_to_qualifying_win() {
    let engine = engine();
    // Tenpai on 2s only, which makes 123s.
    let hand = hand("234m456p678s1355s");
    let supply = engine.supply_for(&hand).unwrap();

    assert_eq!(
        engine.distance_to_win(&hand, &supply).unwrap().distance(),
        Some(0)
    );

    let outcome = engine
        .distance_to_qualifying_win(&hand, &supply, &all_simples)
        .unwrap();
    assert_eq!(outcome.distance(), Some(1));
    let end = outcome.found().and_then(|p| p.end()).unwrap();
    assert!(TenpaiShape.is_target(end));
    assert!(!end.contains(tile("1s")));
}

#[test]
fn test_shape_oracle_never_qualifies_by_default() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(1));
    let hand = hands::one_away();
    let supply = engine.supply_for(&hand).unwrap();

    let strict = engine
        .distance_to_qualifying_win(&hand, &supply, &ShapeOracle)
        .unwrap();
    assert_eq!(
        strict.unreachable_reason(),
        Some(UnreachableReason::DepthLimit { max_depth: 1 })
    );

    let any_win = engine
        .with_qualification(Qualification::any_win())
        .distance_to_qualifying_win(&hand, &supply, &ShapeOracle)
        .unwrap();
    assert_eq!(any_win.distance(), Some(1));
}

#[test]
fn test_distances_to() {
    let engine = engine();
    let target = hand("123m456p789s2345s");
    let sources = [
        hands::tenpai_two_sided(),
        hands::one_away(),
        hands::complete_standard(),
    ];
    let supply = engine.supply_for(&target).unwrap();

    let outcomes = engine.distances_to(&sources, &target, &supply).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].distance(), Some(1));
    assert_eq!(outcomes[1].distance(), Some(2));
    assert_eq!(outcomes[1].found().unwrap().source, 1);
    assert_eq!(
        outcomes[2].unreachable_reason(),
        Some(UnreachableReason::Exhausted)
    );
}

#[test]
fn test_distance_matrix() {
    let engine = engine();
    let hands = [
        hands::tenpai_two_sided(),
        hands::one_away(),
        hand("123m456p789s2345s"),
    ];
    let supply = engine.supply_for(&hands[2]).unwrap();

    let matrix = engine.distance_matrix(&hands, &hands, &supply).unwrap();
    assert_eq!((matrix.rows(), matrix.cols()), (3, 3));
    for i in 0..3 {
        assert_eq!(matrix.distance(i, i), Some(0));
        for j in 0..3 {
            assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
        }
    }
    assert_eq!(matrix.distance(0, 1), Some(1));
    assert_eq!(matrix.distance(1, 2), Some(2));
    assert_eq!(matrix.get(2, 0).and_then(|o| o.found()).unwrap().source, 2);
    assert_eq!(matrix.reachable_count(), 9);
}

#[test]
fn test_matrix_marks_unreachable_entries() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(1));
    let sources = [hands::tenpai_two_sided(), hands::scattered()];
    let targets = [hand("123m456p789s2345s")];
    let supply = engine.supply_for(&targets[0]).unwrap();

    let matrix = engine.distance_matrix(&sources, &targets, &supply).unwrap();
    assert_eq!(matrix.distance(0, 0), Some(1));
    assert_eq!(matrix.distance(1, 0), None);
    assert_eq!(matrix.to_string(), " 1\n -");
}

#[test]
fn test_node_limit() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(3).with_node_limit(100));
    let hand = hands::one_away();
    let supply = engine.supply_for(&hand).unwrap();
    let never = FnTarget::new(|_: &Hand| false);

    let outcome = engine
        .search(std::slice::from_ref(&hand), &never, &supply)
        .unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::NodeLimit { limit: 100 })
    );
}

#[test]
fn test_deadline() {
    let limits = SearchLimits::new(3).with_time_limit(Duration::ZERO);
    let engine = DistanceEngine::new().with_limits(limits);
    let hand = hands::one_away();
    let supply = engine.supply_for(&hand).unwrap();
    let never = FnTarget::new(|_: &Hand| false);

    let outcome = engine
        .search(std::slice::from_ref(&hand), &never, &supply)
        .unwrap();
    assert!(matches!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::Deadline { .. })
    ));
}

#[test]
fn test_unbounded_target_hits_depth_cap() {
    let engine = DistanceEngine::new().with_limits(SearchLimits::new(1));
    let hand = hands::one_away();
    let supply = engine.supply_for(&hand).unwrap();
    let never = FnTarget::new(|_: &Hand| false);

    let outcome = engine
        .search(std::slice::from_ref(&hand), &never, &supply)
        .unwrap();
    assert_eq!(
        outcome.unreachable_reason(),
        Some(UnreachableReason::DepthLimit { max_depth: 1 })
    );
}

#[test]
fn test_neighborhood() {
    let engine = engine().with_red_fives(false);
    let hand = hands::tenpai_two_sided();
    let supply = engine.supply_for(&hand).unwrap();

    let layers = engine.neighborhood(&hand, &supply, 1).unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].as_slice(), &[hand.clone()]);
    assert_eq!(layers[1].len(), 12 * 33);
    assert!(layers[1].iter().all(|n| hand.difference(n).is_adjacent()));

    let just_self = engine.neighborhood(&hand, &supply, 0).unwrap();
    assert_eq!(just_self.len(), 1);
}

#[test]
fn test_neighborhood_layers_are_disjoint() {
    let engine = DistanceEngine::new()
        .with_red_fives(false)
        .with_limits(SearchLimits::new(2).with_node_limit(1_000_000));
    let hand = hand("1111m2222p3333s1z");
    let supply = engine.supply_for(&hand).unwrap();

    let layers = engine.neighborhood(&hand, &supply, 2).unwrap();
    assert_eq!(layers.len(), 3);
    for next in &layers[2] {
        assert!(!layers[1].contains(next));
        assert_eq!(hand.overlap_distance(next), 2);
    }
}

#[test]
fn test_filter_blocks_path() {
    let engine = DistanceEngine::new()
        .with_limits(SearchLimits::new(2))
        .with_filter(|h: &Hand| h.tiles().iter().all(|t| !t.is_honor()));
    let from = hands::tenpai_two_sided();
    let to = hand("123m456p789s2351z");
    let supply = engine.supply_for(&from).unwrap();

    let outcome = engine.hand_distance(&from, &to, &supply).unwrap();
    assert!(!outcome.is_found());

    let open = engine.hand_distance(&from, &hand("123m456p789s2345s"), &supply);
    assert_eq!(open.unwrap().distance(), Some(1));
}

#[test]
fn test_parallel_matches_sequential() {
    let from = hands::one_away();
    let to = hand("123m456p789s2345s");
    let sequential = engine();
    let supply = sequential.supply_for(&from).unwrap();
    let expected = sequential.hand_distance(&from, &to, &supply).unwrap();

    for threads in [ThreadCount::Auto, ThreadCount::Count(2)] {
        let parallel = engine()
            .with_thread_count(threads)
            .with_parallel_threshold(1);
        let outcome = parallel.hand_distance(&from, &to, &supply).unwrap();
        assert_eq!(outcome, expected, "{threads:?}");

        let win = parallel.distance_to_win(&from, &supply).unwrap();
        let win_seq = sequential.distance_to_win(&from, &supply).unwrap();
        assert_eq!(win, win_seq, "{threads:?}");
    }
}

#[test]
fn test_from_config() {
    let config = DistanceConfig::default()
        .with_max_depth(3)
        .with_red_fives(false);
    let engine = DistanceEngine::from_config(&config);
    assert_eq!(engine.limits().max_depth, 3);
    assert!(!engine.red_fives());
    assert_eq!(engine.qualification(), &Qualification::default());
    assert!(!engine.context().is_self_drawn());
}
