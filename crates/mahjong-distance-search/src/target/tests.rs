use super::*;
use mahjong_distance_scoring::{Evaluation, ScoreBreakdown, ShapeOracle, Yaku};
use mahjong_distance_test::hands::{self, hand, tile};

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
fn test_exact_hand() {
    let target = ExactHand(hands::tenpai_two_sided());
    assert!(target.is_target(&hand("2355s123m456p789s")));
    assert!(!target.is_target(&hands::one_away()));

    assert_eq!(target.lower_bound(&hands::tenpai_two_sided()), Some(0));
    assert_eq!(target.lower_bound(&hands::one_away()), Some(1));
    assert_eq!(
        target.lower_bound(&hands::complete_standard()),
        Some(u32::MAX)
    );
}

#[test]
fn test_any_hand() {
    let target = AnyHand::new([hands::tenpai_two_sided(), hands::scattered()]);
    assert_eq!(target.hands().len(), 2);
    assert!(target.is_target(&hands::scattered()));
    assert!(!target.is_target(&hands::one_away()));
    assert_eq!(target.lower_bound(&hands::one_away()), Some(1));

    let empty = AnyHand::new(Vec::new());
    assert!(!empty.is_target(&hands::one_away()));
    assert_eq!(empty.lower_bound(&hands::one_away()), Some(u32::MAX));
}

#[test]
fn test_complete_shape() {
    assert!(CompleteShape.is_target(&hands::complete_standard()));
    assert!(!CompleteShape.is_target(&hands::tenpai_two_sided()));

    assert_eq!(CompleteShape.lower_bound(&hands::complete_standard()), Some(0));
    assert_eq!(CompleteShape.lower_bound(&hand("123m456p789s23557s")), Some(1));
    assert_eq!(
        CompleteShape.lower_bound(&hands::tenpai_two_sided()),
        Some(u32::MAX)
    );
}

#[test]
fn test_tenpai_shape() {
    assert!(TenpaiShape.is_target(&hands::tenpai_two_sided()));
    assert!(TenpaiShape.is_target(&hands::seven_pairs_tenpai()));
    assert!(!TenpaiShape.is_target(&hands::one_away()));

    assert_eq!(TenpaiShape.lower_bound(&hands::tenpai_two_sided()), Some(0));
    assert_eq!(TenpaiShape.lower_bound(&hands::one_away()), Some(1));
    assert_eq!(TenpaiShape.lower_bound(&hands::scattered()), Some(6));
    assert_eq!(
        TenpaiShape.lower_bound(&hands::complete_standard()),
        Some(u32::MAX)
    );
}

#[test]
fn test_phantom_wait_is_not_tenpai() {
    let phantom = hands::phantom_wait();
    assert!(!TenpaiShape.is_target(&phantom));
    // Shanten says zero, so the bound stays admissible.
    assert_eq!(TenpaiShape.lower_bound(&phantom), Some(0));
}

#[test]
fn test_oracle_target_complete_hand() {
    let any_win = OracleTarget::new(&ShapeOracle, WinContext::default(), Qualification::any_win());
    assert!(any_win.is_target(&hands::complete_standard()));
    assert!(!any_win.is_target(&hand("123m456p789s23557s")));
    assert_eq!(any_win.lower_bound(&hands::complete_standard()), None);

    let strict = OracleTarget::new(&ShapeOracle, WinContext::default(), Qualification::default());
    assert!(!strict.is_target(&hands::complete_standard()));
}

#[test]
fn test_oracle_target_waits() {
    let oracle = all_simples;
    let target = OracleTarget::new(&oracle, WinContext::default(), Qualification::default());

    // Waits 1s and 4s; 4s gives all simples.
    assert!(target.is_target(&hand("234m456p678s2355s")));
    // Only wait is 2s, and 123s holds a terminal.
    assert!(!target.is_target(&hand("234m456p678s1355s")));
    assert!(!target.is_target(&hands::phantom_wait()));
}

#[test]
fn test_oracle_target_names_winning_tile() {
    let expect_4s = |hand: &Hand, context: &WinContext| {
        if context.winning_tile == Some(tile("4s")) {
            all_simples(hand, context)
        } else {
            Evaluation::NotAWin
        }
    };
    let target = OracleTarget::new(&expect_4s, WinContext::default(), Qualification::default());
    assert!(target.is_target(&hand("234m456p678s2355s")));
}

#[test]
fn test_oracle_target_as_trait_object() {
    let oracle: &dyn ScoringOracle = &ShapeOracle;
    let target = OracleTarget::new(oracle, WinContext::default(), Qualification::any_win());
    assert!(target.is_target(&hands::tenpai_two_sided()));
    assert!(!target.is_target(&hands::one_away()));
}

#[test]
fn test_both() {
    let target = Both(
        CompleteShape,
        OracleTarget::new(&ShapeOracle, WinContext::default(), Qualification::any_win()),
    );
    assert!(target.is_target(&hands::complete_standard()));
    assert_eq!(target.lower_bound(&hand("123m456p789s23557s")), Some(1));
    assert_eq!(target.label(), "complete and qualifying win (min 0 han)");

    let exact = Both(ExactHand(hands::one_away()), TenpaiShape);
    assert!(!exact.is_target(&hands::one_away()));
    let overlap = hands::scattered().overlap_distance(&hands::one_away());
    assert_eq!(exact.lower_bound(&hands::scattered()), Some(overlap.max(6)));
}

#[test]
fn test_fn_target() {
    let has_east = FnTarget::new(|h: &Hand| h.contains(tile("1z"))).with_label("east");
    assert!(has_east.is_target(&hands::thirteen_orphans_tenpai()));
    assert!(!has_east.is_target(&hands::tenpai_two_sided()));
    assert_eq!(has_east.lower_bound(&hands::tenpai_two_sided()), None);
    assert_eq!(has_east.label(), "east");

    fn check(target: impl TargetPredicate, hand: &Hand) -> bool {
        target.is_target(hand)
    }
    assert!(check(&has_east, &hands::scattered()));
}
