use proptest::prelude::*;
use tsume_core::kif::{parse_kif, write_kif};
use tsume_core::rules::{is_in_check, legal_moves};
use tsume_core::{Game, Move, Position};

/// `choices` に従って合法手を選び続けた手順（合法手がなくなれば打ち切る）
fn random_line(choices: &[usize]) -> (Position, Vec<Move>) {
    let mut pos = Position::startpos();
    let mut played = Vec::new();
    for &c in choices {
        let moves = legal_moves(&pos).unwrap();
        if moves.is_empty() {
            break;
        }
        let mv = moves[c % moves.len()];
        pos.make_move(&mv).unwrap();
        played.push(mv);
    }
    (pos, played)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 12, .. ProptestConfig::default() })]

    #[test]
    fn prop_unmake_restores_start(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let (mut pos, played) = random_line(&choices);
        prop_assert_eq!(Position::from_sfen(&pos.to_sfen()).unwrap(), pos.clone());
        for mv in played.iter().rev() {
            pos.unmake_move(mv).unwrap();
        }
        prop_assert_eq!(pos, Position::startpos());
    }

    #[test]
    fn prop_legal_moves_never_leave_king_in_check(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let (pos, _) = random_line(&choices);
        for mv in legal_moves(&pos).unwrap() {
            let mut next = pos.clone();
            next.make_move(&mv).unwrap();
            prop_assert!(!is_in_check(&next, pos.turn()), "{} leaves the king in check", mv);
        }
    }

    #[test]
    fn prop_kif_round_trip(choices in prop::collection::vec(any::<usize>(), 0..30)) {
        let (_, played) = random_line(&choices);
        let mut game = Game::default();
        for mv in played {
            game.add_move(mv).unwrap();
        }
        let back = parse_kif(&write_kif(&game)).unwrap();
        prop_assert_eq!(back.mainline_moves(), game.mainline_moves());
    }
}
