//! KIF の読み書きと棋譜操作の結合テスト

use encoding_rs::SHIFT_JIS;
use tsume_core::kif::{parse_hand, parse_kif, read_kif_file, write_kif};
use tsume_core::rules::legal_moves;
use tsume_core::{FormatError, Game, KifError, KomaType, Move, NodeId, Position};

/// 現在局面の合法手から USI 表記で指し手を選んで指す
fn play(game: &mut Game, usi: &str) -> NodeId {
    let mv = legal_moves(game.position())
        .unwrap()
        .into_iter()
        .find(|m| m.to_usi() == usi)
        .unwrap_or_else(|| panic!("{usi} is not legal"));
    game.add_move(mv).unwrap()
}

const HIRATE_KIF: &str = "開始日時：2024/01/01\n\
                          先手：先手さん\n\
                          後手：後手さん\n\
                          手合割：平手\n\
                          手数----指手---------消費時間--\n\
                          \u{20}  1 ７六歩(77)   ( 0:01/00:00:01)\n\
                          *角道を開ける\n\
                          \u{20}  2 ３四歩(33)   ( 0:01/00:00:01)\n\
                          \u{20}  3 ２二角成(88)+\n\
                          \u{20}  4 同　銀(31)\n\
                          \u{20}  5 ４五角打\n\
                          \u{20}  6 投了\n\
                          まで5手で先手の勝ち\n";

#[test]
fn test_parse_hirate_with_headers_and_comment() {
    let mut game = parse_kif(HIRATE_KIF).unwrap();
    assert_eq!(game.header("先手"), Some("先手さん"));
    assert_eq!(game.header("開始日時"), Some("2024/01/01"));
    assert_eq!(game.initial_position(), &Position::startpos());
    assert_eq!(game.cursor(), NodeId::ROOT);

    let moves: Vec<String> = game.mainline_moves().iter().map(Move::to_usi).collect();
    assert_eq!(moves, vec!["7g7f", "3c3d", "8h2b+", "3a2b", "B*4e", "resign"]);

    assert!(game.next().unwrap());
    assert_eq!(game.current_node().comment(), "角道を開ける");
    game.go_to_end().unwrap();
    assert_eq!(game.position().hand(tsume_core::Side::Gote).count(KomaType::Bishop), 1);
    assert_eq!(game.position().hand(tsume_core::Side::Sente).count(KomaType::Bishop), 0);
}

#[test]
fn test_gote_hand_line() {
    let hand = parse_hand("後手の持駒：飛 角 金二 銀三 桂四 香四 歩十六").unwrap();
    assert_eq!(hand.count(KomaType::Pawn), 16);
    assert_eq!(hand.count(KomaType::Rook), 1);
    assert_eq!(hand.iter().map(|(_, n)| n as u32).sum::<u32>(), 34);
}

#[test]
fn test_navigation_matches_direct_application() {
    let mut game = Game::default();
    play(&mut game, "7g7f");
    play(&mut game, "3c3d");
    let reached = game.position().clone();

    game.go_to_start().unwrap();
    assert_eq!(game.position(), &Position::startpos());
    assert!(game.next().unwrap());
    assert!(game.next().unwrap());
    assert!(!game.next().unwrap());
    assert_eq!(game.position(), &reached);

    assert!(game.prev().unwrap());
    assert!(game.prev().unwrap());
    assert!(!game.prev().unwrap());
    assert_eq!(game.position(), &Position::startpos());
}

#[test]
fn test_write_then_read_preserves_variations() {
    let mut game = Game::default();
    game.set_header("先手", "A");
    game.set_header("後手", "B");
    let first = play(&mut game, "7g7f");
    game.add_comment("初手");
    let second = play(&mut game, "3c3d");
    play(&mut game, "2g2f");

    // 3 手目の変化
    game.go_to(second).unwrap();
    play(&mut game, "8h2b+");

    // 2 手目の変化
    game.go_to(first).unwrap();
    play(&mut game, "8c8d");
    play(&mut game, "2g2f");

    let kif = write_kif(&game);
    assert!(kif.contains("変化：3手"));
    assert!(kif.contains("変化：2手"));
    assert!(kif.find("変化：3手") < kif.find("変化：2手"));

    let back = parse_kif(&kif).unwrap();
    assert_eq!(back.tree(), game.tree());
    assert_eq!(back.initial_position(), game.initial_position());
    assert_eq!(back.headers(), game.headers());
    assert_eq!(write_kif(&back), kif);
}

#[test]
fn test_write_then_read_gote_to_move_diagram() {
    let initial = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w G2p 1").unwrap();
    let mut game = Game::new(initial.clone());
    play(&mut game, "5a4a");
    play(&mut game, "G*5b");

    let kif = write_kif(&game);
    assert!(kif.contains("後手番"));
    assert!(kif.contains("先手の持駒：金"));
    assert!(kif.contains("後手の持駒：歩二"));

    let back = parse_kif(&kif).unwrap();
    assert_eq!(back.initial_position(), &initial);
    assert_eq!(back.mainline_moves(), game.mainline_moves());
}

#[test]
fn test_errors_carry_line_numbers() {
    let err = parse_kif("手合割：九枚落ち\n").unwrap_err();
    assert!(matches!(err, KifError::Format { line: 1, .. }));
    assert!(err.format_error().is_some_and(FormatError::is_lookup_miss));

    let err = parse_kif("手合割：平手\n   1 ７六歩(77)\n   3 ３四歩(33)\n").unwrap_err();
    assert!(matches!(
        err,
        KifError::Format { line: 3, source: FormatError::MoveNumber { expected: 2, found: 3 } }
    ));

    let err = parse_kif("   1 同　歩(77)\n").unwrap_err();
    assert!(matches!(err, KifError::Format { line: 1, source: FormatError::SameWithoutPrevious }));

    let err = parse_kif("   1 ７六歩(78)\n").unwrap_err();
    assert!(matches!(err, KifError::Format { source: FormatError::OriginMismatch { .. }, .. }));
}

#[test]
fn test_read_kif_file_encodings() {
    let dir = tempfile::tempdir().unwrap();

    let sjis_path = dir.path().join("game.kif");
    let (bytes, _, _) = SHIFT_JIS.encode(HIRATE_KIF);
    std::fs::write(&sjis_path, &bytes).unwrap();
    let game = read_kif_file(&sjis_path).unwrap();
    assert_eq!(game.mainline_moves().len(), 6);
    assert_eq!(game.header("後手"), Some("後手さん"));

    let utf8_path = dir.path().join("game.kifu");
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(HIRATE_KIF.as_bytes());
    std::fs::write(&utf8_path, &bytes).unwrap();
    let game = read_kif_file(&utf8_path).unwrap();
    assert_eq!(game.mainline_moves().len(), 6);

    let missing = dir.path().join("missing.kif");
    assert!(matches!(read_kif_file(&missing), Err(KifError::Io { .. })));
}
