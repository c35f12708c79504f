//! 指し手生成・打ち駒・SFEN の結合テスト

use std::collections::BTreeSet;

use tsume_core::rules::{can_drop, generate_koma_moves, legal_moves};
use tsume_core::{KomaType, Position, SFEN_HIRATE, Side, Square};

const PAWN_GOLDEN_SFEN: &str = "p1p4P1/2P5P/3p3P1/3P4P/9/p4p3/1p3P3/p5p2/1p4P1P b - 1";

fn sq(col: u8, row: u8) -> Square {
    Square::new(col, row).unwrap()
}

fn pawn_moves(pos: &Position, side: Side) -> BTreeSet<String> {
    generate_koma_moves(pos, side, KomaType::Pawn).iter().map(|m| m.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_sfen_roundtrip() {
    for sfen in [
        SFEN_HIRATE,
        PAWN_GOLDEN_SFEN,
        "ln1g5/1r2S1k2/p2pppn2/2ps2p2/1p7/2P6/PPSPPPPLP/2G2K1pr/LN4G1b w BGSLPnp 62",
        "8k/9/9/9/9/9/9/9/K8 b 2R2B4G4S4N4L18P 1",
    ] {
        let pos = Position::from_sfen(sfen).unwrap();
        assert_eq!(pos.to_sfen(), sfen);
        assert_eq!(Position::from_sfen(&pos.to_sfen()).unwrap(), pos);
    }
}

#[test]
fn test_pawn_generation_golden_first_player() {
    let pos = Position::from_sfen(PAWN_GOLDEN_SFEN).unwrap();
    let expected = set(&[
        "P18(19)", "P13(14)", "P13(14)+", "P11(12)+", "P22(23)", "P22(23)+", "P38(39)",
        "P46(47)", "P63(64)", "P63(64)+", "P71(72)+",
    ]);
    assert_eq!(pawn_moves(&pos, Side::Sente), expected);
}

#[test]
fn test_pawn_generation_golden_second_player() {
    let pos = Position::from_sfen(PAWN_GOLDEN_SFEN).unwrap();
    let expected = set(&[
        "P92(91)", "P72(71)", "P64(63)", "P97(96)", "P97(96)+", "P47(46)", "P47(46)+",
        "P88(87)", "P88(87)+", "P99(98)+", "P39(38)+",
    ]);
    assert_eq!(pawn_moves(&pos, Side::Gote), expected);
}

#[test]
fn test_no_pawn_drop_into_column_with_own_pawn() {
    let pos = Position::from_sfen("k8/9/9/9/9/9/4P4/9/K8 b P 1").unwrap();
    let drops: Vec<_> = legal_moves(&pos).unwrap().into_iter().filter(|m| m.is_drop()).collect();
    assert!(!drops.is_empty());
    assert!(drops.iter().all(|m| m.end().col() != 5));
    assert!(drops.iter().all(|m| m.end().row() != 1));
    // 9 筋は 1 段目と玉の升を除いた 7 升、5 筋は不可
    assert_eq!(drops.iter().filter(|m| m.end().col() == 9).count(), 7);
}

#[test]
fn test_last_row_drops_for_both_sides() {
    let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b PLNplns 1").unwrap();
    for col in 1..=9 {
        assert!(!can_drop(&pos, Side::Sente, KomaType::Pawn, sq(col, 1)));
        assert!(!can_drop(&pos, Side::Sente, KomaType::Lance, sq(col, 1)));
        assert!(!can_drop(&pos, Side::Sente, KomaType::Knight, sq(col, 2)));
        assert!(!can_drop(&pos, Side::Gote, KomaType::Pawn, sq(col, 9)));
        assert!(!can_drop(&pos, Side::Gote, KomaType::Lance, sq(col, 9)));
        assert!(!can_drop(&pos, Side::Gote, KomaType::Knight, sq(col, 8)));
    }
    assert!(can_drop(&pos, Side::Sente, KomaType::Knight, sq(1, 3)));
    assert!(can_drop(&pos, Side::Gote, KomaType::Knight, sq(1, 7)));
    assert!(can_drop(&pos, Side::Gote, KomaType::Silver, sq(1, 9)));
}

#[test]
fn test_must_promote_on_last_rows() {
    let pos = Position::from_sfen("4k4/1P7/9/1N7/9/9/9/9/4K4 b - 1").unwrap();
    let moves = legal_moves(&pos).unwrap();
    let pawn: Vec<_> = moves.iter().filter(|m| m.start() == sq(8, 2)).collect();
    assert_eq!(pawn.len(), 1);
    assert!(pawn[0].is_promotion());
    let knight: Vec<_> = moves.iter().filter(|m| m.start() == sq(8, 4)).collect();
    assert_eq!(knight.len(), 2);
    assert!(knight.iter().all(|m| m.is_promotion()));
}

#[test]
fn test_legal_moves_leave_king_safe() {
    // 後手の飛車に睨まれた状態で玉を動かす
    let pos = Position::from_sfen("4r4/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
    let moves = legal_moves(&pos).unwrap();
    let ends: BTreeSet<_> = moves.iter().map(|m| m.end().to_string()).collect();
    assert_eq!(ends, set(&["48", "49", "68", "69"]));
}
