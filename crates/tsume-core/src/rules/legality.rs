//! 王手判定と合法手判定

use crate::error::InvariantError;
use crate::moves::{Move, MoveVec};
use crate::position::Position;
use crate::types::{KomaType, Side};

use super::drops::generate_drops;
use super::movegen::{attacked_squares, generate_board_moves};

/// `side` の玉に相手の駒が利いているかどうか
///
/// 玉がなければ王手ではない。
pub fn is_in_check(pos: &Position, side: Side) -> bool {
    let board = pos.board();
    let kings = board.occupied(side, KomaType::King);
    if kings.is_empty() {
        return false;
    }
    let them = side.opponent();
    KomaType::ALL.into_iter().any(|kt| {
        board
            .squares_of(them, kt)
            .any(|sq| attacked_squares(board, sq).into_iter().any(|idx| kings.contains(idx)))
    })
}

/// 指した側の玉が取られる状態にならないかどうか
///
/// 局面に指し手を適用して王手を調べ、元に戻す。
pub fn is_legal(pos: &mut Position, mv: &Move) -> Result<bool, InvariantError> {
    let Some(side) = mv.side() else {
        return Ok(mv.is_termination());
    };
    pos.make_move(mv)?;
    let in_check = is_in_check(pos, side);
    pos.unmake_move(mv)?;
    Ok(!in_check)
}

/// 手番側の合法手（盤上の駒の手、続いて打つ手）
pub fn legal_moves(pos: &Position) -> Result<MoveVec, InvariantError> {
    let side = pos.turn();
    let mut work = pos.clone();
    let mut moves = MoveVec::new();
    let candidates = generate_board_moves(pos, side).into_iter().chain(generate_drops(pos, side));
    for mv in candidates {
        if is_legal(&mut work, &mv)? {
            moves.push(mv);
        }
    }
    Ok(moves)
}

/// 手番側が詰んでいるかどうか（打ち歩詰めは考えない）
pub fn is_checkmate(pos: &Position) -> Result<bool, InvariantError> {
    Ok(is_in_check(pos, pos.turn()) && legal_moves(pos)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Koma, Square};

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    #[test]
    fn test_startpos_not_in_check() {
        let pos = Position::startpos();
        assert!(!is_in_check(&pos, Side::Sente));
        assert!(!is_in_check(&pos, Side::Gote));
        assert_eq!(legal_moves(&pos).unwrap().len(), 30);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // 59玉 58金 51飛（後手）: 金は縦にしか動けない
        let pos = Position::from_sfen("4r4/9/9/9/9/9/9/4G4/4K4 b - 1").unwrap();
        let moves = legal_moves(&pos).unwrap();
        let gold: Vec<String> = moves
            .iter()
            .filter(|m| m.koma_type() == Some(KomaType::Gold))
            .map(|m| m.to_string())
            .collect();
        assert_eq!(gold, vec!["G57(58)"]);
    }

    #[test]
    fn test_check_detection_by_slider_and_knight() {
        let pos = Position::from_sfen("4k4/9/9/9/4R4/9/9/9/4K4 w - 1").unwrap();
        assert!(is_in_check(&pos, Side::Gote));
        assert!(!is_in_check(&pos, Side::Sente));

        let pos = Position::from_sfen("4k4/9/3N5/9/9/9/9/9/4K4 w - 1").unwrap();
        assert!(is_in_check(&pos, Side::Gote));
    }

    #[test]
    fn test_is_legal_restores_position() {
        let mut pos = Position::from_sfen("4r4/9/9/9/9/9/9/4G4/4K4 b - 1").unwrap();
        let before = pos.clone();
        let gold = Koma::new(Side::Sente, KomaType::Gold);
        let mv = Move::new(sq(5, 8), sq(4, 8), false, gold, Koma::NONE);
        assert!(!is_legal(&mut pos, &mv).unwrap());
        assert_eq!(pos, before);
    }

    #[test]
    fn test_checkmate() {
        // 頭金の詰み
        let pos = Position::from_sfen("4k4/4G4/4P4/9/9/9/9/9/4K4 w - 1").unwrap();
        assert!(is_checkmate(&pos).unwrap());
        // 金の代わりに銀なら逃げられる
        let pos = Position::from_sfen("4k4/4S4/4P4/9/9/9/9/9/4K4 w - 1").unwrap();
        assert!(!is_checkmate(&pos).unwrap());
    }
}
