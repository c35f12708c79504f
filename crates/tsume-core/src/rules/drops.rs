//! 打ち駒

use crate::moves::{Move, MoveVec};
use crate::position::Position;
use crate::types::{Koma, KomaType, Side, Square};

/// 駒を打てるかどうか（打ち歩詰めは判定しない）
///
/// 持ち駒があり、打つ升が空いていて、行き所のない駒にならず、二歩にならないこと。
pub fn can_drop(pos: &Position, side: Side, kt: KomaType, sq: Square) -> bool {
    if !kt.is_hand_type() || pos.hand(side).count(kt) == 0 {
        return false;
    }
    if !pos.koma_at(sq).is_none() {
        return false;
    }
    let rank = sq.relative_row(side);
    match kt {
        KomaType::Pawn => rank > 1 && !pos.board().has_in_column(side, KomaType::Pawn, sq.col()),
        KomaType::Lance => rank > 1,
        KomaType::Knight => rank > 2,
        _ => true,
    }
}

/// 手番側の打つ手（持ち駒の表示順、升の番号順）
pub fn generate_drops(pos: &Position, side: Side) -> MoveVec {
    let mut moves = MoveVec::new();
    for (kt, _) in pos.hand(side).iter() {
        let koma = Koma::new(side, kt);
        for sq in Square::all() {
            if can_drop(pos, side, kt, sq) {
                moves.push(Move::drop(sq, koma));
            }
        }
    }
    moves
}
