//! 盤上の駒の指し手生成
//!
//! 駒種ごとに「移動先の生成」と「成りの制約」の組を表で持つ。
//! 移動先は `(筋の差, 前方への段の差)` のオフセットで表し、後手は前方を反転する。
//! 盤外への移動は番兵セルに当たるので境界判定は要らない。

use smallvec::SmallVec;

use crate::board::MailboxBoard;
use crate::moves::{Move, MoveVec};
use crate::position::Position;
use crate::types::{Koma, KomaType, MAILBOX_STRIDE, Side, Square};

/// 移動先（メールボックスのインデックス）
type Destinations = SmallVec<[usize; 32]>;

type DestinationFn = fn(&MailboxBoard, usize, Side, &mut Destinations);
type PromotionFn = fn(Side, Square, Square) -> &'static [bool];

/// 駒種ごとの生成規則
struct MoveRule {
    destinations: DestinationFn,
    promotions: PromotionFn,
}

const FORWARD: (i32, i32) = (0, 1);
const BACKWARD: (i32, i32) = (0, -1);
const LEFT: (i32, i32) = (1, 0);
const RIGHT: (i32, i32) = (-1, 0);
const FORWARD_LEFT: (i32, i32) = (1, 1);
const FORWARD_RIGHT: (i32, i32) = (-1, 1);
const BACKWARD_LEFT: (i32, i32) = (1, -1);
const BACKWARD_RIGHT: (i32, i32) = (-1, -1);

const PAWN_STEPS: [(i32, i32); 1] = [FORWARD];
const KNIGHT_STEPS: [(i32, i32); 2] = [(1, 2), (-1, 2)];
const SILVER_STEPS: [(i32, i32); 5] =
    [FORWARD, FORWARD_LEFT, FORWARD_RIGHT, BACKWARD_LEFT, BACKWARD_RIGHT];
const GOLD_STEPS: [(i32, i32); 6] = [FORWARD, FORWARD_LEFT, FORWARD_RIGHT, LEFT, RIGHT, BACKWARD];
const KING_STEPS: [(i32, i32); 8] = [
    FORWARD,
    FORWARD_LEFT,
    FORWARD_RIGHT,
    LEFT,
    RIGHT,
    BACKWARD,
    BACKWARD_LEFT,
    BACKWARD_RIGHT,
];
const ORTHOGONAL: [(i32, i32); 4] = [FORWARD, BACKWARD, LEFT, RIGHT];
const DIAGONAL: [(i32, i32); 4] = [FORWARD_LEFT, FORWARD_RIGHT, BACKWARD_LEFT, BACKWARD_RIGHT];

/// `(筋の差, 前方への段の差)` をメールボックス上のオフセットに変換する
#[inline]
fn offset(side: Side, (dcol, dfwd): (i32, i32)) -> i32 {
    dcol * MAILBOX_STRIDE as i32 + dfwd * side.forward()
}

/// 移動先として使えるか（盤外と自駒を除く）
#[inline]
fn is_target(koma: Koma, side: Side) -> bool {
    !koma.is_invalid() && !koma.is_side(side)
}

fn steps(
    board: &MailboxBoard,
    idx: usize,
    side: Side,
    dirs: &[(i32, i32)],
    out: &mut Destinations,
) {
    for &dir in dirs {
        let (next, koma) = board.get_offset(idx, offset(side, dir));
        if is_target(koma, side) {
            out.push(next);
        }
    }
}

fn slides(
    board: &MailboxBoard,
    idx: usize,
    side: Side,
    dirs: &[(i32, i32)],
    out: &mut Destinations,
) {
    for &dir in dirs {
        let delta = offset(side, dir);
        let mut cur = idx;
        loop {
            let (next, koma) = board.get_offset(cur, delta);
            if koma.is_none() {
                out.push(next);
                cur = next;
                continue;
            }
            if is_target(koma, side) {
                out.push(next);
            }
            break;
        }
    }
}

fn pawn_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    steps(board, idx, side, &PAWN_STEPS, out);
}

fn lance_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    slides(board, idx, side, &PAWN_STEPS, out);
}

fn knight_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    steps(board, idx, side, &KNIGHT_STEPS, out);
}

fn silver_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    steps(board, idx, side, &SILVER_STEPS, out);
}

fn gold_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    steps(board, idx, side, &GOLD_STEPS, out);
}

fn king_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    steps(board, idx, side, &KING_STEPS, out);
}

fn bishop_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    slides(board, idx, side, &DIAGONAL, out);
}

fn rook_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    slides(board, idx, side, &ORTHOGONAL, out);
}

fn horse_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    slides(board, idx, side, &DIAGONAL, out);
    steps(board, idx, side, &ORTHOGONAL, out);
}

fn dragon_destinations(board: &MailboxBoard, idx: usize, side: Side, out: &mut Destinations) {
    slides(board, idx, side, &ORTHOGONAL, out);
    steps(board, idx, side, &DIAGONAL, out);
}

const NO_PROMOTION: &[bool] = &[false];
const MUST_PROMOTE: &[bool] = &[true];
const MAY_PROMOTE: &[bool] = &[false, true];

fn never_promotes(_: Side, _: Square, _: Square) -> &'static [bool] {
    NO_PROMOTION
}

fn zone_promotions(side: Side, start: Square, end: Square) -> &'static [bool] {
    if start.in_promotion_zone(side) || end.in_promotion_zone(side) {
        MAY_PROMOTE
    } else {
        NO_PROMOTION
    }
}

/// 歩・香は最奥段へは成るしかない
fn pawn_lance_promotions(side: Side, start: Square, end: Square) -> &'static [bool] {
    if end.relative_row(side) == 1 { MUST_PROMOTE } else { zone_promotions(side, start, end) }
}

/// 桂は奥の 2 段へは成るしかない
fn knight_promotions(side: Side, start: Square, end: Square) -> &'static [bool] {
    if end.relative_row(side) <= 2 { MUST_PROMOTE } else { zone_promotions(side, start, end) }
}

/// `KomaType::index()` の順
const RULES: [MoveRule; KomaType::NUM] = [
    MoveRule { destinations: pawn_destinations, promotions: pawn_lance_promotions },
    MoveRule { destinations: lance_destinations, promotions: pawn_lance_promotions },
    MoveRule { destinations: knight_destinations, promotions: knight_promotions },
    MoveRule { destinations: silver_destinations, promotions: zone_promotions },
    MoveRule { destinations: bishop_destinations, promotions: zone_promotions },
    MoveRule { destinations: rook_destinations, promotions: zone_promotions },
    MoveRule { destinations: gold_destinations, promotions: never_promotes },
    MoveRule { destinations: king_destinations, promotions: never_promotes },
    MoveRule { destinations: gold_destinations, promotions: never_promotes },
    MoveRule { destinations: gold_destinations, promotions: never_promotes },
    MoveRule { destinations: gold_destinations, promotions: never_promotes },
    MoveRule { destinations: gold_destinations, promotions: never_promotes },
    MoveRule { destinations: horse_destinations, promotions: never_promotes },
    MoveRule { destinations: dragon_destinations, promotions: never_promotes },
];

#[inline]
fn rule(kt: KomaType) -> &'static MoveRule {
    &RULES[kt.index()]
}

/// 駒種・手番・移動元・移動先に対して取りうる成りフラグの集合
pub fn promotion_options(kt: KomaType, side: Side, start: Square, end: Square) -> &'static [bool] {
    (rule(kt).promotions)(side, start, end)
}

/// 升の駒が利いている升（成りは考えない）
pub(crate) fn attacked_squares(board: &MailboxBoard, sq: Square) -> Destinations {
    let mut out = Destinations::new();
    let koma = board.koma_at(sq);
    if let (Some(side), Some(kt)) = (koma.side(), koma.koma_type()) {
        (rule(kt).destinations)(board, sq.mailbox(), side, &mut out);
    }
    out
}

fn push_moves_from(pos: &Position, start: Square, moves: &mut MoveVec) {
    let koma = pos.koma_at(start);
    let (Some(side), Some(kt)) = (koma.side(), koma.koma_type()) else {
        return;
    };
    let mut dests = Destinations::new();
    (rule(kt).destinations)(pos.board(), start.mailbox(), side, &mut dests);
    for idx in dests {
        let Some(end) = Square::from_mailbox(idx) else {
            continue;
        };
        let captured = pos.board().get(idx);
        for &promotion in promotion_options(kt, side, start, end) {
            moves.push(Move::new(start, end, promotion, koma, captured));
        }
    }
}

/// 升にある駒の疑似合法手（王手放置を含む）
pub fn generate_moves_from(pos: &Position, start: Square) -> MoveVec {
    let mut moves = MoveVec::new();
    push_moves_from(pos, start, &mut moves);
    moves
}

/// 手番×駒種の全ての駒の疑似合法手
pub fn generate_koma_moves(pos: &Position, side: Side, kt: KomaType) -> MoveVec {
    let mut moves = MoveVec::new();
    for start in pos.board().squares_of(side, kt) {
        push_moves_from(pos, start, &mut moves);
    }
    moves
}

/// 手番側の盤上の駒の疑似合法手
pub fn generate_board_moves(pos: &Position, side: Side) -> MoveVec {
    let mut moves = MoveVec::new();
    for kt in KomaType::ALL {
        for start in pos.board().squares_of(side, kt) {
            push_moves_from(pos, start, &mut moves);
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    fn names(moves: &MoveVec) -> Vec<String> {
        let mut v: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_startpos_has_30_board_moves() {
        let pos = Position::startpos();
        assert_eq!(generate_board_moves(&pos, Side::Sente).len(), 30);
        assert_eq!(generate_board_moves(&pos, Side::Gote).len(), 30);
    }

    #[test]
    fn test_knight_in_corner_stays_on_board() {
        let mut pos = Position::new();
        pos.set_koma(sq(1, 3), Koma::new(Side::Sente, KomaType::Knight)).unwrap();
        // 1筋からの跳ねは 2筋 1段 のみ、しかも成るしかない
        assert_eq!(names(&generate_moves_from(&pos, sq(1, 3))), vec!["N21(13)+"]);
    }

    #[test]
    fn test_gote_knight_mirrored() {
        let mut pos = Position::new();
        pos.set_koma(sq(5, 5), Koma::new(Side::Gote, KomaType::Knight)).unwrap();
        assert_eq!(
            names(&generate_moves_from(&pos, sq(5, 5))),
            vec!["N47(55)", "N47(55)+", "N67(55)", "N67(55)+"]
        );
    }

    #[test]
    fn test_lance_stops_at_first_piece() {
        let mut pos = Position::new();
        pos.set_koma(sq(9, 9), Koma::new(Side::Sente, KomaType::Lance)).unwrap();
        pos.set_koma(sq(9, 6), Koma::new(Side::Gote, KomaType::Pawn)).unwrap();
        assert_eq!(names(&generate_moves_from(&pos, sq(9, 9))), vec!["L96(99)", "L97(99)", "L98(99)"]);
        let captures: Vec<_> = generate_moves_from(&pos, sq(9, 9))
            .into_iter()
            .filter(|m| m.is_capture())
            .collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].captured(), Koma::new(Side::Gote, KomaType::Pawn));
    }

    #[test]
    fn test_own_piece_blocks() {
        let mut pos = Position::new();
        pos.set_koma(sq(5, 5), Koma::new(Side::Sente, KomaType::Rook)).unwrap();
        pos.set_koma(sq(5, 4), Koma::new(Side::Sente, KomaType::Pawn)).unwrap();
        let moves = generate_moves_from(&pos, sq(5, 5));
        assert!(moves.iter().all(|m| m.end() != sq(5, 4) && m.end() != sq(5, 3)));
        // 下へ 4、左右へ 4+4
        assert_eq!(moves.len(), 12);
    }

    #[test]
    fn test_dragon_and_horse_moves() {
        let mut pos = Position::new();
        pos.set_koma(sq(5, 5), Koma::new(Side::Sente, KomaType::Dragon)).unwrap();
        assert_eq!(generate_moves_from(&pos, sq(5, 5)).len(), 16 + 4);

        let mut pos = Position::new();
        pos.set_koma(sq(5, 5), Koma::new(Side::Gote, KomaType::Horse)).unwrap();
        assert_eq!(generate_moves_from(&pos, sq(5, 5)).len(), 16 + 4);
    }

    #[test]
    fn test_promotion_options() {
        let s = Side::Sente;
        let g = Side::Gote;
        assert_eq!(promotion_options(KomaType::Pawn, s, sq(1, 2), sq(1, 1)), MUST_PROMOTE);
        assert_eq!(promotion_options(KomaType::Pawn, s, sq(1, 4), sq(1, 3)), MAY_PROMOTE);
        assert_eq!(promotion_options(KomaType::Pawn, s, sq(1, 5), sq(1, 4)), NO_PROMOTION);
        assert_eq!(promotion_options(KomaType::Knight, s, sq(2, 4), sq(1, 2)), MUST_PROMOTE);
        assert_eq!(promotion_options(KomaType::Knight, g, sq(2, 6), sq(1, 8)), MUST_PROMOTE);
        // 敵陣から出る手も成れる
        assert_eq!(promotion_options(KomaType::Silver, s, sq(5, 3), sq(4, 4)), MAY_PROMOTE);
        assert_eq!(promotion_options(KomaType::Gold, s, sq(5, 3), sq(5, 2)), NO_PROMOTION);
        assert_eq!(promotion_options(KomaType::Dragon, s, sq(5, 3), sq(5, 2)), NO_PROMOTION);
        assert_eq!(promotion_options(KomaType::Lance, g, sq(5, 1), sq(5, 9)), MUST_PROMOTE);
    }
}
