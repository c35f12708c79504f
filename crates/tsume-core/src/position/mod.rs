//! 局面
//!
//! 盤・先後の持ち駒・手番・手数を持つ。指し手は差分として適用し、
//! `make_move` と `unmake_move` は同じ指し手に対して厳密に逆操作になる。
//! 駒の総数などの大域的な整合性は検査しない（読み込んだ局面をそのまま信用する）。

mod sfen;

pub use sfen::SFEN_HIRATE;

use std::fmt;

use crate::board::{HandRepresentation, MailboxBoard};
use crate::error::InvariantError;
use crate::moves::Move;
use crate::types::{Koma, KomaType, Side, Square};

/// 局面
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: MailboxBoard,
    hands: [HandRepresentation; Side::NUM],
    turn: Side,
    move_number: u32,
}

impl Position {
    /// 駒のない空の局面（先手番、1 手目）
    pub fn new() -> Self {
        Position {
            board: MailboxBoard::new(),
            hands: [HandRepresentation::new(); Side::NUM],
            turn: Side::Sente,
            move_number: 1,
        }
    }

    /// 平手初期局面
    pub fn startpos() -> Self {
        Position::from_sfen(SFEN_HIRATE).expect("SFEN_HIRATE is a valid SFEN")
    }

    /// 盤
    #[inline]
    pub fn board(&self) -> &MailboxBoard {
        &self.board
    }

    /// 升の駒（盤外なら `Koma::INVALID`）
    #[inline]
    pub fn koma_at(&self, sq: Square) -> Koma {
        self.board.koma_at(sq)
    }

    /// 升に駒を置く
    pub fn set_koma(&mut self, sq: Square, koma: Koma) -> Result<(), InvariantError> {
        self.board.set_koma_at(sq, koma)
    }

    /// 持ち駒
    #[inline]
    pub fn hand(&self, side: Side) -> &HandRepresentation {
        &self.hands[side.index()]
    }

    /// 持ち駒（変更用）
    #[inline]
    pub fn hand_mut(&mut self, side: Side) -> &mut HandRepresentation {
        &mut self.hands[side.index()]
    }

    /// 手番
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// 手数（次に指す手の番号）
    #[inline]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn set_move_number(&mut self, n: u32) {
        self.move_number = n;
    }

    /// 玉の升（詰将棋では攻め方に玉がないこともある）
    pub fn king_squares(&self, side: Side) -> impl Iterator<Item = Square> + use<> {
        self.board.squares_of(side, KomaType::King)
    }

    /// 指し手を適用する
    ///
    /// 終局理由の手は手数だけを進める。駒を取ったときは取った駒を成る前の駒種で
    /// 指した側の持ち駒に加える。
    pub fn make_move(&mut self, mv: &Move) -> Result<(), InvariantError> {
        if mv.is_termination() || mv.is_null() {
            self.move_number += 1;
            return Ok(());
        }
        let (side, kt) = piece_of(mv)?;
        if mv.is_drop() {
            self.hands[side.index()].dec(kt)?;
            self.board.set_koma_at(mv.end(), mv.koma())?;
        } else {
            self.board.set_koma_at(mv.start(), Koma::NONE)?;
            if let Some(captured) = mv.captured().koma_type() {
                self.hands[side.index()].inc(captured.unpromote())?;
            }
            self.board.set_koma_at(mv.end(), mv.koma_after())?;
        }
        self.turn = side.opponent();
        self.move_number += 1;
        Ok(())
    }

    /// `make_move` で適用した指し手を取り消す
    pub fn unmake_move(&mut self, mv: &Move) -> Result<(), InvariantError> {
        if mv.is_termination() || mv.is_null() {
            self.move_number -= 1;
            return Ok(());
        }
        let (side, kt) = piece_of(mv)?;
        if mv.is_drop() {
            self.board.set_koma_at(mv.end(), Koma::NONE)?;
            self.hands[side.index()].inc(kt)?;
        } else {
            self.board.set_koma_at(mv.end(), mv.captured())?;
            if let Some(captured) = mv.captured().koma_type() {
                self.hands[side.index()].dec(captured.unpromote())?;
            }
            self.board.set_koma_at(mv.start(), mv.koma())?;
        }
        self.turn = side;
        self.move_number -= 1;
        Ok(())
    }
}

fn piece_of(mv: &Move) -> Result<(Side, KomaType), InvariantError> {
    match (mv.side(), mv.koma_type()) {
        (Some(side), Some(kt)) => Ok((side, kt)),
        _ => Err(InvariantError::EmptyMove(mv.to_string())),
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_sfen())
    }
}
