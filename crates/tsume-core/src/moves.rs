//! 指し手と終局理由
//!
//! 指し手は局面に対する純粋な差分として扱う。移動元・移動先・成り・動かした駒・
//! 取った駒（なければ `Koma::NONE`）を持ち、移動元が `Square::HAND` なら打つ手。
//! 終局理由を持つ指し手（投了など）は座標を持たない。

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{Koma, KomaType, Side, Square, tables};

/// 指し手リスト
/// 1 局面の合法手は通常 128 手未満なので、ヒープ確保を避けられる
pub type MoveVec = SmallVec<[Move; 128]>;

/// 終局理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// 投了
    Resign,
    /// 時間切れ
    Timeout,
    /// 詰み
    Mate,
    /// 入玉宣言勝ち
    DeclareWin,
    /// 反則勝ち
    IllegalWin,
    /// 反則負け
    IllegalLoss,
    /// 千日手
    Repetition,
    /// 持将棋
    Jishogi,
    /// トライルール
    Try,
    /// 中断
    Interrupt,
}

impl Termination {
    /// 全ての終局理由
    pub const ALL: [Termination; 10] = [
        Termination::Resign,
        Termination::Timeout,
        Termination::Mate,
        Termination::DeclareWin,
        Termination::IllegalWin,
        Termination::IllegalLoss,
        Termination::Repetition,
        Termination::Jishogi,
        Termination::Try,
        Termination::Interrupt,
    ];

    /// KIF で使う語
    pub const fn kif_keyword(self) -> &'static str {
        match self {
            Termination::Resign => "投了",
            Termination::Timeout => "切れ負け",
            Termination::Mate => "詰み",
            Termination::DeclareWin => "入玉勝ち",
            Termination::IllegalWin => "反則勝ち",
            Termination::IllegalLoss => "反則負け",
            Termination::Repetition => "千日手",
            Termination::Jishogi => "持将棋",
            Termination::Try => "トライ",
            Termination::Interrupt => "中断",
        }
    }

    /// 西洋式表記で使う語
    pub const fn english_label(self) -> &'static str {
        match self {
            Termination::Resign => "resigns",
            Termination::Timeout => "time forfeit",
            Termination::Mate => "checkmate",
            Termination::DeclareWin => "declaration win",
            Termination::IllegalWin => "illegal move win",
            Termination::IllegalLoss => "illegal move loss",
            Termination::Repetition => "repetition",
            Termination::Jishogi => "impasse",
            Termination::Try => "try",
            Termination::Interrupt => "interrupted",
        }
    }

    /// KIF の語から終局理由を引く（「切れ負け」は「時間切れ」とも書かれる）
    pub fn from_kif_keyword(s: &str) -> Option<Termination> {
        if s == "時間切れ" {
            return Some(Termination::Timeout);
        }
        Termination::ALL.into_iter().find(|t| t.kif_keyword() == s)
    }
}

/// 指し手
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    start: Square,
    end: Square,
    promotion: bool,
    koma: Koma,
    captured: Koma,
    termination: Option<Termination>,
}

impl Move {
    /// 何もしない指し手（棋譜木の根に置く番兵）
    pub const NULL: Move = Move {
        start: Square::NONE,
        end: Square::NONE,
        promotion: false,
        koma: Koma::NONE,
        captured: Koma::NONE,
        termination: None,
    };

    /// 盤上の駒を動かす手
    #[inline]
    pub const fn new(start: Square, end: Square, promotion: bool, koma: Koma, captured: Koma) -> Self {
        Move { start, end, promotion, koma, captured, termination: None }
    }

    /// 持ち駒を打つ手
    #[inline]
    pub const fn drop(end: Square, koma: Koma) -> Self {
        Move {
            start: Square::HAND,
            end,
            promotion: false,
            koma,
            captured: Koma::NONE,
            termination: None,
        }
    }

    /// 終局理由を表す手
    #[inline]
    pub const fn termination(termination: Termination) -> Self {
        Move { termination: Some(termination), ..Move::NULL }
    }

    /// 移動元（打つ手なら `Square::HAND`）
    #[inline]
    pub const fn start(&self) -> Square {
        self.start
    }

    /// 移動先
    #[inline]
    pub const fn end(&self) -> Square {
        self.end
    }

    /// 成るかどうか
    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion
    }

    /// 動かした駒（成る前）
    #[inline]
    pub const fn koma(&self) -> Koma {
        self.koma
    }

    /// 取った駒（なければ `Koma::NONE`）
    #[inline]
    pub const fn captured(&self) -> Koma {
        self.captured
    }

    /// 終局理由
    #[inline]
    pub const fn termination_reason(&self) -> Option<Termination> {
        self.termination
    }

    /// 打つ手かどうか
    #[inline]
    pub const fn is_drop(&self) -> bool {
        self.start.is_hand()
    }

    /// 駒を取る手かどうか
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 終局理由を表す手かどうか
    #[inline]
    pub const fn is_termination(&self) -> bool {
        self.termination.is_some()
    }

    /// 番兵の指し手かどうか
    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Move::NULL
    }

    /// 指した側
    #[inline]
    pub const fn side(&self) -> Option<Side> {
        self.koma.side()
    }

    /// 動かした駒の駒種（成る前）
    #[inline]
    pub const fn koma_type(&self) -> Option<KomaType> {
        self.koma.koma_type()
    }

    /// 着手後の駒（成る手なら成駒）
    #[inline]
    pub fn koma_after(&self) -> Koma {
        if self.promotion { self.koma.promote() } else { self.koma }
    }

    /// USI 形式（`7g7f`、`7g7f+`、`P*5e`）。終局理由の手は `resign` などになる
    pub fn to_usi(&self) -> String {
        if let Some(t) = self.termination {
            return match t {
                Termination::Resign => "resign".to_string(),
                Termination::DeclareWin => "win".to_string(),
                _ => "none".to_string(),
            };
        }
        if self.is_null() {
            return "none".to_string();
        }
        let to = usi_square(self.end);
        if self.is_drop() {
            let letter = self.koma_type().map_or('?', KomaType::sfen_letter);
            return format!("{letter}*{to}");
        }
        let from = usi_square(self.start);
        if self.promotion { format!("{from}{to}+") } else { format!("{from}{to}") }
    }
}

fn usi_square(sq: Square) -> String {
    let rank = (b'a' + sq.row().saturating_sub(1)) as char;
    format!("{}{rank}", sq.col())
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

/// 簡易表記（`P13(14)+`、打つ手は `P*55`）
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(t) = self.termination {
            return f.write_str(t.kif_keyword());
        }
        let Some(kt) = self.koma_type() else {
            return f.write_str("null");
        };
        let letter = tables::western_letter(kt);
        if self.is_drop() {
            return write!(f, "{letter}*{}", self.end);
        }
        write!(f, "{letter}{}({})", self.end, self.start)?;
        if self.promotion {
            f.write_str("+")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}")?;
        if self.is_capture() {
            write!(f, " x{:?}", self.captured)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: u8, row: u8) -> Square {
        Square::new(col, row).unwrap()
    }

    #[test]
    fn test_move_display() {
        let pawn = Koma::new(Side::Sente, KomaType::Pawn);
        assert_eq!(Move::new(sq(1, 4), sq(1, 3), true, pawn, Koma::NONE).to_string(), "P13(14)+");
        assert_eq!(Move::new(sq(1, 9), sq(1, 8), false, pawn, Koma::NONE).to_string(), "P18(19)");
        assert_eq!(Move::drop(sq(5, 5), pawn).to_string(), "P*55");
        assert_eq!(Move::termination(Termination::Resign).to_string(), "投了");
    }

    #[test]
    fn test_move_to_usi() {
        let pawn = Koma::new(Side::Sente, KomaType::Pawn);
        assert_eq!(Move::new(sq(7, 7), sq(7, 6), false, pawn, Koma::NONE).to_usi(), "7g7f");
        assert_eq!(Move::drop(sq(5, 5), pawn).to_usi(), "P*5e");
        let bishop = Koma::new(Side::Sente, KomaType::Bishop);
        let captured = Koma::new(Side::Gote, KomaType::Bishop);
        assert_eq!(Move::new(sq(8, 8), sq(2, 2), true, bishop, captured).to_usi(), "8h2b+");
    }

    #[test]
    fn test_move_kinds() {
        let silver = Koma::new(Side::Gote, KomaType::Silver);
        let drop = Move::drop(sq(8, 4), silver);
        assert!(drop.is_drop());
        assert!(!drop.is_capture());
        assert_eq!(drop.side(), Some(Side::Gote));
        assert!(Move::termination(Termination::Jishogi).is_termination());
        assert!(Move::NULL.is_null());
        assert!(!Move::termination(Termination::Resign).is_null());
    }

    #[test]
    fn test_termination_keywords() {
        for t in Termination::ALL {
            assert_eq!(Termination::from_kif_keyword(t.kif_keyword()), Some(t));
        }
        assert_eq!(Termination::from_kif_keyword("時間切れ"), Some(Termination::Timeout));
        assert_eq!(Termination::from_kif_keyword("まで"), None);
    }
}
