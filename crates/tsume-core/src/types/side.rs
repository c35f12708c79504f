//! 手番（Side）

use serde::{Deserialize, Serialize};

/// 手番（先手/後手）
///
/// 駒落ちでは下手が先手側、上手が後手側に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    Sente = 0,
    Gote = 1,
}

impl Side {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 全ての手番
    pub const ALL: [Side; 2] = [Side::Sente, Side::Gote];

    /// 駒落ちの下手（先手と同じ）
    pub const SHITATE: Side = Side::Sente;

    /// 駒落ちの上手（後手と同じ）
    pub const UWATE: Side = Side::Gote;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 前進方向の段の増分（先手は段が減る方向、後手は増える方向）
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::Sente => -1,
            Side::Gote => 1,
        }
    }

    /// SFEN の手番文字
    #[inline]
    pub const fn sfen_char(self) -> char {
        match self {
            Side::Sente => 'b',
            Side::Gote => 'w',
        }
    }

    /// 「先手」「後手」
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Side::Sente => "先手",
            Side::Gote => "後手",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Sente.opponent(), Side::Gote);
    }

    #[test]
    fn test_handicap_aliases() {
        assert_eq!(Side::SHITATE, Side::Sente);
        assert_eq!(Side::UWATE, Side::Gote);
    }

    #[test]
    fn test_side_forward() {
        assert_eq!(Side::Sente.forward(), -1);
        assert_eq!(Side::Gote.forward(), 1);
    }
}
