//! 升（Square）
//!
//! 盤上の升は筋（1〜9）と段（1〜9）の組を 1〜81 の整数に全単射で対応させる。
//! 値は `9 * (筋 - 1) + 段` で、11 が 1、19 が 9、21 が 10、99 が 81 になる。
//! 駒台を表す `HAND` と、升がないことを表す `NONE` を別に持つ。

use std::fmt;

use super::Side;

/// 升
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

/// 番兵付きメールボックスの 1 筋あたりのセル数（段 9 + 上下の余白）
pub const MAILBOX_STRIDE: usize = 13;

/// 番兵付きメールボックスのセル数（筋 0〜10 の 11 列）
pub const MAILBOX_SIZE: usize = MAILBOX_STRIDE * 11;

impl Square {
    /// 升がない
    pub const NONE: Square = Square(0);

    /// 駒台（打つ手の移動元）
    pub const HAND: Square = Square(82);

    /// 盤上の升の数
    pub const NUM: usize = 81;

    /// 筋と段から升を作る（どちらも 1〜9）
    #[inline]
    pub const fn new(col: u8, row: u8) -> Option<Square> {
        if col >= 1 && col <= 9 && row >= 1 && row <= 9 {
            Some(Square(9 * (col - 1) + row))
        } else {
            None
        }
    }

    /// 1〜81 の整数から升を作る
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index >= 1 && index <= 81 { Some(Square(index)) } else { None }
    }

    /// 1〜81 の整数（HAND/NONE はそれぞれ 82/0）
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 盤上の升かどうか
    #[inline]
    pub const fn is_board(self) -> bool {
        self.0 >= 1 && self.0 <= 81
    }

    /// 駒台かどうか
    #[inline]
    pub const fn is_hand(self) -> bool {
        self.0 == Square::HAND.0
    }

    /// NONE かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Square::NONE.0
    }

    /// 筋（1〜9、盤外は 0）
    #[inline]
    pub const fn col(self) -> u8 {
        if self.is_board() { (self.0 - 1) / 9 + 1 } else { 0 }
    }

    /// 段（1〜9、盤外は 0）
    #[inline]
    pub const fn row(self) -> u8 {
        if self.is_board() { (self.0 - 1) % 9 + 1 } else { 0 }
    }

    /// 手番から見た段（1 が敵陣の最奥）
    #[inline]
    pub const fn relative_row(self, side: Side) -> u8 {
        match side {
            Side::Sente => self.row(),
            Side::Gote => 10 - self.row(),
        }
    }

    /// 敵陣（成れる段: 手番から見て 1〜3 段目）にあるかどうか
    #[inline]
    pub const fn in_promotion_zone(self, side: Side) -> bool {
        self.is_board() && self.relative_row(side) <= 3
    }

    /// メールボックス上のインデックス（`13 * 筋 + 段 + 1`）
    #[inline]
    pub const fn mailbox(self) -> usize {
        MAILBOX_STRIDE * self.col() as usize + self.row() as usize + 1
    }

    /// メールボックスのインデックスから升に戻す（番兵セルなら None）
    #[inline]
    pub const fn from_mailbox(idx: usize) -> Option<Square> {
        let col = idx / MAILBOX_STRIDE;
        let row = (idx % MAILBOX_STRIDE) as isize - 1;
        if col < 1 || col > 9 || row < 1 || row > 9 {
            None
        } else {
            Square::new(col as u8, row as u8)
        }
    }

    /// 盤上の全ての升（11, 12, …, 19, 21, …, 99 の順）
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=81u8).map(Square)
    }
}

/// 筋・段の数字 2 桁で表示（例: "76"）
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hand() {
            f.write_str("00")
        } else if self.is_none() {
            f.write_str("--")
        } else {
            write!(f, "{}{}", self.col(), self.row())
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hand() {
            f.write_str("Square(HAND)")
        } else if self.is_none() {
            f.write_str("Square(NONE)")
        } else {
            write!(f, "Square({}{})", self.col(), self.row())
        }
    }
}
