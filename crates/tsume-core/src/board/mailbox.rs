//! 番兵付きメールボックス盤

use std::fmt;

use crate::error::InvariantError;
use crate::types::{Koma, KomaType, MAILBOX_SIZE, MAILBOX_STRIDE, Side, Square};

/// メールボックスのインデックス集合（実升のインデックスは 15〜127 なので u128 に収まる）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MailboxBits(u128);

impl MailboxBits {
    #[inline]
    fn insert(&mut self, idx: usize) {
        self.0 |= 1u128 << idx;
    }

    #[inline]
    fn remove(&mut self, idx: usize) {
        self.0 &= !(1u128 << idx);
    }

    /// インデックスを含むかどうか
    #[inline]
    pub fn contains(self, idx: usize) -> bool {
        idx < 128 && self.0 & (1u128 << idx) != 0
    }

    /// 要素数
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// 空かどうか
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Iterator for MailboxBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(idx)
    }
}

/// 番兵付きメールボックス盤
///
/// `set_koma` のたびに手番×駒種ごとの占有集合と空き升集合を差分更新する。
/// 集合はセル配列から一意に決まるので、等値比較はセルの比較と同値になる。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MailboxBoard {
    cells: [Koma; MAILBOX_SIZE],
    occupied: [[MailboxBits; KomaType::NUM]; Side::NUM],
    empty: MailboxBits,
}

impl MailboxBoard {
    /// 全升が空の盤（周囲は INVALID 番兵）
    pub fn new() -> Self {
        let mut board = MailboxBoard {
            cells: [Koma::INVALID; MAILBOX_SIZE],
            occupied: [[MailboxBits::default(); KomaType::NUM]; Side::NUM],
            empty: MailboxBits::default(),
        };
        for sq in Square::all() {
            let idx = sq.mailbox();
            board.cells[idx] = Koma::NONE;
            board.empty.insert(idx);
        }
        board
    }

    /// セルの中身（配列外も INVALID として扱う）
    #[inline]
    pub fn get(&self, idx: usize) -> Koma {
        self.cells.get(idx).copied().unwrap_or(Koma::INVALID)
    }

    /// 符号付きインデックスで参照する（負なら INVALID）
    #[inline]
    pub fn get_offset(&self, idx: usize, offset: i32) -> (usize, Koma) {
        match usize::try_from(idx as i64 + offset as i64) {
            Ok(next) => (next, self.get(next)),
            Err(_) => (usize::MAX, Koma::INVALID),
        }
    }

    /// 升の駒
    #[inline]
    pub fn koma_at(&self, sq: Square) -> Koma {
        if sq.is_board() { self.cells[sq.mailbox()] } else { Koma::INVALID }
    }

    /// セルに駒を置く（`Koma::NONE` で空にする）
    ///
    /// 番兵セルへの書き込みと INVALID の書き込みは不変条件違反としてエラーにする。
    pub fn set_koma(&mut self, idx: usize, koma: Koma) -> Result<(), InvariantError> {
        if koma.is_invalid() {
            return Err(InvariantError::InvalidKoma);
        }
        let old = self.get(idx);
        if old.is_invalid() {
            return Err(InvariantError::PaddingCell(idx));
        }
        if let (Some(side), Some(kt)) = (old.side(), old.koma_type()) {
            self.occupied[side.index()][kt.index()].remove(idx);
        } else {
            self.empty.remove(idx);
        }
        if let (Some(side), Some(kt)) = (koma.side(), koma.koma_type()) {
            self.occupied[side.index()][kt.index()].insert(idx);
        } else {
            self.empty.insert(idx);
        }
        self.cells[idx] = koma;
        Ok(())
    }

    /// 升に駒を置く
    pub fn set_koma_at(&mut self, sq: Square, koma: Koma) -> Result<(), InvariantError> {
        if !sq.is_board() {
            return Err(InvariantError::PaddingCell(sq.index() as usize));
        }
        self.set_koma(sq.mailbox(), koma)
    }

    /// 手番×駒種の占有インデックス集合
    #[inline]
    pub fn occupied(&self, side: Side, kt: KomaType) -> MailboxBits {
        self.occupied[side.index()][kt.index()]
    }

    /// 空き升のインデックス集合
    #[inline]
    pub fn empty_cells(&self) -> MailboxBits {
        self.empty
    }

    /// 手番×駒種の駒がある升
    pub fn squares_of(&self, side: Side, kt: KomaType) -> impl Iterator<Item = Square> + use<> {
        self.occupied(side, kt).filter_map(Square::from_mailbox)
    }

    /// 指定した筋に手番側の駒種があるかどうか
    pub fn has_in_column(&self, side: Side, kt: KomaType, col: u8) -> bool {
        let base = MAILBOX_STRIDE * col as usize;
        self.occupied(side, kt).any(|idx| idx >= base && idx < base + MAILBOX_STRIDE)
    }
}

impl Default for MailboxBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MailboxBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MailboxBoard {{")?;
        for row in 1..=9 {
            write!(f, "  ")?;
            for col in (1..=9).rev() {
                let koma = Square::new(col, row).map_or(Koma::INVALID, |sq| self.koma_at(sq));
                let text = koma.to_sfen();
                if text.is_empty() {
                    write!(f, "  .")?;
                } else {
                    write!(f, "{text:>3}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
