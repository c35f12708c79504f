//! 基本型とテーブル
//!
//! - `Side`: 手番（先手/後手、駒落ちの下手/上手）
//! - `KomaType` / `Koma`: 駒種と手番付きの駒
//! - `Square`: 升（1〜81）、駒台（HAND）、番兵（NONE）
//! - `tables`: 漢数字・駒の字・SFEN 文字・手合割・いろは表などの静的テーブル

mod koma;
mod side;
mod square;
pub mod tables;

pub use koma::{Koma, KomaType};
pub use side::Side;
pub use square::{MAILBOX_SIZE, MAILBOX_STRIDE, Square};
