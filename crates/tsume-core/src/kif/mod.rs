//! KIF 形式の棋譜
//!
//! 読み込みは行単位の状態機械で、行頭の決まった文字列で行の種類を判定する。
//! 知らない行は読み飛ばす。

mod encoding;
mod reader;
mod writer;

use std::path::Path;

pub use encoding::{decode_kif, read_kif_text};
pub use reader::{parse_hand, parse_kif};
pub use writer::{write_kif, write_record};

use crate::error::KifError;
use crate::game::Game;

/// KIF ファイルを読み込む
pub fn read_kif_file(path: impl AsRef<Path>) -> Result<Game, KifError> {
    let text = read_kif_text(path.as_ref())?;
    parse_kif(&text)
}
