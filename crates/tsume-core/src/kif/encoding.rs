//! KIF ファイルの文字コード判定
//!
//! 候補の文字コードを順に試し、置換文字なしでデコードできた最初のものを使う。
//! 既定は Shift_JIS → UTF-8 の順。拡張子 `.kifu` か UTF-8 の BOM があれば UTF-8 を先に試す。

use std::path::Path;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use log::{debug, trace};

use crate::error::KifError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 試す文字コードの順序
fn candidates(path: &Path, bytes: &[u8]) -> [&'static Encoding; 2] {
    let kifu = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("kifu"));
    if kifu || bytes.starts_with(UTF8_BOM) { [UTF_8, SHIFT_JIS] } else { [SHIFT_JIS, UTF_8] }
}

/// バイト列を文字列にデコードする（`path` は候補順の決定とエラー表示にだけ使う）
pub fn decode_kif(path: &Path, bytes: &[u8]) -> Result<String, KifError> {
    let mut last = SHIFT_JIS;
    for encoding in candidates(path, bytes) {
        last = encoding;
        let body = if encoding == UTF_8 { bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes) } else { bytes };
        match encoding.decode_without_bom_handling_and_without_replacement(body) {
            Some(text) => {
                debug!("decoded {} as {}", path.display(), encoding.name());
                return Ok(text.into_owned());
            }
            None => trace!("{} is not valid {}", path.display(), encoding.name()),
        }
    }
    Err(KifError::Decode { path: path.to_path_buf(), encoding: last.name() })
}

/// ファイルを読み込んでデコードする
pub fn read_kif_text(path: &Path) -> Result<String, KifError> {
    let bytes = std::fs::read(path)
        .map_err(|source| KifError::Io { path: path.to_path_buf(), source })?;
    decode_kif(path, &bytes)
}
