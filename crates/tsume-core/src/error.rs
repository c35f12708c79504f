//! エラー型
//!
//! - `FormatError`: SFEN / KIF / 表記スタイル名など入力の形式エラー（テーブル引きの失敗を含む）
//! - `InvariantError`: コア内部の不変条件違反（呼び出し側のバグ）
//! - `KifError`: KIF ファイル読み込み全体のエラー

use std::path::PathBuf;

use crate::types::KomaType;

/// 入力の形式エラー
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// SFEN の形式が不正
    #[error("invalid SFEN '{sfen}': {reason}")]
    Sfen { sfen: String, reason: String },

    /// 手合割の名前がテーブルにない
    #[error("unknown handicap: {0}")]
    UnknownHandicap(String),

    /// 表記スタイル名がテーブルにない
    #[error("unknown notation style: {0}")]
    UnknownStyle(String),

    /// 駒の字がテーブルにない
    #[error("unknown piece glyph: {0}")]
    UnknownGlyph(String),

    /// 指し手の文字列がどのパターンにも一致しない
    #[error("unmatched move text: {0}")]
    UnmatchedMove(String),

    /// 持ち駒にできない駒を打とうとした
    #[error("piece cannot be dropped: {0}")]
    IllegalDropType(String),

    /// 直前の指し手がないのに「同」が使われた
    #[error("'同' used without a previous move")]
    SameWithoutPrevious,

    /// 移動元に手番側の駒がない、または駒の種類が一致しない
    #[error("origin {origin} does not hold {expected}")]
    OriginMismatch { origin: String, expected: String },

    /// 局面図ブロックの形式が不正
    #[error("invalid diagram: {0}")]
    Diagram(String),

    /// 持ち駒の記述が不正
    #[error("invalid hand entry: {0}")]
    Hand(String),

    /// 手数がカーソル位置の次の手数になっていない
    #[error("move number {found} does not follow move {expected}")]
    MoveNumber { expected: u32, found: u32 },

    /// 変化の開始手数が現在の手順上に見つからない
    #[error("variation start move {0} is not on the current line")]
    VariationNotFound(u32),
}

impl FormatError {
    /// テーブル引きの失敗（未知のキー）かどうか
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            FormatError::UnknownHandicap(_)
                | FormatError::UnknownStyle(_)
                | FormatError::UnknownGlyph(_)
        )
    }
}

/// コア内部の不変条件違反
///
/// 正しい呼び出しでは発生しない。握りつぶさずに呼び出し元へ伝播させる。
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// 盤外（番兵）のセルへの書き込み
    #[error("mailbox cell {0} is outside the board")]
    PaddingCell(usize),

    /// INVALID 番兵を盤上に置こうとした
    #[error("the INVALID sentinel cannot be stored on the board")]
    InvalidKoma,

    /// 持ち駒の枚数が負になる
    #[error("hand count of {0:?} would become negative")]
    NegativeHand(KomaType),

    /// 持ち駒の枚数が上限を超える
    #[error("hand count of {0:?} overflowed")]
    HandOverflow(KomaType),

    /// 持ち駒にできない駒種
    #[error("{0:?} cannot be held in hand")]
    NotHandType(KomaType),

    /// 駒を伴わない指し手を盤に適用しようとした
    #[error("move {0} carries no piece")]
    EmptyMove(String),

    /// 曖昧さ解消のどの規則にも当てはまらなかった
    #[error("disambiguation of {0} exhausted every rule")]
    UnresolvedAmbiguity(String),
}

/// KIF ファイル読み込みエラー
#[derive(thiserror::Error, Debug)]
pub enum KifError {
    /// ファイルを開けない・読めない
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 候補のどの文字コードでもデコードできなかった（最後に試した文字コードを保持）
    #[error("{path} could not be decoded as {encoding}")]
    Decode { path: PathBuf, encoding: &'static str },

    /// 行単位の形式エラー（行番号は 1 始まり）
    #[error("line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: FormatError,
    },

    /// 内部不変条件違反
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl KifError {
    /// 形式エラーなら中身を返す
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            KifError::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_classification() {
        assert!(FormatError::UnknownHandicap("九枚落ち".into()).is_lookup_miss());
        assert!(FormatError::UnknownStyle("hodges".into()).is_lookup_miss());
        assert!(!FormatError::SameWithoutPrevious.is_lookup_miss());
    }

    #[test]
    fn test_kif_error_display_carries_line() {
        let err = KifError::Format {
            line: 12,
            source: FormatError::UnmatchedMove("７六歩歩".into()),
        };
        assert_eq!(err.to_string(), "line 12: unmatched move text: ７六歩歩");
        assert!(err.format_error().is_some());
    }
}
