//! 詰将棋学習ツール向けの将棋ルール・棋譜エンジン
//!
//! - `types`: 手番・駒・升・各種変換テーブル
//! - `board`: 番兵付きメールボックス盤と持ち駒
//! - `position`: 局面（盤・持ち駒・手番・手数）と SFEN 入出力
//! - `moves`: 指し手と終局理由
//! - `rules`: 指し手生成・打ち駒の制約・王手判定・合法手判定
//! - `game`: 分岐を持つ棋譜木とカーソル付きの対局
//! - `kif`: KIF 形式の読み込みと書き出し
//! - `notation`: 4 種類の表記（西洋式・北尾川崎式・日本式・いろは式）
//! - `json`: 盤面描画側へ渡す JSON 表現
//!
//! すべての処理は同期的に完結し、内部でロックは取らない。

pub mod board;
pub mod error;
pub mod game;
pub mod json;
pub mod kif;
pub mod moves;
pub mod notation;
pub mod position;
pub mod rules;
pub mod types;

pub use error::{FormatError, InvariantError, KifError};
pub use game::{Game, GameTree, Node, NodeId};
pub use moves::{Move, MoveVec, Termination};
pub use notation::{NotationStyle, NotationWriter};
pub use position::{Position, SFEN_HIRATE};
pub use types::{Koma, KomaType, Side, Square};
