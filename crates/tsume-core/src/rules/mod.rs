//! 指し手生成と合法性
//!
//! - `movegen`: 駒種ごとの移動先生成と成りの制約（表駆動）
//! - `drops`: 打ち駒の制約（二歩・行き所のない駒）
//! - `legality`: 王手判定と、指す→王手判定→戻す による合法手判定
//!
//! 打ち歩詰めは判定しない。

mod drops;
mod legality;
mod movegen;

pub use drops::{can_drop, generate_drops};
pub use legality::{is_checkmate, is_in_check, is_legal, legal_moves};
pub use movegen::{
    generate_board_moves, generate_koma_moves, generate_moves_from, promotion_options,
};
