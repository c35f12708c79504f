//! 盤と持ち駒
//!
//! - `MailboxBoard`: 周囲を INVALID 番兵で囲んだ 1 次元配列の盤。
//!   盤外への 1 歩（桂馬の跳びを含む）は必ず番兵セルに当たるので、
//!   指し手生成で境界判定の分岐が要らない。
//! - `HandRepresentation`: 持ち駒 7 種の枚数

mod hand;
mod mailbox;

pub use hand::HandRepresentation;
pub use mailbox::{MailboxBits, MailboxBoard};
