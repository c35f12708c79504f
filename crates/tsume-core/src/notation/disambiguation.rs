//! 日本式の曖昧さ解消（直・左・右・中・上・引・寄）
//!
//! 同じ升へ動ける同種の駒が複数あるときだけ使う。判定は次の順:
//! 1. 金・銀と成駒（小駒）が真っすぐ 1 升前に進むなら「直」
//! 2. 候補の中で最も左（右）にいるなら「左」（「右」）
//! 3. 動きで「上」「引」「寄」に分類し、同じ分類の中でさらに左・右・中を付ける

use crate::error::InvariantError;
use crate::types::{KomaType, Side, Square};

/// 手番から見た左への位置（大きいほど左）
#[inline]
fn leftness(side: Side, sq: Square) -> i32 {
    match side {
        Side::Sente => sq.col() as i32,
        Side::Gote => 10 - sq.col() as i32,
    }
}

/// 手番から見て前に進んだ段数（後退なら負）
#[inline]
fn forwardness(side: Side, start: Square, end: Square) -> i32 {
    start.relative_row(side) as i32 - end.relative_row(side) as i32
}

fn movement_suffix(forward: i32) -> &'static str {
    match forward.signum() {
        1 => "上",
        -1 => "引",
        _ => "寄",
    }
}

/// `others` の中で `start` が左端・右端・中間のどれか
fn lateral(side: Side, start: Square, others: &[Square]) -> Option<&'static str> {
    let me = leftness(side, start);
    let left = others.iter().filter(|&&o| leftness(side, o) > me).count();
    let right = others.iter().filter(|&&o| leftness(side, o) < me).count();
    if left == 0 && right == others.len() {
        Some("左")
    } else if right == 0 && left == others.len() {
        Some("右")
    } else if left > 0 && right > 0 {
        Some("中")
    } else {
        None
    }
}

/// 曖昧さ解消の文字列
///
/// `candidates` は同じ升へ動ける同種の駒の移動元（`start` を含む）。
pub(crate) fn japanese_disambiguation(
    side: Side,
    kt: KomaType,
    start: Square,
    end: Square,
    candidates: &[Square],
) -> Result<String, InvariantError> {
    if kt.is_general() && start.col() == end.col() && forwardness(side, start, end) == 1 {
        return Ok("直".to_string());
    }

    let others: Vec<Square> = candidates.iter().copied().filter(|&c| c != start).collect();
    if let Some(word @ ("左" | "右")) = lateral(side, start, &others) {
        return Ok(word.to_string());
    }

    let class = forwardness(side, start, end).signum();
    let suffix = movement_suffix(class);
    let same_class: Vec<Square> = others
        .iter()
        .copied()
        .filter(|&c| forwardness(side, c, end).signum() == class)
        .collect();
    if same_class.is_empty() {
        return Ok(suffix.to_string());
    }
    match lateral(side, start, &same_class) {
        Some(word) => Ok(format!("{word}{suffix}")),
        None => Err(InvariantError::UnresolvedAmbiguity(format!("{kt:?} {start}->{end}"))),
    }
}
