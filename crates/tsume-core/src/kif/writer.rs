//! KIF の書き出し
//!
//! 変化は本譜の後に、分岐の深いものから順に `変化：N手` ブロックとして書く。
//! この順序なら読み込み側は「現在の手順を N 手目の直前まで戻す」だけで木を再構成できる。

use std::fmt::{self, Write};

use crate::game::{Game, GameTree, NodeId};
use crate::moves::{Move, Termination};
use crate::position::Position;
use crate::rules::promotion_options;
use crate::types::{Koma, Side, Square, tables};

const MOVE_HEADER: &str = "手数----指手---------消費時間--";

/// 升の表記（`７六`）
fn square_label(sq: Square) -> String {
    let col = tables::fullwidth_digit(sq.col()).unwrap_or('？');
    let row = tables::kanji_digit(sq.row()).unwrap_or('？');
    format!("{col}{row}")
}

/// 指し手の表記（`７六歩(77)`、`同　銀(31)`、`５五角打`、`投了`）
fn move_text(mv: &Move, previous: Option<&Move>) -> String {
    if let Some(t) = mv.termination_reason() {
        return t.kif_keyword().to_string();
    }
    let (Some(side), Some(kt)) = (mv.side(), mv.koma_type()) else {
        return String::new();
    };
    let mut out = if previous.is_some_and(|p| !p.is_termination() && p.end() == mv.end()) {
        "同　".to_string()
    } else {
        square_label(mv.end())
    };
    out.push_str(tables::koma_glyph(kt));
    if mv.is_drop() {
        out.push('打');
        return out;
    }
    if mv.is_promotion() {
        out.push('成');
    } else if promotion_options(kt, side, mv.start(), mv.end()).len() > 1 {
        out.push_str("不成");
    }
    out.push_str(&format!("({})", mv.start()));
    out
}

fn hand_line(label: &str, pos: &Position, side: Side) -> String {
    let entries: Vec<String> = pos
        .hand(side)
        .iter()
        .map(|(kt, n)| format!("{}{}", tables::koma_glyph(kt), tables::kanji_count(n)))
        .collect();
    if entries.is_empty() {
        format!("{label}の持駒：なし")
    } else {
        format!("{label}の持駒：{}", entries.join("　"))
    }
}

/// 14 行の局面図
fn write_diagram<W: Write>(out: &mut W, pos: &Position) -> fmt::Result {
    writeln!(out, "{}", hand_line("後手", pos, Side::Gote))?;
    writeln!(out, "  ９ ８ ７ ６ ５ ４ ３ ２ １")?;
    writeln!(out, "+---------------------------+")?;
    for row in 1..=9u8 {
        out.write_char('|')?;
        for col in (1..=9u8).rev() {
            let koma = Square::new(col, row).map_or(Koma::NONE, |sq| pos.koma_at(sq));
            match (koma.side(), koma.koma_type()) {
                (Some(side), Some(kt)) => {
                    out.write_char(if side == Side::Gote { 'v' } else { ' ' })?;
                    out.write_char(tables::koma_diagram_glyph(kt))?;
                }
                _ => out.write_str(" ・")?,
            }
        }
        writeln!(out, "|{}", tables::kanji_digit(row).unwrap_or('？'))?;
    }
    writeln!(out, "+---------------------------+")?;
    writeln!(out, "{}", hand_line("先手", pos, Side::Sente))
}

fn write_node<W: Write>(out: &mut W, tree: &GameTree, id: NodeId) -> fmt::Result {
    let node = tree.node(id);
    let previous = Some(tree.node(node.parent()).mv()).filter(|_| !node.parent().is_root());
    writeln!(out, "{:>4} {}", node.move_number(), move_text(node.mv(), previous))?;
    for line in node.comment().lines() {
        writeln!(out, "*{line}")?;
    }
    Ok(())
}

/// `first` から本譜をたどって書き、続けてその手順から分かれる変化を深い順に書く
///
/// `include_first_siblings` が false のとき、`first` 自身の兄弟は呼び出し側が書く。
fn write_line<W: Write>(
    out: &mut W,
    tree: &GameTree,
    first: NodeId,
    include_first_siblings: bool,
) -> fmt::Result {
    let mut line = vec![first];
    line.extend(tree.mainline_from(first));
    for &id in &line {
        write_node(out, tree, id)?;
    }
    for (i, &id) in line.iter().enumerate().rev() {
        if i == 0 && !include_first_siblings {
            break;
        }
        let parent = tree.node(id).parent();
        for &alt in tree.node(parent).variations().iter().skip(1) {
            writeln!(out)?;
            writeln!(out, "変化：{}手", tree.node(alt).move_number())?;
            write_line(out, tree, alt, false)?;
        }
    }
    Ok(())
}

/// 棋譜を KIF 形式で書き出す
pub fn write_record<W: Write>(out: &mut W, game: &Game) -> fmt::Result {
    for (key, value) in game.headers() {
        writeln!(out, "{key}：{value}")?;
    }

    let initial = game.initial_position();
    match tables::handicap_name(&initial.to_sfen()) {
        Some(name) => writeln!(out, "手合割：{name}")?,
        None => {
            write_diagram(out, initial)?;
            if initial.turn() == Side::Gote {
                writeln!(out, "後手番")?;
            }
        }
    }

    let tree = game.tree();
    for line in tree.node(NodeId::ROOT).comment().lines() {
        writeln!(out, "*{line}")?;
    }
    writeln!(out, "{MOVE_HEADER}")?;

    if let Some(first) = tree.main_child(NodeId::ROOT) {
        write_line(out, tree, first, true)?;
        let last = tree.mainline_from(first).last().unwrap_or(first);
        write_summary(out, game, tree.node(last).mv(), tree.node(last).move_number())?;
    }
    Ok(())
}

/// 棋譜を KIF 形式の文字列にする
pub fn write_kif(game: &Game) -> String {
    let mut out = String::new();
    write_record(&mut out, game).expect("writing into a String cannot fail");
    out
}

/// 投了で終わる本譜に「まで N 手で X の勝ち」を添える
fn write_summary<W: Write>(out: &mut W, game: &Game, last: &Move, number: u32) -> fmt::Result {
    if last.termination_reason() != Some(Termination::Resign) || number < 2 {
        return Ok(());
    }
    let played = number - 1;
    let start = game.initial_position().turn();
    let winner = if played % 2 == 1 { start } else { start.opponent() };
    writeln!(out)?;
    writeln!(out, "まで{played}手で{}の勝ち", winner.label())
}
