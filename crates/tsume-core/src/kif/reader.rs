//! KIF の読み込み

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::board::HandRepresentation;
use crate::error::{FormatError, KifError};
use crate::game::Game;
use crate::moves::{Move, Termination};
use crate::position::Position;
use crate::rules::generate_moves_from;
use crate::types::{Koma, KomaType, Side, Square, tables};

/// 局面図ブロックの行数（後手の持駒〜先手の持駒）
const DIAGRAM_LINES: usize = 14;

static MOVE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s+(同\s*\S+|\S+)").expect("invalid MOVE_LINE_RE pattern")
});

static MOVE_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<col>[1-9１-９])(?P<row>[一二三四五六七八九])|同\s*)(?P<piece>成[香桂銀]|[歩香桂銀金角飛玉王と杏圭全馬龍竜])[左右直上引寄行入中]*(?P<suffix>打|不成|成|生)?(?:\((?P<from>[1-9]{2})\))?$",
    )
    .expect("invalid MOVE_TEXT_RE pattern")
});

static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^変化[：:]\s*(\d+)\s*手").expect("invalid VARIATION_RE pattern")
});

/// 行の種類
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment(&'a str),
    Bookmark,
    Escape,
    Handicap(&'a str),
    DiagramStart,
    SenteHand(&'a str),
    Turn(Side),
    MoveHeader,
    Variation(u32),
    Move { number: u32, text: &'a str },
    Header { key: &'a str, value: &'a str },
    Unknown,
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line.strip_prefix('*') {
        return Line::Comment(rest);
    }
    if line.starts_with('&') {
        return Line::Bookmark;
    }
    if line.starts_with('#') {
        return Line::Escape;
    }
    if let Some(rest) = line.strip_prefix("手合割：") {
        return Line::Handicap(rest.trim());
    }
    if line.starts_with("後手の持駒") || line.starts_with("上手の持駒") {
        return Line::DiagramStart;
    }
    if line.starts_with("先手の持駒") || line.starts_with("下手の持駒") {
        return Line::SenteHand(line);
    }
    match line.trim() {
        "先手番" | "下手番" => return Line::Turn(Side::Sente),
        "後手番" | "上手番" => return Line::Turn(Side::Gote),
        _ => {}
    }
    if line.starts_with("手数----") {
        return Line::MoveHeader;
    }
    if let Some(caps) = VARIATION_RE.captures(line) {
        if let Ok(n) = caps[1].parse() {
            return Line::Variation(n);
        }
    }
    if let Some(caps) = MOVE_LINE_RE.captures(line) {
        if let (Ok(number), Some(text)) = (caps[1].parse(), caps.get(2)) {
            return Line::Move { number, text: text.as_str() };
        }
    }
    if let Some((key, value)) = line.split_once('：') {
        if !key.trim().is_empty() {
            return Line::Header { key: key.trim(), value: value.trim() };
        }
    }
    Line::Unknown
}

/// 持ち駒の記述を読む
///
/// `後手の持駒：飛 角 金二` のような行全体でも、`：` 以降だけでもよい。
/// 駒名の後の漢数字が枚数（省略時 1 枚、「十六」のような 2 文字も可）。
pub fn parse_hand(text: &str) -> Result<HandRepresentation, FormatError> {
    let entries = text.split_once('：').map_or(text, |(_, rest)| rest).trim();
    let mut hand = HandRepresentation::new();
    if entries.is_empty() || entries == "なし" {
        return Ok(hand);
    }
    for entry in entries.split_whitespace() {
        let mut chars = entry.chars();
        let glyph = chars.next().ok_or_else(|| FormatError::Hand(entry.to_string()))?;
        let kt = tables::parse_koma_glyph(&glyph.to_string())
            .ok_or_else(|| FormatError::UnknownGlyph(glyph.to_string()))?;
        if !kt.is_hand_type() {
            return Err(FormatError::Hand(entry.to_string()));
        }
        let rest = chars.as_str();
        let count = if rest.is_empty() {
            1
        } else {
            tables::parse_kanji_count(rest).ok_or_else(|| FormatError::Hand(entry.to_string()))?
        };
        let total = hand.count(kt).saturating_add(count);
        hand.set(kt, total).map_err(|e| FormatError::Hand(e.to_string()))?;
    }
    Ok(hand)
}

/// 局面図の 1 段（`|v香v桂 ・…|一`）を読む
fn parse_diagram_row(pos: &mut Position, row: u8, line: &str) -> Result<(), FormatError> {
    let body = line
        .trim()
        .strip_prefix('|')
        .ok_or_else(|| FormatError::Diagram(format!("row {row} does not start with '|'")))?;
    let cells: Vec<char> = body.chars().take(18).collect();
    if cells.len() != 18 {
        return Err(FormatError::Diagram(format!("row {row} is too short")));
    }
    for (i, pair) in cells.chunks(2).enumerate() {
        let (mark, glyph) = (pair[0], pair[1]);
        if glyph == '・' {
            continue;
        }
        let kt = tables::parse_koma_glyph(&glyph.to_string())
            .ok_or_else(|| FormatError::UnknownGlyph(glyph.to_string()))?;
        let side = if mark == 'v' { Side::Gote } else { Side::Sente };
        let sq = Square::new(9 - i as u8, row)
            .ok_or_else(|| FormatError::Diagram(format!("row {row} is out of range")))?;
        pos.set_koma(sq, Koma::new(side, kt)).map_err(|e| FormatError::Diagram(e.to_string()))?;
    }
    Ok(())
}

/// 14 行の局面図ブロックを読む（手番は先手、手数は 1）
fn parse_diagram(lines: &[String]) -> Result<Position, FormatError> {
    if lines.len() != DIAGRAM_LINES {
        return Err(FormatError::Diagram(format!(
            "expected {DIAGRAM_LINES} lines, got {}",
            lines.len()
        )));
    }
    let mut pos = Position::new();
    *pos.hand_mut(Side::Gote) = parse_hand(&lines[0])?;
    for (i, line) in lines[3..12].iter().enumerate() {
        parse_diagram_row(&mut pos, i as u8 + 1, line)?;
    }
    let last = &lines[DIAGRAM_LINES - 1];
    if !(last.starts_with("先手の持駒") || last.starts_with("下手の持駒")) {
        return Err(FormatError::Diagram(format!("expected first player's hand, got '{last}'")));
    }
    *pos.hand_mut(Side::Sente) = parse_hand(last)?;
    Ok(pos)
}

struct KifReader {
    game: Game,
    line: usize,
    diagram: Option<(usize, Vec<String>)>,
}

impl KifReader {
    fn new() -> Self {
        KifReader { game: Game::default(), line: 0, diagram: None }
    }

    fn format_error(&self, source: FormatError) -> KifError {
        KifError::Format { line: self.line, source }
    }

    /// 初期局面を変更する（指し手を読んだ後は不可）
    fn edit_initial(
        &mut self,
        edit: impl FnOnce(&mut Position) -> Result<(), FormatError>,
    ) -> Result<(), KifError> {
        if !self.game.tree().is_empty() {
            let e = FormatError::Diagram("initial position given after the first move".to_string());
            return Err(self.format_error(e));
        }
        let mut pos = self.game.initial_position().clone();
        edit(&mut pos).map_err(|e| self.format_error(e))?;
        self.game.reset(pos);
        Ok(())
    }

    fn read_line(&mut self, raw: &str) -> Result<(), KifError> {
        let text = raw.trim_end_matches(['\r', '\n']);

        if let Some((_, lines)) = self.diagram.as_mut() {
            lines.push(text.to_string());
            if lines.len() == DIAGRAM_LINES {
                if let Some((start, lines)) = self.diagram.take() {
                    let pos = parse_diagram(&lines)
                        .map_err(|source| KifError::Format { line: start, source })?;
                    self.edit_initial(|p| {
                        *p = pos;
                        Ok(())
                    })?;
                }
            }
            return Ok(());
        }

        match classify(text) {
            Line::Blank | Line::MoveHeader => {}
            Line::Bookmark | Line::Escape => debug!("skipped line {}: {text}", self.line),
            Line::Comment(comment) => self.game.add_comment(comment),
            Line::Handicap(name) => self.read_handicap(name)?,
            Line::DiagramStart => self.diagram = Some((self.line, vec![text.to_string()])),
            Line::SenteHand(hand) => {
                let hand = parse_hand(hand).map_err(|e| self.format_error(e))?;
                self.edit_initial(|p| {
                    *p.hand_mut(Side::Sente) = hand;
                    Ok(())
                })?;
            }
            Line::Turn(side) => self.edit_initial(|p| {
                p.set_turn(side);
                Ok(())
            })?,
            Line::Variation(n) => {
                if !self.game.rewind_before(n)? {
                    return Err(self.format_error(FormatError::VariationNotFound(n)));
                }
            }
            Line::Move { number, text } => self.read_move(number, text)?,
            Line::Header { key, value } => self.game.set_header(key, value),
            Line::Unknown => debug!("unrecognized line {}: {text}", self.line),
        }
        Ok(())
    }

    fn read_handicap(&mut self, name: &str) -> Result<(), KifError> {
        if name == "その他" {
            return Ok(());
        }
        let sfen = tables::handicap_sfen(name)
            .ok_or_else(|| self.format_error(FormatError::UnknownHandicap(name.to_string())))?;
        let pos = Position::from_sfen(sfen).map_err(|e| self.format_error(e))?;
        self.edit_initial(|p| {
            *p = pos;
            Ok(())
        })
    }

    fn read_move(&mut self, number: u32, text: &str) -> Result<(), KifError> {
        let expected = self.game.current_node().move_number() + 1;
        if number != expected {
            return Err(self.format_error(FormatError::MoveNumber { expected, found: number }));
        }
        let start_side = self.game.initial_position().turn();
        let side = if number % 2 == 1 { start_side } else { start_side.opponent() };
        if side != self.game.position().turn() {
            warn!("line {}: move {number} is played by {side:?} out of turn", self.line);
        }

        // 行末の '+' は変化があることを示す印
        let text = text.trim_end_matches('+');
        let mv = self.parse_move_text(side, text).map_err(|e| self.format_error(e))?;
        self.game.add_move(mv)?;
        Ok(())
    }

    fn parse_move_text(&self, side: Side, text: &str) -> Result<Move, FormatError> {
        if let Some(t) = Termination::from_kif_keyword(text) {
            return Ok(Move::termination(t));
        }
        let caps =
            MOVE_TEXT_RE.captures(text).ok_or_else(|| FormatError::UnmatchedMove(text.to_string()))?;

        let end = match (caps.name("col"), caps.name("row")) {
            (Some(col), Some(row)) => {
                let col = col.as_str().chars().next().and_then(tables::parse_digit);
                let row = row.as_str().chars().next().and_then(tables::parse_kanji_digit);
                col.zip(row)
                    .and_then(|(c, r)| Square::new(c, r))
                    .ok_or_else(|| FormatError::UnmatchedMove(text.to_string()))?
            }
            _ => self.game.last_move().map(Move::end).ok_or(FormatError::SameWithoutPrevious)?,
        };
        if !end.is_board() {
            return Err(FormatError::SameWithoutPrevious);
        }

        let glyph = &caps["piece"];
        let kt = tables::parse_koma_glyph(glyph)
            .ok_or_else(|| FormatError::UnknownGlyph(glyph.to_string()))?;
        let suffix = caps.name("suffix").map(|m| m.as_str());
        let pos = self.game.position();

        let Some(from) = caps.name("from") else {
            return drop_move(pos, side, kt, end, text);
        };
        if suffix == Some("打") {
            return Err(FormatError::UnmatchedMove(text.to_string()));
        }
        let digits: Vec<u8> = from.as_str().bytes().map(|b| b - b'0').collect();
        let start = Square::new(digits[0], digits[1])
            .ok_or_else(|| FormatError::UnmatchedMove(text.to_string()))?;
        let koma = Koma::new(side, kt);
        if pos.koma_at(start) != koma {
            return Err(FormatError::OriginMismatch {
                origin: start.to_string(),
                expected: text.to_string(),
            });
        }
        let promotion = suffix == Some("成");
        generate_moves_from(pos, start)
            .into_iter()
            .find(|m| m.end() == end && m.is_promotion() == promotion)
            .ok_or_else(|| FormatError::UnmatchedMove(text.to_string()))
    }
}

fn drop_move(
    pos: &Position,
    side: Side,
    kt: KomaType,
    end: Square,
    text: &str,
) -> Result<Move, FormatError> {
    if !kt.is_hand_type() || pos.hand(side).count(kt) == 0 || !pos.koma_at(end).is_none() {
        return Err(FormatError::IllegalDropType(text.to_string()));
    }
    Ok(Move::drop(end, Koma::new(side, kt)))
}

/// KIF テキストから棋譜を作る
///
/// 読み終えた棋譜のカーソルは初期局面に置く。
pub fn parse_kif(text: &str) -> Result<Game, KifError> {
    let mut reader = KifReader::new();
    for (i, line) in text.trim_start_matches('\u{feff}').lines().enumerate() {
        reader.line = i + 1;
        reader.read_line(line)?;
    }
    if let Some((start, lines)) = reader.diagram.take() {
        return Err(KifError::Format {
            line: start,
            source: FormatError::Diagram(format!("truncated after {} lines", lines.len())),
        });
    }
    let mut game = reader.game;
    game.go_to_start()?;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("*コメント"), Line::Comment("コメント"));
        assert_eq!(classify("&しおり"), Line::Bookmark);
        assert_eq!(classify("#KIF version=2.0"), Line::Escape);
        assert_eq!(classify("手合割：平手　"), Line::Handicap("平手"));
        assert_eq!(classify("後手の持駒：なし"), Line::DiagramStart);
        assert_eq!(classify("後手番"), Line::Turn(Side::Gote));
        assert_eq!(classify("手数----指手---------消費時間--"), Line::MoveHeader);
        assert_eq!(classify("変化：3手"), Line::Variation(3));
        assert_eq!(
            classify("   1 ７六歩(77)   ( 0:00/00:00:00)"),
            Line::Move { number: 1, text: "７六歩(77)" }
        );
        assert_eq!(classify("  12 同　歩(23)"), Line::Move { number: 12, text: "同　歩(23)" });
        assert_eq!(classify("先手：羽生"), Line::Header { key: "先手", value: "羽生" });
        assert_eq!(classify("まで64手で先手の勝ち"), Line::Unknown);
    }

    #[test]
    fn test_parse_hand() {
        let hand = parse_hand("後手の持駒：飛 角 金二 銀三 桂四 香四 歩十六").unwrap();
        assert_eq!(hand.count(KomaType::Rook), 1);
        assert_eq!(hand.count(KomaType::Bishop), 1);
        assert_eq!(hand.count(KomaType::Gold), 2);
        assert_eq!(hand.count(KomaType::Silver), 3);
        assert_eq!(hand.count(KomaType::Knight), 4);
        assert_eq!(hand.count(KomaType::Lance), 4);
        assert_eq!(hand.count(KomaType::Pawn), 16);
        assert!(parse_hand("先手の持駒：なし").unwrap().is_empty());
        assert!(parse_hand("銀　歩二").is_ok());
        assert_eq!(parse_hand("玉"), Err(FormatError::Hand("玉".to_string())));
        assert!(parse_hand("象").unwrap_err().is_lookup_miss());
    }

    #[test]
    fn test_parse_moves_with_same_and_promotion() {
        let text = "手合割：平手\n\
                    手数----指手---------消費時間--\n\
                    \u{20}  1 ７六歩(77)\n\
                    \u{20}  2 ３四歩(33)\n\
                    \u{20}  3 ２二角成(88)\n\
                    \u{20}  4 同　銀(31)\n\
                    \u{20}  5 投了\n";
        let mut game = parse_kif(text).unwrap();
        let moves = game.mainline_moves();
        assert_eq!(moves.len(), 5);
        assert!(moves[2].is_promotion());
        assert!(moves[2].is_capture());
        assert_eq!(moves[3].end(), Square::new(2, 2).unwrap());
        assert_eq!(moves[3].captured(), Koma::new(Side::Sente, KomaType::Horse));
        assert_eq!(moves[4].termination_reason(), Some(Termination::Resign));

        game.go_to_end().unwrap();
        assert_eq!(game.position().hand(Side::Gote).count(KomaType::Bishop), 1);
        assert_eq!(game.position().hand(Side::Sente).count(KomaType::Bishop), 1);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_kif("手合割：九枚落ち\n").unwrap_err();
        assert!(matches!(err, KifError::Format { line: 1, .. }));
        assert!(err.format_error().is_some_and(FormatError::is_lookup_miss));

        let err = parse_kif("手合割：平手\n   1 同　歩(77)\n").unwrap_err();
        assert!(matches!(err, KifError::Format { line: 2, source: FormatError::SameWithoutPrevious }));

        let err = parse_kif("手合割：平手\n   1 ７六ほげ(77)\n").unwrap_err();
        assert!(matches!(err, KifError::Format { source: FormatError::UnmatchedMove(_), .. }));

        let err = parse_kif("手合割：平手\n   2 ７六歩(77)\n").unwrap_err();
        assert!(matches!(
            err.format_error(),
            Some(FormatError::MoveNumber { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_illegal_drop_type() {
        let text = "後手の持駒：なし\n\
                    \u{20} ９ ８ ７ ６ ５ ４ ３ ２ １\n\
                    +---------------------------+\n\
                    | ・ ・ ・ ・v玉 ・ ・ ・ ・|一\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|二\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|三\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|四\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|五\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|六\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|七\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|八\n\
                    | ・ ・ ・ ・ ・ ・ ・ ・ ・|九\n\
                    +---------------------------+\n\
                    先手の持駒：金\n\
                    手数----指手---------消費時間--\n\
                    \u{20}  1 ５二馬打\n";
        let err = parse_kif(text).unwrap_err();
        assert!(matches!(
            err,
            KifError::Format { line: 16, source: FormatError::IllegalDropType(_) }
        ));
    }
}
