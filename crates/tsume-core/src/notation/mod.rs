//! 指し手の表記
//!
//! 西洋式・北尾川崎式・日本式・いろは式の 4 種類。どれも同じ組み立て処理を使い、
//! 「駒名・曖昧さ解消・移動の種類・移動先・成り」の 5 つの部品の並び順と描き方だけが違う。
//! 曖昧さ解消の要否と成りの表記の要否は組み立ての前に一度だけ決める。

mod disambiguation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, InvariantError};
use crate::game::Game;
use crate::moves::Move;
use crate::position::Position;
use crate::rules::{generate_moves_from, is_legal, promotion_options};
use crate::types::{KomaType, Side, Square, tables};

use disambiguation::japanese_disambiguation;

/// 表記スタイル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotationStyle {
    /// `P-76`、`Bx22+`、`G78-77`
    Western,
    /// `歩-76`、`金(78)-77`
    KitaoKawasaki,
    /// `７六歩`、`同銀`、`５二金左`
    #[default]
    Japanese,
    /// 日本式と同じで、移動先をいろは式の升名で書く
    Iroha,
}

impl NotationStyle {
    pub const ALL: [NotationStyle; 4] = [
        NotationStyle::Western,
        NotationStyle::KitaoKawasaki,
        NotationStyle::Japanese,
        NotationStyle::Iroha,
    ];

    /// 設定やコマンドラインで使う名前
    pub const fn key(self) -> &'static str {
        match self {
            NotationStyle::Western => "western",
            NotationStyle::KitaoKawasaki => "kitao-kawasaki",
            NotationStyle::Japanese => "japanese",
            NotationStyle::Iroha => "iroha",
        }
    }

    /// 日本式の系統（「同」と漢字の曖昧さ解消を使う）かどうか
    pub const fn is_japanese_family(self) -> bool {
        matches!(self, NotationStyle::Japanese | NotationStyle::Iroha)
    }

    fn params(self) -> &'static StyleParams {
        match self {
            NotationStyle::Western => &WESTERN,
            NotationStyle::KitaoKawasaki => &KITAO_KAWASAKI,
            NotationStyle::Japanese => &JAPANESE,
            NotationStyle::Iroha => &IROHA,
        }
    }
}

impl fmt::Display for NotationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NotationStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "western" => Ok(NotationStyle::Western),
            "kitao-kawasaki" | "kk" => Ok(NotationStyle::KitaoKawasaki),
            "japanese" => Ok(NotationStyle::Japanese),
            "iroha" => Ok(NotationStyle::Iroha),
            _ => Err(FormatError::UnknownStyle(s.to_string())),
        }
    }
}

/// 表記の部品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Piece,
    Disambiguation,
    MoveType,
    Destination,
    Promotion,
}

const WESTERN_ORDER: [Token; 5] =
    [Token::Piece, Token::Disambiguation, Token::MoveType, Token::Destination, Token::Promotion];
const JAPANESE_ORDER: [Token; 5] =
    [Token::Destination, Token::Piece, Token::Disambiguation, Token::MoveType, Token::Promotion];

/// スタイルごとの描き方
struct StyleParams {
    order: [Token; 5],
    destination: fn(Square) -> String,
    piece: fn(KomaType) -> &'static str,
    /// 西洋式系統の曖昧さ解消（移動元の描き方）
    origin: fn(Square) -> String,
    drop: &'static str,
    capture: &'static str,
    quiet: &'static str,
    promote: &'static str,
    decline: &'static str,
}

fn digits_destination(sq: Square) -> String {
    sq.to_string()
}

fn kanji_destination(sq: Square) -> String {
    let col = tables::fullwidth_digit(sq.col()).unwrap_or('？');
    let row = tables::kanji_digit(sq.row()).unwrap_or('？');
    format!("{col}{row}")
}

fn iroha_destination(sq: Square) -> String {
    tables::iroha_name(sq).unwrap_or("？").to_string()
}

fn parenthesized_origin(sq: Square) -> String {
    format!("({sq})")
}

const WESTERN: StyleParams = StyleParams {
    order: WESTERN_ORDER,
    destination: digits_destination,
    piece: tables::western_letter,
    origin: digits_destination,
    drop: "*",
    capture: "x",
    quiet: "-",
    promote: "+",
    decline: "=",
};

const KITAO_KAWASAKI: StyleParams = StyleParams {
    order: WESTERN_ORDER,
    destination: digits_destination,
    piece: tables::koma_glyph,
    origin: parenthesized_origin,
    ..WESTERN
};

const JAPANESE: StyleParams = StyleParams {
    order: JAPANESE_ORDER,
    destination: kanji_destination,
    piece: tables::koma_glyph,
    origin: parenthesized_origin,
    drop: "打",
    capture: "",
    quiet: "",
    promote: "成",
    decline: "不成",
};

const IROHA: StyleParams = StyleParams { destination: iroha_destination, ..JAPANESE };

/// 組み立て前に決めておく情報
struct Resolved {
    kt: KomaType,
    same: bool,
    disambiguation: Option<String>,
    promotion: Option<bool>,
}

/// 指し手を文字列にする
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotationWriter {
    style: NotationStyle,
    aggressive: bool,
}

impl NotationWriter {
    pub fn new(style: NotationStyle) -> Self {
        NotationWriter { style, aggressive: false }
    }

    /// 成れるかどうかが異なる駒も曖昧さ解消の候補に含める
    pub fn aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    pub fn style(&self) -> NotationStyle {
        self.style
    }

    /// 指し手の表記（`pos` は指す前の局面）
    pub fn write_move(&self, mv: &Move, pos: &Position) -> Result<String, InvariantError> {
        self.write_move_with_previous(mv, pos, None)
    }

    /// 直前の指し手を考慮した表記（日本式系統では同じ升なら「同」になる）
    pub fn write_move_with_previous(
        &self,
        mv: &Move,
        pos: &Position,
        previous: Option<&Move>,
    ) -> Result<String, InvariantError> {
        if let Some(t) = mv.termination_reason() {
            let label =
                if self.style.is_japanese_family() { t.kif_keyword() } else { t.english_label() };
            return Ok(label.to_string());
        }
        let Some(resolved) = self.resolve(mv, pos, previous)? else {
            return Ok(String::new());
        };
        let params = self.style.params();
        let text = params
            .order
            .iter()
            .map(|&token| self.fragment(token, params, mv, &resolved))
            .collect();
        Ok(text)
    }

    /// 本譜の全ての指し手の表記
    pub fn write_mainline(&self, game: &Game) -> Result<Vec<String>, InvariantError> {
        let mut pos = game.initial_position().clone();
        let mut previous: Option<Move> = None;
        let mut lines = Vec::new();
        for mv in game.mainline_moves() {
            lines.push(self.write_move_with_previous(&mv, &pos, previous.as_ref())?);
            pos.make_move(&mv)?;
            previous = Some(mv);
        }
        Ok(lines)
    }

    fn resolve(
        &self,
        mv: &Move,
        pos: &Position,
        previous: Option<&Move>,
    ) -> Result<Option<Resolved>, InvariantError> {
        let (Some(side), Some(kt)) = (mv.side(), mv.koma_type()) else {
            return Ok(None);
        };
        let same = previous.is_some_and(|p| !p.is_termination() && p.end() == mv.end());

        let disambiguation = if mv.is_drop() {
            None
        } else {
            let origins = self.ambiguous_origins(mv, pos, side, kt)?;
            if origins.len() < 2 || !origins.contains(&mv.start()) {
                None
            } else if self.style.is_japanese_family() {
                Some(japanese_disambiguation(side, kt, mv.start(), mv.end(), &origins)?)
            } else {
                Some((self.style.params().origin)(mv.start()))
            }
        };

        let promotion = if mv.is_promotion() {
            Some(true)
        } else if !mv.is_drop() && promotion_options(kt, side, mv.start(), mv.end()).len() > 1 {
            Some(false)
        } else {
            None
        };

        Ok(Some(Resolved { kt, same, disambiguation, promotion }))
    }

    /// 同じ升へ合法に動ける同種の駒の移動元
    fn ambiguous_origins(
        &self,
        mv: &Move,
        pos: &Position,
        side: Side,
        kt: KomaType,
    ) -> Result<Vec<Square>, InvariantError> {
        let end = mv.end();
        let eligible = |start: Square| promotion_options(kt, side, start, end).contains(&true);
        let mine = eligible(mv.start());
        let mut work = pos.clone();
        let mut origins = Vec::new();
        for start in pos.board().squares_of(side, kt) {
            if !self.aggressive && eligible(start) != mine {
                continue;
            }
            for candidate in generate_moves_from(pos, start) {
                if candidate.end() == end && is_legal(&mut work, &candidate)? {
                    origins.push(start);
                    break;
                }
            }
        }
        Ok(origins)
    }

    fn fragment(&self, token: Token, params: &StyleParams, mv: &Move, r: &Resolved) -> String {
        match token {
            Token::Piece => (params.piece)(r.kt).to_string(),
            Token::Disambiguation => r.disambiguation.clone().unwrap_or_default(),
            Token::MoveType => {
                let marker = if mv.is_drop() {
                    params.drop
                } else if mv.is_capture() {
                    params.capture
                } else {
                    params.quiet
                };
                marker.to_string()
            }
            Token::Destination => {
                if r.same && self.style.is_japanese_family() {
                    "同".to_string()
                } else {
                    (params.destination)(mv.end())
                }
            }
            Token::Promotion => match r.promotion {
                Some(true) => params.promote.to_string(),
                Some(false) => params.decline.to_string(),
                None => String::new(),
            },
        }
    }
}
