//! 盤面描画側へ渡す JSON 表現

use serde::{Deserialize, Serialize};

use crate::board::HandRepresentation;
use crate::game::Game;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{KomaType, Side, Square};

/// 駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KomaJson {
    pub owner: Side,
    /// "K" | "R" | "B" | "G" | "S" | "N" | "L" | "P"
    #[serde(rename = "type")]
    pub koma_type: String,
    /// 成駒かどうか
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<bool>,
}

/// 盤面の 1 升
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellJson {
    /// "76" 形式（筋・段）
    pub square: String,
    /// 駒（空き升は null）
    pub koma: Option<KomaJson>,
}

/// 持ち駒（0 枚の駒種は省く）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandJson {
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub pawn: Option<u32>,
    #[serde(rename = "L", skip_serializing_if = "Option::is_none")]
    pub lance: Option<u32>,
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub knight: Option<u32>,
    #[serde(rename = "S", skip_serializing_if = "Option::is_none")]
    pub silver: Option<u32>,
    #[serde(rename = "G", skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
    #[serde(rename = "B", skip_serializing_if = "Option::is_none")]
    pub bishop: Option<u32>,
    #[serde(rename = "R", skip_serializing_if = "Option::is_none")]
    pub rook: Option<u32>,
}

impl From<&HandRepresentation> for HandJson {
    fn from(hand: &HandRepresentation) -> Self {
        let count = |kt| Some(hand.count(kt) as u32).filter(|&n| n > 0);
        HandJson {
            pawn: count(KomaType::Pawn),
            lance: count(KomaType::Lance),
            knight: count(KomaType::Knight),
            silver: count(KomaType::Silver),
            gold: count(KomaType::Gold),
            bishop: count(KomaType::Bishop),
            rook: count(KomaType::Rook),
        }
    }
}

/// 先後の持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandsJson {
    pub sente: HandJson,
    pub gote: HandJson,
}

/// 局面
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionJson {
    /// 1 段目から 9 段目まで、各段は 9 筋から 1 筋の順（盤面図と同じ並び）
    pub cells: Vec<Vec<CellJson>>,
    pub hands: HandsJson,
    pub turn: Side,
    pub move_number: u32,
    pub sfen: String,
}

impl From<&Position> for PositionJson {
    fn from(pos: &Position) -> Self {
        let cells: Vec<Vec<CellJson>> = (1..=9u8)
            .map(|row| {
                (1..=9u8)
                    .rev()
                    .filter_map(|col| Square::new(col, row))
                    .map(|sq| {
                        let koma = pos.koma_at(sq);
                        let koma = match (koma.side(), koma.koma_type()) {
                            (Some(owner), Some(kt)) => Some(KomaJson {
                                owner,
                                koma_type: kt.sfen_letter().to_string(),
                                promoted: kt.is_promoted().then_some(true),
                            }),
                            _ => None,
                        };
                        CellJson { square: sq.to_string(), koma }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        PositionJson {
            cells,
            hands: HandsJson {
                sente: HandJson::from(pos.hand(Side::Sente)),
                gote: HandJson::from(pos.hand(Side::Gote)),
            },
            turn: pos.turn(),
            move_number: pos.move_number(),
            sfen: pos.to_sfen(),
        }
    }
}

/// 棋譜（本譜のみ）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameJson {
    pub headers: Vec<(String, String)>,
    pub initial: PositionJson,
    /// USI 形式の指し手（終局理由の手は含めない）
    pub moves: Vec<String>,
    /// 終局理由（KIF の語）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub position: PositionJson,
}

impl From<&Game> for GameJson {
    fn from(game: &Game) -> Self {
        let mainline = game.mainline_moves();
        let moves = mainline.iter().filter(|m| !m.is_termination()).map(Move::to_usi).collect();
        let result = mainline
            .iter()
            .find_map(Move::termination_reason)
            .map(|t| t.kif_keyword().to_string());
        GameJson {
            headers: game.headers().to_vec(),
            initial: PositionJson::from(game.initial_position()),
            moves,
            result,
            position: PositionJson::from(game.position()),
        }
    }
}
