//! SFEN 形式の解析・出力

use crate::error::FormatError;
use crate::types::{Koma, KomaType, Side, Square};

use super::Position;

/// 平手初期局面の SFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

fn sfen_error(sfen: &str, reason: impl Into<String>) -> FormatError {
    FormatError::Sfen { sfen: sfen.to_string(), reason: reason.into() }
}

impl Position {
    /// SFEN 文字列から局面を作る
    ///
    /// 手数は省略可能（省略時は 1）。
    pub fn from_sfen(sfen: &str) -> Result<Position, FormatError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(sfen_error(sfen, "expected 3 or 4 space-separated fields"));
        }

        let mut pos = Position::new();

        // 1. 盤面
        pos.parse_board(sfen, parts[0])?;

        // 2. 手番
        pos.turn = match parts[1] {
            "b" => Side::Sente,
            "w" => Side::Gote,
            other => return Err(sfen_error(sfen, format!("expected 'b' or 'w', got '{other}'"))),
        };

        // 3. 持ち駒
        pos.parse_hands(sfen, parts[2])?;

        // 4. 手数
        pos.move_number = match parts.get(3) {
            Some(n) => n.parse().map_err(|_| sfen_error(sfen, format!("invalid move number '{n}'")))?,
            None => 1,
        };

        Ok(pos)
    }

    fn parse_board(&mut self, sfen: &str, board: &str) -> Result<(), FormatError> {
        let rows: Vec<&str> = board.split('/').collect();
        if rows.len() != 9 {
            return Err(sfen_error(sfen, format!("expected 9 rows, got {}", rows.len())));
        }
        for (r, row_text) in rows.iter().enumerate() {
            let row = r as u8 + 1;
            // 行の左端が 9 筋
            let mut col: i32 = 9;
            let mut promoted = false;
            for c in row_text.chars() {
                if let Some(n) = c.to_digit(10) {
                    if promoted {
                        return Err(sfen_error(sfen, format!("digit after '+' in row {row}")));
                    }
                    if n == 0 {
                        return Err(sfen_error(sfen, format!("zero-length run in row {row}")));
                    }
                    col -= n as i32;
                } else if c == '+' {
                    if promoted {
                        return Err(sfen_error(sfen, format!("repeated '+' in row {row}")));
                    }
                    promoted = true;
                    continue;
                } else {
                    let koma = Koma::from_sfen(c, promoted)
                        .ok_or_else(|| sfen_error(sfen, format!("invalid piece '{c}' in row {row}")))?;
                    if col < 1 {
                        return Err(sfen_error(sfen, format!("row {row} is longer than 9 squares")));
                    }
                    let sq = Square::new(col as u8, row)
                        .ok_or_else(|| sfen_error(sfen, format!("row {row} is out of range")))?;
                    self.board
                        .set_koma_at(sq, koma)
                        .map_err(|e| sfen_error(sfen, e.to_string()))?;
                    col -= 1;
                    promoted = false;
                }
                if col < 0 {
                    return Err(sfen_error(sfen, format!("row {row} is longer than 9 squares")));
                }
            }
            if promoted {
                return Err(sfen_error(sfen, format!("row {row} ends after '+'")));
            }
            if col != 0 {
                return Err(sfen_error(sfen, format!("row {row} does not have 9 squares")));
            }
        }
        Ok(())
    }

    fn parse_hands(&mut self, sfen: &str, hands: &str) -> Result<(), FormatError> {
        if hands == "-" {
            return Ok(());
        }
        let mut count: u32 = 0;
        for c in hands.chars() {
            if let Some(d) = c.to_digit(10) {
                count = count * 10 + d;
                if count > u8::MAX as u32 {
                    return Err(sfen_error(sfen, "hand count too large"));
                }
                continue;
            }
            let kt = KomaType::from_sfen_letter(c)
                .filter(|kt| kt.is_hand_type())
                .ok_or_else(|| sfen_error(sfen, format!("invalid hand piece '{c}'")))?;
            let side = if c.is_ascii_uppercase() { Side::Sente } else { Side::Gote };
            let n = if count == 0 { 1 } else { count as u8 };
            let hand = &mut self.hands[side.index()];
            let total = hand.count(kt).saturating_add(n);
            hand.set(kt, total).map_err(|e| sfen_error(sfen, e.to_string()))?;
            count = 0;
        }
        if count != 0 {
            return Err(sfen_error(sfen, "hand ends with a count"));
        }
        Ok(())
    }

    /// 現局面の SFEN 文字列
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        // 1. 盤面
        for row in 1..=9u8 {
            let mut empty_count = 0;
            for col in (1..=9u8).rev() {
                let koma = Square::new(col, row).map_or(Koma::NONE, |sq| self.koma_at(sq));
                if koma.is_some() {
                    if empty_count > 0 {
                        result.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    result.push_str(&koma.to_sfen());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if row < 9 {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(self.turn.sfen_char());

        // 3. 持ち駒（先手の大文字、続いて後手の小文字）
        result.push(' ');
        let mut hands = String::new();
        for side in Side::ALL {
            for (kt, n) in self.hand(side).iter() {
                if n > 1 {
                    hands.push_str(&n.to_string());
                }
                let letter = kt.sfen_letter();
                hands.push(match side {
                    Side::Sente => letter,
                    Side::Gote => letter.to_ascii_lowercase(),
                });
            }
        }
        if hands.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hands);
        }

        // 4. 手数
        result.push(' ');
        result.push_str(&self.move_number.to_string());

        result
    }
}
