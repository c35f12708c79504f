//! 駒種（KomaType）と駒（Koma）

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Side;

/// 駒種（成駒を含む 14 種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KomaType {
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Bishop = 5,
    Rook = 6,
    Gold = 7,
    King = 8,
    ProPawn = 9,
    ProLance = 10,
    ProKnight = 11,
    ProSilver = 12,
    Horse = 13,
    Dragon = 14,
}

impl KomaType {
    /// 駒種の数
    pub const NUM: usize = 14;

    /// 全ての駒種
    pub const ALL: [KomaType; 14] = [
        KomaType::Pawn,
        KomaType::Lance,
        KomaType::Knight,
        KomaType::Silver,
        KomaType::Bishop,
        KomaType::Rook,
        KomaType::Gold,
        KomaType::King,
        KomaType::ProPawn,
        KomaType::ProLance,
        KomaType::ProKnight,
        KomaType::ProSilver,
        KomaType::Horse,
        KomaType::Dragon,
    ];

    /// 持ち駒の表示順（飛・角・金・銀・桂・香・歩）
    pub const HAND_ORDER: [KomaType; 7] = [
        KomaType::Rook,
        KomaType::Bishop,
        KomaType::Gold,
        KomaType::Silver,
        KomaType::Knight,
        KomaType::Lance,
        KomaType::Pawn,
    ];

    /// インデックス（0〜13）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// u8 から変換（1〜14）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<KomaType> {
        if n >= 1 && n <= 14 { Some(KomaType::ALL[n as usize - 1]) } else { None }
    }

    /// 成れる駒種かどうか（金・玉・成駒は成れない）
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            KomaType::Pawn
                | KomaType::Lance
                | KomaType::Knight
                | KomaType::Silver
                | KomaType::Bishop
                | KomaType::Rook
        )
    }

    /// 成駒かどうか
    #[inline]
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            KomaType::ProPawn
                | KomaType::ProLance
                | KomaType::ProKnight
                | KomaType::ProSilver
                | KomaType::Horse
                | KomaType::Dragon
        )
    }

    /// 成った駒種。成れない駒種はそのまま返す
    #[inline]
    pub const fn promote(self) -> KomaType {
        match self {
            KomaType::Pawn => KomaType::ProPawn,
            KomaType::Lance => KomaType::ProLance,
            KomaType::Knight => KomaType::ProKnight,
            KomaType::Silver => KomaType::ProSilver,
            KomaType::Bishop => KomaType::Horse,
            KomaType::Rook => KomaType::Dragon,
            other => other,
        }
    }

    /// 成る前の駒種。玉と生駒はそのまま返す
    #[inline]
    pub const fn unpromote(self) -> KomaType {
        match self {
            KomaType::ProPawn => KomaType::Pawn,
            KomaType::ProLance => KomaType::Lance,
            KomaType::ProKnight => KomaType::Knight,
            KomaType::ProSilver => KomaType::Silver,
            KomaType::Horse => KomaType::Bishop,
            KomaType::Dragon => KomaType::Rook,
            // 玉は成駒ではない
            KomaType::King => KomaType::King,
            other => other,
        }
    }

    /// 持ち駒になれる駒種かどうか（玉・成駒以外）
    #[inline]
    pub const fn is_hand_type(self) -> bool {
        self.hand_index().is_some()
    }

    /// 持ち駒配列のインデックス（歩=0 … 飛=6）
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            KomaType::Pawn => Some(0),
            KomaType::Lance => Some(1),
            KomaType::Knight => Some(2),
            KomaType::Silver => Some(3),
            KomaType::Gold => Some(4),
            KomaType::Bishop => Some(5),
            KomaType::Rook => Some(6),
            _ => None,
        }
    }

    /// 金と同じ動き、または銀の動きをする「小駒の将」かどうか
    ///
    /// 日本式表記の「直」はこの駒種にだけ使う。
    #[inline]
    pub const fn is_general(self) -> bool {
        matches!(
            self,
            KomaType::Silver
                | KomaType::Gold
                | KomaType::ProPawn
                | KomaType::ProLance
                | KomaType::ProKnight
                | KomaType::ProSilver
        )
    }

    /// SFEN の駒文字（先手の大文字、成駒は成る前の文字）
    #[inline]
    pub const fn sfen_letter(self) -> char {
        match self.unpromote() {
            KomaType::Pawn => 'P',
            KomaType::Lance => 'L',
            KomaType::Knight => 'N',
            KomaType::Silver => 'S',
            KomaType::Gold => 'G',
            KomaType::Bishop => 'B',
            KomaType::Rook => 'R',
            _ => 'K',
        }
    }

    /// SFEN の駒文字（大文字小文字は問わない）から生駒の駒種を得る
    pub fn from_sfen_letter(c: char) -> Option<KomaType> {
        match c.to_ascii_uppercase() {
            'P' => Some(KomaType::Pawn),
            'L' => Some(KomaType::Lance),
            'N' => Some(KomaType::Knight),
            'S' => Some(KomaType::Silver),
            'G' => Some(KomaType::Gold),
            'B' => Some(KomaType::Bishop),
            'R' => Some(KomaType::Rook),
            'K' => Some(KomaType::King),
            _ => None,
        }
    }
}

/// 手番付きの駒
///
/// 1 バイトに詰めた不透明な値。ビット配置は外部に公開しない。
/// `NONE`（空き升）と `INVALID`（盤外の番兵）は実際の升には置かれない。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Koma(u8);

const TYPE_MASK: u8 = 0x0F;
const GOTE_BIT: u8 = 0x10;

impl Koma {
    /// 空き升
    pub const NONE: Koma = Koma(0);

    /// 盤外の番兵
    pub const INVALID: Koma = Koma(0xFF);

    /// 手番と駒種から駒を作る
    #[inline]
    pub const fn new(side: Side, koma_type: KomaType) -> Koma {
        let side_bit = match side {
            Side::Sente => 0,
            Side::Gote => GOTE_BIT,
        };
        Koma(koma_type as u8 | side_bit)
    }

    /// 空き升かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Koma::NONE.0
    }

    /// 盤外の番兵かどうか
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Koma::INVALID.0
    }

    /// 実際の駒かどうか（NONE でも INVALID でもない）
    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none() && !self.is_invalid()
    }

    /// 駒種（番兵なら None）
    #[inline]
    pub const fn koma_type(self) -> Option<KomaType> {
        if self.is_some() { KomaType::from_u8(self.0 & TYPE_MASK) } else { None }
    }

    /// 手番（番兵なら None）
    #[inline]
    pub const fn side(self) -> Option<Side> {
        if !self.is_some() {
            None
        } else if self.0 & GOTE_BIT != 0 {
            Some(Side::Gote)
        } else {
            Some(Side::Sente)
        }
    }

    /// 指定した手番の駒かどうか
    #[inline]
    pub fn is_side(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// 成駒かどうか
    #[inline]
    pub fn is_promoted(self) -> bool {
        self.koma_type().is_some_and(KomaType::is_promoted)
    }

    /// 成った駒。成れない駒と番兵はそのまま
    #[inline]
    pub fn promote(self) -> Koma {
        match (self.side(), self.koma_type()) {
            (Some(side), Some(kt)) => Koma::new(side, kt.promote()),
            _ => self,
        }
    }

    /// 成る前の駒。生駒と番兵はそのまま
    #[inline]
    pub fn unpromote(self) -> Koma {
        match (self.side(), self.koma_type()) {
            (Some(side), Some(kt)) => Koma::new(side, kt.unpromote()),
            _ => self,
        }
    }

    /// SFEN 表記（後手は小文字、成駒は先頭に '+'）
    pub fn to_sfen(self) -> String {
        let (Some(side), Some(kt)) = (self.side(), self.koma_type()) else {
            return String::new();
        };
        let letter = match side {
            Side::Sente => kt.sfen_letter(),
            Side::Gote => kt.sfen_letter().to_ascii_lowercase(),
        };
        if kt.is_promoted() { format!("+{letter}") } else { letter.to_string() }
    }

    /// SFEN の駒文字から駒を作る（大文字=先手、小文字=後手）
    pub fn from_sfen(c: char, promoted: bool) -> Option<Koma> {
        let kt = KomaType::from_sfen_letter(c)?;
        if promoted && !kt.can_promote() {
            return None;
        }
        let side = if c.is_ascii_uppercase() { Side::Sente } else { Side::Gote };
        let kt = if promoted { kt.promote() } else { kt };
        Some(Koma::new(side, kt))
    }
}

impl Default for Koma {
    fn default() -> Self {
        Koma::NONE
    }
}

impl fmt::Debug for Koma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.side(), self.koma_type()) {
            (Some(side), Some(kt)) => write!(f, "Koma({side:?} {kt:?})"),
            _ if self.is_none() => f.write_str("Koma(NONE)"),
            _ => f.write_str("Koma(INVALID)"),
        }
    }
}
