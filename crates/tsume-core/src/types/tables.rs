//! 静的な変換テーブル
//!
//! 漢数字、全角数字、駒の字（別表記を含む）、西洋式の駒文字、
//! 手合割名から初期局面 SFEN への対応、いろは式の升名を持つ。

use super::{KomaType, Square};

const KANJI_DIGITS: [char; 10] = ['一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];

const FULLWIDTH_DIGITS: [char; 9] = ['１', '２', '３', '４', '５', '６', '７', '８', '９'];

/// 1〜10 を漢数字にする
pub fn kanji_digit(n: u8) -> Option<char> {
    match n {
        1..=10 => Some(KANJI_DIGITS[n as usize - 1]),
        _ => None,
    }
}

/// 漢数字（一〜十）を整数にする
pub fn parse_kanji_digit(c: char) -> Option<u8> {
    KANJI_DIGITS.iter().position(|&k| k == c).map(|i| i as u8 + 1)
}

/// 1〜9 を全角数字にする
pub fn fullwidth_digit(n: u8) -> Option<char> {
    match n {
        1..=9 => Some(FULLWIDTH_DIGITS[n as usize - 1]),
        _ => None,
    }
}

/// 全角または半角の数字（1〜9）を整数にする
pub fn parse_digit(c: char) -> Option<u8> {
    if let Some(i) = FULLWIDTH_DIGITS.iter().position(|&d| d == c) {
        return Some(i as u8 + 1);
    }
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        _ => None,
    }
}

/// 漢数字の個数表記（「二」「十」「十六」など）を整数にする
///
/// 1 文字なら一〜十、2 文字なら「十」＋一の位。
pub fn parse_kanji_count(s: &str) -> Option<u8> {
    let chars: Vec<char> = s.chars().collect();
    match chars.as_slice() {
        [one] => parse_kanji_digit(*one),
        ['十', ones] => parse_kanji_digit(*ones).filter(|&n| n < 10).map(|n| 10 + n),
        _ => None,
    }
}

/// 持ち駒の枚数表記（1 枚は空文字、2〜10 は漢数字、11〜19 は「十」＋一の位）
pub fn kanji_count(n: u8) -> String {
    match n {
        0 | 1 => String::new(),
        2..=10 => kanji_digit(n).map(String::from).unwrap_or_default(),
        11..=19 => kanji_digit(n - 10).map(|c| format!("十{c}")).unwrap_or_default(),
        _ => n.to_string(),
    }
}

/// 棋譜で使う駒名（成駒は「成香」など 2 文字）
pub const fn koma_glyph(kt: KomaType) -> &'static str {
    match kt {
        KomaType::Pawn => "歩",
        KomaType::Lance => "香",
        KomaType::Knight => "桂",
        KomaType::Silver => "銀",
        KomaType::Gold => "金",
        KomaType::Bishop => "角",
        KomaType::Rook => "飛",
        KomaType::King => "玉",
        KomaType::ProPawn => "と",
        KomaType::ProLance => "成香",
        KomaType::ProKnight => "成桂",
        KomaType::ProSilver => "成銀",
        KomaType::Horse => "馬",
        KomaType::Dragon => "龍",
    }
}

/// 局面図で使う 1 文字の駒名
pub const fn koma_diagram_glyph(kt: KomaType) -> char {
    match kt {
        KomaType::ProLance => '杏',
        KomaType::ProKnight => '圭',
        KomaType::ProSilver => '全',
        KomaType::Pawn => '歩',
        KomaType::Lance => '香',
        KomaType::Knight => '桂',
        KomaType::Silver => '銀',
        KomaType::Gold => '金',
        KomaType::Bishop => '角',
        KomaType::Rook => '飛',
        KomaType::King => '玉',
        KomaType::ProPawn => 'と',
        KomaType::Horse => '馬',
        KomaType::Dragon => '龍',
    }
}

/// 駒名から駒種を得る（「王」「竜」「杏」「圭」「全」などの別表記も受け付ける）
pub fn parse_koma_glyph(s: &str) -> Option<KomaType> {
    let kt = match s {
        "歩" => KomaType::Pawn,
        "香" => KomaType::Lance,
        "桂" => KomaType::Knight,
        "銀" => KomaType::Silver,
        "金" => KomaType::Gold,
        "角" => KomaType::Bishop,
        "飛" => KomaType::Rook,
        "玉" | "王" => KomaType::King,
        "と" => KomaType::ProPawn,
        "成香" | "杏" => KomaType::ProLance,
        "成桂" | "圭" => KomaType::ProKnight,
        "成銀" | "全" => KomaType::ProSilver,
        "馬" => KomaType::Horse,
        "龍" | "竜" => KomaType::Dragon,
        _ => return None,
    };
    Some(kt)
}

/// 西洋式の駒文字（成駒は先頭に '+'）
pub const fn western_letter(kt: KomaType) -> &'static str {
    match kt {
        KomaType::Pawn => "P",
        KomaType::Lance => "L",
        KomaType::Knight => "N",
        KomaType::Silver => "S",
        KomaType::Gold => "G",
        KomaType::Bishop => "B",
        KomaType::Rook => "R",
        KomaType::King => "K",
        KomaType::ProPawn => "+P",
        KomaType::ProLance => "+L",
        KomaType::ProKnight => "+N",
        KomaType::ProSilver => "+S",
        KomaType::Horse => "+B",
        KomaType::Dragon => "+R",
    }
}

/// 手合割名と初期局面 SFEN の対応（駒落ちは上手＝後手の手番から始まる）
pub const HANDICAPS: [(&str, &str); 16] = [
    ("平手", "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1"),
    ("香落ち", "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("右香落ち", "1nsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("角落ち", "lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("飛車落ち", "lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("飛香落ち", "lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("二枚落ち", "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("三枚落ち", "lnsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("四枚落ち", "1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("五枚落ち", "1nsgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("左五枚落ち", "2sgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("六枚落ち", "2sgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("左七枚落ち", "2sgkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("右七枚落ち", "3gkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("八枚落ち", "3gkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
    ("十枚落ち", "4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"),
];

/// 手合割名から初期局面 SFEN を引く
pub fn handicap_sfen(name: &str) -> Option<&'static str> {
    HANDICAPS.iter().find(|(n, _)| *n == name).map(|(_, sfen)| *sfen)
}

/// 初期局面 SFEN から手合割名を逆引きする
pub fn handicap_name(sfen: &str) -> Option<&'static str> {
    HANDICAPS.iter().find(|(_, s)| *s == sfen).map(|(name, _)| *name)
}

/// いろは式の升名（升のインデックス 1〜81 の順）
///
/// いろは歌 47 文字と「ん」、続けていろは歌の先頭 33 文字を片仮名で並べる。
pub const IROHA_SQUARES: [&str; 81] = [
    "い", "ろ", "は", "に", "ほ", "へ", "と", "ち", "り", //
    "ぬ", "る", "を", "わ", "か", "よ", "た", "れ", "そ", //
    "つ", "ね", "な", "ら", "む", "う", "ゐ", "の", "お", //
    "く", "や", "ま", "け", "ふ", "こ", "え", "て", "あ", //
    "さ", "き", "ゆ", "め", "み", "し", "ゑ", "ひ", "も", //
    "せ", "す", "ん", "イ", "ロ", "ハ", "ニ", "ホ", "ヘ", //
    "ト", "チ", "リ", "ヌ", "ル", "ヲ", "ワ", "カ", "ヨ", //
    "タ", "レ", "ソ", "ツ", "ネ", "ナ", "ラ", "ム", "ウ", //
    "ヰ", "ノ", "オ", "ク", "ヤ", "マ", "ケ", "フ", "コ", //
];

/// いろは式の升名
pub fn iroha_name(sq: Square) -> Option<&'static str> {
    if sq.is_board() { Some(IROHA_SQUARES[sq.index() as usize - 1]) } else { None }
}
