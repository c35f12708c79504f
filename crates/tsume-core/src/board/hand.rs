//! 持ち駒

use crate::error::InvariantError;
use crate::types::KomaType;

/// 持ち駒（歩・香・桂・銀・金・角・飛の枚数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HandRepresentation {
    counts: [u8; 7],
}

impl HandRepresentation {
    /// 空の持ち駒
    pub const fn new() -> Self {
        HandRepresentation { counts: [0; 7] }
    }

    /// 駒種の枚数（持ち駒にできない駒種は常に 0）
    #[inline]
    pub fn count(&self, kt: KomaType) -> u8 {
        kt.hand_index().map_or(0, |i| self.counts[i])
    }

    /// 枚数を設定する
    pub fn set(&mut self, kt: KomaType, count: u8) -> Result<(), InvariantError> {
        let i = kt.hand_index().ok_or(InvariantError::NotHandType(kt))?;
        self.counts[i] = count;
        Ok(())
    }

    /// 1 枚増やす
    pub fn inc(&mut self, kt: KomaType) -> Result<(), InvariantError> {
        let i = kt.hand_index().ok_or(InvariantError::NotHandType(kt))?;
        self.counts[i] = self.counts[i].checked_add(1).ok_or(InvariantError::HandOverflow(kt))?;
        Ok(())
    }

    /// 1 枚減らす（0 枚からは減らせない）
    pub fn dec(&mut self, kt: KomaType) -> Result<(), InvariantError> {
        let i = kt.hand_index().ok_or(InvariantError::NotHandType(kt))?;
        self.counts[i] = self.counts[i].checked_sub(1).ok_or(InvariantError::NegativeHand(kt))?;
        Ok(())
    }

    /// 持ち駒が 1 枚もないかどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// 表示順（飛・角・金・銀・桂・香・歩）で枚数が 1 以上の駒種を列挙する
    pub fn iter(&self) -> impl Iterator<Item = (KomaType, u8)> + '_ {
        KomaType::HAND_ORDER
            .into_iter()
            .map(|kt| (kt, self.count(kt)))
            .filter(|&(_, n)| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_dec() {
        let mut hand = HandRepresentation::new();
        hand.inc(KomaType::Pawn).unwrap();
        hand.inc(KomaType::Pawn).unwrap();
        assert_eq!(hand.count(KomaType::Pawn), 2);
        hand.dec(KomaType::Pawn).unwrap();
        assert_eq!(hand.count(KomaType::Pawn), 1);
    }

    #[test]
    fn test_dec_below_zero_fails() {
        let mut hand = HandRepresentation::new();
        assert_eq!(hand.dec(KomaType::Rook), Err(InvariantError::NegativeHand(KomaType::Rook)));
        assert!(hand.is_empty());
    }

    #[test]
    fn test_non_hand_types_rejected() {
        let mut hand = HandRepresentation::new();
        assert_eq!(hand.inc(KomaType::King), Err(InvariantError::NotHandType(KomaType::King)));
        assert_eq!(hand.inc(KomaType::Horse), Err(InvariantError::NotHandType(KomaType::Horse)));
        assert_eq!(hand.count(KomaType::Dragon), 0);
    }

    #[test]
    fn test_iter_uses_display_order() {
        let mut hand = HandRepresentation::new();
        hand.set(KomaType::Pawn, 3).unwrap();
        hand.set(KomaType::Rook, 1).unwrap();
        hand.set(KomaType::Silver, 2).unwrap();
        let listed: Vec<_> = hand.iter().collect();
        assert_eq!(
            listed,
            vec![(KomaType::Rook, 1), (KomaType::Silver, 2), (KomaType::Pawn, 3)]
        );
    }
}
