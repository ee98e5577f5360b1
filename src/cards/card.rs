//! Card model.
//!
//! A card's face (what kind of card it is and its printed numbers) never
//! changes. Its presentation state does: whether it is face-up, whether a
//! Wild card has been locked into a completed triad, and the value a Wild
//! card has been declared to represent.

use serde::{Deserialize, Serialize};

/// Highest value a Wild card may stand for.
pub const MAX_WILD_VALUE: u8 = 12;

/// What an unfrozen Wild card is worth at scoring time.
pub const UNFROZEN_WILD_VALUE: i32 = 25;

/// Identifier unique within one deck build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

/// Printed face of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Plain number card, 0..=12.
    Fixed(u8),
    /// Power card: face value plus a `-magnitude`/`+magnitude` modifier pair.
    Power { face: u8, magnitude: u8 },
    /// KAPOW! card. No value until one is declared.
    Wild,
}

/// Which half of a Power card's modifier pair is in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierSign {
    Negative,
    Positive,
}

impl ModifierSign {
    /// Signed modifier for a Power card of the given magnitude.
    #[must_use]
    pub fn apply(self, magnitude: u8) -> i32 {
        match self {
            ModifierSign::Negative => -i32::from(magnitude),
            ModifierSign::Positive => i32::from(magnitude),
        }
    }
}

/// A physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: CardFace,
    pub is_revealed: bool,
    /// Wild cards only: locked into a completed triad.
    pub is_frozen: bool,
    /// Wild cards only: declared value.
    pub assigned_value: Option<u8>,
}

impl Card {
    fn with_face(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            face,
            is_revealed: false,
            is_frozen: false,
            assigned_value: None,
        }
    }

    #[must_use]
    pub fn fixed(id: CardId, value: u8) -> Self {
        Self::with_face(id, CardFace::Fixed(value))
    }

    #[must_use]
    pub fn power(id: CardId, face: u8, magnitude: u8) -> Self {
        Self::with_face(id, CardFace::Power { face, magnitude })
    }

    #[must_use]
    pub fn wild(id: CardId) -> Self {
        Self::with_face(id, CardFace::Wild)
    }

    /// Builder-style: mark face-up.
    #[must_use]
    pub fn revealed(mut self) -> Self {
        self.is_revealed = true;
        self
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.face, CardFace::Fixed(_))
    }

    #[must_use]
    pub fn is_power(&self) -> bool {
        matches!(self.face, CardFace::Power { .. })
    }

    #[must_use]
    pub fn is_wild(&self) -> bool {
        matches!(self.face, CardFace::Wild)
    }

    /// An unfrozen Wild card, free to be swapped or re-declared.
    #[must_use]
    pub fn is_free_wild(&self) -> bool {
        self.is_wild() && !self.is_frozen
    }

    /// Modifier magnitude for Power cards.
    #[must_use]
    pub fn power_magnitude(&self) -> Option<u8> {
        match self.face {
            CardFace::Power { magnitude, .. } => Some(magnitude),
            _ => None,
        }
    }

    /// Value printed on the card; `None` for Wild cards.
    #[must_use]
    pub fn face_value(&self) -> Option<u8> {
        match self.face {
            CardFace::Fixed(v) => Some(v),
            CardFace::Power { face, .. } => Some(face),
            CardFace::Wild => None,
        }
    }

    /// Value of this card as the base of a position.
    ///
    /// Frozen Wild cards count their locked value, unfrozen ones the
    /// 25-point sentinel.
    #[must_use]
    pub fn base_value(&self) -> i32 {
        match self.face {
            CardFace::Fixed(v) => i32::from(v),
            CardFace::Power { face, .. } => i32::from(face),
            CardFace::Wild if self.is_frozen => i32::from(self.assigned_value.unwrap_or(0)),
            CardFace::Wild => UNFROZEN_WILD_VALUE,
        }
    }

    /// Value used when testing whether a triad is complete.
    ///
    /// Same as `base_value`, except an unfrozen Wild with a declared value
    /// stands in for that value.
    #[must_use]
    pub fn completion_value(&self) -> i32 {
        match (self.face, self.assigned_value) {
            (CardFace::Wild, Some(v)) if !self.is_frozen => i32::from(v),
            _ => self.base_value(),
        }
    }

    /// Drop any declared value on a Wild card that is not locked in.
    pub fn clear_declaration(&mut self) {
        if self.is_free_wild() {
            self.assigned_value = None;
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            CardFace::Fixed(v) => write!(f, "{v}"),
            CardFace::Power { face, magnitude } => {
                write!(f, "Power {face} (-{magnitude}/+{magnitude})")
            }
            CardFace::Wild => write!(f, "KAPOW!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_values() {
        assert_eq!(Card::fixed(CardId(0), 7).base_value(), 7);
        assert_eq!(Card::power(CardId(1), 2, 2).base_value(), 2);
        assert_eq!(Card::wild(CardId(2)).base_value(), UNFROZEN_WILD_VALUE);

        let mut wild = Card::wild(CardId(3));
        wild.assigned_value = Some(4);
        wild.is_frozen = true;
        assert_eq!(wild.base_value(), 4);
    }

    #[test]
    fn test_declared_wild_counts_for_completion_only() {
        let mut wild = Card::wild(CardId(0));
        wild.assigned_value = Some(9);

        assert_eq!(wild.base_value(), 25);
        assert_eq!(wild.completion_value(), 9);

        wild.clear_declaration();
        assert_eq!(wild.assigned_value, None);
    }

    #[test]
    fn test_frozen_wild_keeps_declaration() {
        let mut wild = Card::wild(CardId(0));
        wild.assigned_value = Some(3);
        wild.is_frozen = true;

        wild.clear_declaration();
        assert_eq!(wild.assigned_value, Some(3));
        assert!(!wild.is_free_wild());
    }

    #[test]
    fn test_modifier_sign() {
        assert_eq!(ModifierSign::Negative.apply(2), -2);
        assert_eq!(ModifierSign::Positive.apply(1), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::fixed(CardId(0), 11).to_string(), "11");
        assert_eq!(Card::power(CardId(0), 1, 1).to_string(), "Power 1 (-1/+1)");
        assert_eq!(Card::wild(CardId(0)).to_string(), "KAPOW!");
        assert_eq!(CardId(5).to_string(), "card_5");
    }
}
