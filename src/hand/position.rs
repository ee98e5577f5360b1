//! A single card position: a base card plus an optional powerset.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, ModifierSign};

/// Row within a triad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Top,
    Middle,
    Bottom,
}

impl Slot {
    /// Top to bottom.
    pub const ALL: [Slot; 3] = [Slot::Top, Slot::Middle, Slot::Bottom];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Slot::Top => 0,
            Slot::Middle => 1,
            Slot::Bottom => 2,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Slot::Top => "top",
            Slot::Middle => "middle",
            Slot::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Address of a position in a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub triad: usize,
    pub slot: Slot,
}

impl Location {
    #[must_use]
    pub const fn new(triad: usize, slot: Slot) -> Self {
        Self { triad, slot }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "triad {} {}", self.triad + 1, self.slot)
    }
}

/// A Power card stacked under a base card, with its chosen modifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerLayer {
    card: Card,
    sign: ModifierSign,
}

impl PowerLayer {
    /// Wrap a Power card; any other card is handed back.
    pub fn new(card: Card, sign: ModifierSign) -> Result<Self, Card> {
        if card.is_power() {
            Ok(Self { card, sign })
        } else {
            Err(card)
        }
    }

    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Signed contribution to the position's value.
    #[must_use]
    pub fn modifier(&self) -> i32 {
        self.sign.apply(self.card.power_magnitude().unwrap_or(0))
    }

    #[must_use]
    pub fn into_card(self) -> Card {
        self.card
    }
}

/// Base card and the powerset beneath it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    base: Card,
    powerset: SmallVec<[PowerLayer; 2]>,
}

impl Position {
    #[must_use]
    pub fn new(base: Card) -> Self {
        Self {
            base,
            powerset: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &Card {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Card {
        &mut self.base
    }

    #[must_use]
    pub fn powerset(&self) -> &[PowerLayer] {
        &self.powerset
    }

    /// Cards at this position (base first).
    #[must_use]
    pub fn card_count(&self) -> usize {
        1 + self.powerset.len()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.base.is_revealed
    }

    /// A lone, unfrozen Wild card: the only thing that may be swapped.
    #[must_use]
    pub fn is_lone_free_wild(&self) -> bool {
        self.powerset.is_empty() && self.base.is_free_wild()
    }

    fn modifier_total(&self) -> i32 {
        self.powerset.iter().map(PowerLayer::modifier).sum()
    }

    /// Effective value: base value plus every stacked modifier.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.base.base_value() + self.modifier_total()
    }

    /// Effective value with an unfrozen Wild's declared value standing in.
    #[must_use]
    pub fn completion_value(&self) -> i32 {
        self.base.completion_value() + self.modifier_total()
    }

    pub fn push_power(&mut self, layer: PowerLayer) {
        self.powerset.push(layer);
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        std::iter::once(&mut self.base).chain(self.powerset.iter_mut().map(|layer| &mut layer.card))
    }

    /// Every card at the position, base first.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.card_count());
        cards.push(self.base);
        cards.extend(self.powerset.into_iter().map(PowerLayer::into_card));
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn power(magnitude: u8) -> Card {
        Card::power(CardId(90), magnitude, magnitude).revealed()
    }

    #[test]
    fn test_fixed_value() {
        for v in 0..=12 {
            assert_eq!(Position::new(Card::fixed(CardId(0), v)).value(), i32::from(v));
        }
    }

    #[test]
    fn test_powerset_modifiers_sum() {
        let mut pos = Position::new(Card::fixed(CardId(0), 8).revealed());
        pos.push_power(PowerLayer::new(power(2), ModifierSign::Negative).unwrap());
        pos.push_power(PowerLayer::new(power(1), ModifierSign::Positive).unwrap());

        assert_eq!(pos.value(), 7);
        assert_eq!(pos.card_count(), 3);
    }

    #[test]
    fn test_frozen_wild_with_power() {
        let mut wild = Card::wild(CardId(0)).revealed();
        wild.assigned_value = Some(6);
        wild.is_frozen = true;

        let mut pos = Position::new(wild);
        pos.push_power(PowerLayer::new(power(2), ModifierSign::Positive).unwrap());
        assert_eq!(pos.value(), 8);
    }

    #[test]
    fn test_layer_rejects_non_power() {
        let card = Card::fixed(CardId(3), 4);
        assert_eq!(PowerLayer::new(card.clone(), ModifierSign::Positive), Err(card));
    }

    #[test]
    fn test_into_cards_base_first() {
        let mut pos = Position::new(Card::fixed(CardId(1), 5));
        pos.push_power(PowerLayer::new(power(1), ModifierSign::Negative).unwrap());

        let ids: Vec<_> = pos.into_cards().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CardId(1), CardId(90)]);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(0, Slot::Middle).to_string(), "triad 1 middle");
    }
}
