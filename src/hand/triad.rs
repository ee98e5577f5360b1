//! Triads: three positions forming one scoring column.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::position::{Position, Slot};
use crate::cards::Card;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triad {
    positions: [Position; 3],
    /// Completed and set aside; scores nothing and can't be touched.
    pub is_discarded: bool,
}

impl Triad {
    #[must_use]
    pub fn new(top: Card, middle: Card, bottom: Card) -> Self {
        Self {
            positions: [Position::new(top), Position::new(middle), Position::new(bottom)],
            is_discarded: false,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = (Slot, &Position)> {
        Slot::ALL.into_iter().zip(self.positions.iter())
    }

    /// Effective values, top to bottom.
    #[must_use]
    pub fn values(&self) -> [i32; 3] {
        self.positions.each_ref().map(Position::value)
    }

    /// Values used for completion checks (declared Wild values included).
    #[must_use]
    pub fn completion_values(&self) -> [i32; 3] {
        self.positions.each_ref().map(Position::completion_value)
    }

    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.positions.iter().all(Position::is_revealed)
    }

    /// Replace the whole position, returning what was there.
    pub fn put(&mut self, slot: Slot, position: Position) -> Position {
        std::mem::replace(&mut self.positions[slot.index()], position)
    }

    pub fn swap_slots(&mut self, a: Slot, b: Slot) {
        self.positions.swap(a.index(), b.index());
    }

    /// Lock every Wild card in the triad, keeping its declared value.
    pub fn freeze_wilds(&mut self) {
        for position in &mut self.positions {
            for card in position.cards_mut() {
                if card.is_wild() {
                    card.is_frozen = true;
                }
            }
        }
    }

    /// Turn every card in the triad face-up.
    pub fn reveal_all(&mut self) {
        for position in &mut self.positions {
            for card in position.cards_mut() {
                card.is_revealed = true;
            }
        }
    }
}

impl Index<Slot> for Triad {
    type Output = Position;

    fn index(&self, slot: Slot) -> &Self::Output {
        &self.positions[slot.index()]
    }
}

impl IndexMut<Slot> for Triad {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        &mut self.positions[slot.index()]
    }
}
