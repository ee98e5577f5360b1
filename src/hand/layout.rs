//! A player's hand and the operations that rearrange it.
//!
//! Operations that cannot apply (discarded triad, out-of-range location,
//! wrong kind of card) leave the hand unchanged. Operations that take a
//! card by value hand it back in `Err` when they decline it.

use serde::{Deserialize, Serialize};

use super::position::{Location, Position, PowerLayer, Slot};
use super::triad::Triad;
use crate::cards::{Card, ModifierSign, MAX_WILD_VALUE};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    triads: Vec<Triad>,
}

impl Hand {
    /// Lay dealt cards out as triads, three at a time in dealt order.
    ///
    /// Twelve cards make four triads, nine make three. Leftover cards
    /// (fewer than three) are dropped.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let mut cards = cards.into_iter();
        let mut triads = Vec::new();
        while let (Some(top), Some(middle), Some(bottom)) =
            (cards.next(), cards.next(), cards.next())
        {
            triads.push(Triad::new(top, middle, bottom));
        }
        Self { triads }
    }

    #[must_use]
    pub fn triads(&self) -> &[Triad] {
        &self.triads
    }

    #[must_use]
    pub fn triad(&self, index: usize) -> Option<&Triad> {
        self.triads.get(index)
    }

    pub fn triads_mut(&mut self) -> impl Iterator<Item = &mut Triad> {
        self.triads.iter_mut()
    }

    #[must_use]
    pub fn position(&self, loc: Location) -> Option<&Position> {
        self.triads.get(loc.triad).map(|t| &t[loc.slot])
    }

    /// Triad at `index` if it is still in play.
    fn live_triad_mut(&mut self, index: usize) -> Option<&mut Triad> {
        self.triads.get_mut(index).filter(|t| !t.is_discarded)
    }

    /// Every position in a triad still in play, triad order then top to bottom.
    pub fn active_locations(&self) -> impl Iterator<Item = (Location, &Position)> + '_ {
        self.triads
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_discarded)
            .flat_map(|(i, t)| t.positions().map(move |(slot, p)| (Location::new(i, slot), p)))
    }

    /// Face-down positions in live triads.
    #[must_use]
    pub fn unrevealed_locations(&self) -> Vec<Location> {
        self.active_locations()
            .filter(|(_, p)| !p.is_revealed())
            .map(|(loc, _)| loc)
            .collect()
    }

    /// Turn the base card at `loc` face-up.
    ///
    /// Returns true only if a face-down card was turned over.
    pub fn reveal(&mut self, loc: Location) -> bool {
        let Some(triad) = self.live_triad_mut(loc.triad) else {
            return false;
        };
        let base = triad[loc.slot].base_mut();
        if base.is_revealed {
            return false;
        }
        base.is_revealed = true;
        true
    }

    /// Put `card` at `loc` face-up, returning the previous stack.
    pub fn replace(&mut self, loc: Location, mut card: Card) -> Result<Vec<Card>, Card> {
        let Some(triad) = self.live_triad_mut(loc.triad) else {
            return Err(card);
        };
        card.is_revealed = true;
        let previous = triad.put(loc.slot, Position::new(card));
        Ok(previous.into_cards())
    }

    /// Stack a Power card beneath the face-up base card at `loc`.
    pub fn add_to_powerset(
        &mut self,
        loc: Location,
        mut card: Card,
        sign: ModifierSign,
    ) -> Result<(), Card> {
        let Some(triad) = self.live_triad_mut(loc.triad) else {
            return Err(card);
        };
        if !triad[loc.slot].is_revealed() {
            return Err(card);
        }
        card.is_revealed = true;
        let layer = PowerLayer::new(card, sign)?;
        triad[loc.slot].push_power(layer);
        Ok(())
    }

    /// Exchange the contents of two positions.
    ///
    /// Legal only when `from` holds a lone unfrozen Wild card, both triads
    /// are in play, and the positions differ.
    pub fn swap_wild(&mut self, from: Location, to: Location) -> bool {
        if from == to {
            return false;
        }
        let movable = self
            .position(from)
            .is_some_and(Position::is_lone_free_wild);
        let live = |i: usize| self.triads.get(i).is_some_and(|t| !t.is_discarded);
        if !movable || !live(from.triad) || !live(to.triad) {
            return false;
        }

        if from.triad == to.triad {
            self.triads[from.triad].swap_slots(from.slot, to.slot);
            return true;
        }
        let (low, high) = if from.triad < to.triad { (from, to) } else { (to, from) };
        let (head, tail) = self.triads.split_at_mut(high.triad);
        std::mem::swap(&mut head[low.triad][low.slot], &mut tail[0][high.slot]);
        true
    }

    /// Declare the value an unfrozen Wild card at `loc` stands for.
    pub fn assign_wild_value(&mut self, loc: Location, value: u8) -> bool {
        if value > MAX_WILD_VALUE {
            return false;
        }
        let Some(triad) = self.live_triad_mut(loc.triad) else {
            return false;
        };
        let base = triad[loc.slot].base_mut();
        if !base.is_free_wild() {
            return false;
        }
        base.assigned_value = Some(value);
        true
    }

    /// Effective values of a triad, top to bottom.
    #[must_use]
    pub fn triad_values(&self, index: usize) -> Option<[i32; 3]> {
        self.triads.get(index).map(Triad::values)
    }

    /// Face-up positions in live triads.
    #[must_use]
    pub fn count_revealed(&self) -> usize {
        self.active_locations().filter(|(_, p)| p.is_revealed()).count()
    }

    #[must_use]
    pub fn active_position_count(&self) -> usize {
        self.triads.iter().filter(|t| !t.is_discarded).count() * Slot::ALL.len()
    }

    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.active_locations().all(|(_, p)| p.is_revealed())
    }

    /// Turn every card in live triads face-up (end of round).
    pub fn reveal_all(&mut self) {
        for triad in self.triads.iter_mut().filter(|t| !t.is_discarded) {
            triad.reveal_all();
        }
    }
}
