//! Cards and the deck.
//!
//! - `card`: card faces, presentation state, value rules
//! - `deck`: deck construction, shuffling, dealing, pile handling

pub mod card;
pub mod deck;

pub use card::{Card, CardFace, CardId, ModifierSign, MAX_WILD_VALUE, UNFROZEN_WILD_VALUE};
pub use deck::{
    composition, create_deck, deal, draw_from_pile, replenish_from_discard, shuffle, Deal, Drawn,
    Replenished, DECK_SIZE,
};
