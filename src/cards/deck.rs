//! The 118-card deck and pile operations.
//!
//! ## Composition
//!
//! | Card                         | Copies |
//! |------------------------------|--------|
//! | Fixed 0                      | 8      |
//! | Fixed 1, Fixed 2             | 4 each |
//! | Fixed 3..=12                 | 8 each |
//! | Power 1 (-1/+1)              | 8      |
//! | Power 2 (-2/+2)              | 8      |
//! | KAPOW! (Wild)                | 6      |
//!
//! Piles are plain `Vec<Card>` with the top of the pile at the end.
//! Pile operations return new vectors instead of mutating their input.

use rustc_hash::FxHashMap;

use super::card::{Card, CardFace, CardId};
use crate::core::GameRng;

/// Cards in a freshly built deck.
pub const DECK_SIZE: usize = 118;

/// Hands dealt plus whatever was left over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub hands: Vec<Vec<Card>>,
    pub remaining: Vec<Card>,
}

/// Result of taking the top card off a pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub card: Option<Card>,
    pub pile: Vec<Card>,
}

/// Piles after reshuffling the discard pile into a new draw pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replenished {
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
}

/// Hands out sequential card ids for a single deck build.
#[derive(Debug, Default)]
struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}

/// Build the full deck in a fixed order, every card face-down.
///
/// Ids run from 0 in build order and restart on every call.
#[must_use]
pub fn create_deck() -> Vec<Card> {
    let mut ids = CardIdAllocator::default();
    let mut cards = Vec::with_capacity(DECK_SIZE);

    let fixed_copies = |value: u8| if value == 1 || value == 2 { 4 } else { 8 };
    for value in 0..=12u8 {
        for _ in 0..fixed_copies(value) {
            cards.push(Card::fixed(ids.alloc(), value));
        }
    }

    for magnitude in 1..=2u8 {
        for _ in 0..8 {
            cards.push(Card::power(ids.alloc(), magnitude, magnitude));
        }
    }

    for _ in 0..6 {
        cards.push(Card::wild(ids.alloc()));
    }

    debug_assert_eq!(cards.len(), DECK_SIZE);
    cards
}

/// Shuffled copy of `cards`; the input is left untouched.
#[must_use]
pub fn shuffle(cards: &[Card], rng: &mut GameRng) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// Split the front of `cards` into `player_count` hands of `per_player`.
///
/// Hands are filled in input order. When there are not enough cards the
/// trailing hands come up short; sizing the deck is the caller's job.
#[must_use]
pub fn deal(cards: &[Card], player_count: usize, per_player: usize) -> Deal {
    let mut rest = cards;
    let mut hands = Vec::with_capacity(player_count);

    for _ in 0..player_count {
        let take = per_player.min(rest.len());
        let (hand, tail) = rest.split_at(take);
        hands.push(hand.to_vec());
        rest = tail;
    }

    Deal {
        hands,
        remaining: rest.to_vec(),
    }
}

/// Take the top (last) card of `pile`.
#[must_use]
pub fn draw_from_pile(pile: &[Card]) -> Drawn {
    match pile.split_last() {
        Some((top, below)) => Drawn {
            card: Some(top.clone()),
            pile: below.to_vec(),
        },
        None => Drawn {
            card: None,
            pile: Vec::new(),
        },
    }
}

/// Turn all but the top discard into a fresh, face-down, shuffled draw pile.
///
/// With one card or fewer in the discard pile there is nothing to
/// reshuffle and the new draw pile is empty.
#[must_use]
pub fn replenish_from_discard(discard_pile: &[Card], rng: &mut GameRng) -> Replenished {
    let Some((top, below)) = discard_pile.split_last() else {
        return Replenished {
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
        };
    };
    if below.is_empty() {
        return Replenished {
            draw_pile: Vec::new(),
            discard_pile: discard_pile.to_vec(),
        };
    }

    let mut reshuffled: Vec<Card> = below
        .iter()
        .cloned()
        .map(|mut card| {
            card.is_revealed = false;
            card
        })
        .collect();
    rng.shuffle(&mut reshuffled);

    Replenished {
        draw_pile: reshuffled,
        discard_pile: vec![top.clone()],
    }
}

/// Count of each distinct face in `cards`.
#[must_use]
pub fn composition(cards: &[Card]) -> FxHashMap<CardFace, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(card.face).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_composition() {
        let deck = create_deck();
        let counts = composition(&deck);

        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(counts[&CardFace::Fixed(0)], 8);
        assert_eq!(counts[&CardFace::Fixed(1)], 4);
        assert_eq!(counts[&CardFace::Fixed(2)], 4);
        for value in 3..=12 {
            assert_eq!(counts[&CardFace::Fixed(value)], 8, "fixed {value}");
        }
        assert_eq!(counts[&CardFace::Power { face: 1, magnitude: 1 }], 8);
        assert_eq!(counts[&CardFace::Power { face: 2, magnitude: 2 }], 8);
        assert_eq!(counts[&CardFace::Wild], 6);
    }

    #[test]
    fn test_ids_restart_per_build() {
        let first = create_deck();
        let second = create_deck();

        assert_eq!(first[0].id, CardId(0));
        assert_eq!(second[0].id, CardId(0));
        assert_eq!(first.last().unwrap().id, CardId(117));
    }

    #[test]
    fn test_cards_start_face_down() {
        assert!(create_deck()
            .iter()
            .all(|c| !c.is_revealed && !c.is_frozen && c.assigned_value.is_none()));
    }

    #[test]
    fn test_deal_short_deck() {
        let deck: Vec<Card> = (0..20).map(|i| Card::fixed(CardId(i), 5)).collect();
        let dealt = deal(&deck, 2, 12);

        assert_eq!(dealt.hands[0].len(), 12);
        assert_eq!(dealt.hands[1].len(), 8);
        assert!(dealt.remaining.is_empty());
    }

    #[test]
    fn test_draw_from_empty_pile() {
        let drawn = draw_from_pile(&[]);
        assert!(drawn.card.is_none());
        assert!(drawn.pile.is_empty());
    }

    #[test]
    fn test_replenish_single_card_discard() {
        let mut rng = GameRng::new(1);
        let discard = vec![Card::fixed(CardId(0), 4).revealed()];

        let result = replenish_from_discard(&discard, &mut rng);
        assert!(result.draw_pile.is_empty());
        assert_eq!(result.discard_pile, discard);
    }
}
