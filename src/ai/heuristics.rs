//! Rule-based opponent.
//!
//! Every decision is a fixed priority cascade: the first rule that matches
//! wins. Positions are always scanned in triad order, top to bottom, so
//! ties go to the first one found.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardFace, ModifierSign};
use crate::completion::completes_with;
use crate::core::GameRng;
use crate::events::DrawSource;
use crate::hand::{Hand, Location};
use crate::rules::can_swap_wild;

/// Take a low discard if something face-up is worth more than this.
const REPLACEABLE_ABOVE: i32 = 5;
/// Discard values this low are worth taking.
const LOW_DISCARD: u8 = 3;
/// Drawn values this low replace the highest face-up card.
const LOW_DRAW: u8 = 4;
/// ...when that card is worth more than the draw by this much.
const REPLACE_MARGIN: i32 = 2;
/// Wild cards replace (and are swapped toward) cards at least this high.
const HIGH_CARD: i32 = 8;
/// Fixed cards below this are placed blind over face-down cards.
const GAMBLE_BELOW: u8 = 6;
/// Assumed value of a face-down card.
const HIDDEN_ESTIMATE: i32 = 6;
const GO_OUT_MAX_ESTIMATE: i32 = 15;
const GO_OUT_MAX_HIDDEN: usize = 2;

/// What to do with a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// `wild_value` is the value to declare first when placing a Wild to
    /// complete its triad.
    Replace { at: Location, wild_value: Option<u8> },
    Powerset { at: Location, sign: ModifierSign },
    Discard,
}

/// Two distinct face-down positions, chosen uniformly at random.
#[must_use]
pub fn first_turn_reveals(hand: &Hand, rng: &mut GameRng) -> Vec<Location> {
    let mut candidates = hand.unrevealed_locations();
    let mut picks = Vec::with_capacity(2);
    while picks.len() < 2 && !candidates.is_empty() {
        let i = rng.gen_range_usize(0..candidates.len());
        picks.push(candidates.swap_remove(i));
    }
    picks
}

/// First position where `card` would complete its triad, plus the value
/// to declare if `card` is a Wild.
#[must_use]
pub fn find_completion_spot(hand: &Hand, card: &Card) -> Option<(Location, Option<u8>)> {
    hand.active_locations().find_map(|(at, _)| {
        let triad = hand.triad(at.triad)?;
        completes_with(triad, at.slot, card).map(|wild_value| (at, wild_value))
    })
}

/// Highest-valued face-up position; the first one found wins ties.
#[must_use]
pub fn highest_revealed(hand: &Hand) -> Option<(Location, i32)> {
    hand.active_locations()
        .filter(|(_, p)| p.is_revealed())
        .fold(None, |best: Option<(Location, i32)>, (at, p)| match best {
            Some((_, value)) if value >= p.value() => best,
            _ => Some((at, p.value())),
        })
}

fn first_unrevealed(hand: &Hand) -> Option<Location> {
    hand.active_locations()
        .find(|(_, p)| !p.is_revealed())
        .map(|(at, _)| at)
}

#[must_use]
pub fn decide_draw(hand: &Hand, discard_top: Option<&Card>) -> DrawSource {
    let Some(top) = discard_top else {
        return DrawSource::Deck;
    };

    if find_completion_spot(hand, top).is_some() {
        return DrawSource::Discard;
    }

    if matches!(top.face, CardFace::Fixed(v) if v <= LOW_DISCARD)
        && highest_revealed(hand).is_some_and(|(_, value)| value > REPLACEABLE_ABOVE)
    {
        return DrawSource::Discard;
    }

    DrawSource::Deck
}

#[must_use]
pub fn decide_disposition(hand: &Hand, drawn: &Card) -> Disposition {
    if let Some((at, wild_value)) = find_completion_spot(hand, drawn) {
        return Disposition::Replace { at, wild_value };
    }

    if drawn.is_power() {
        // Every spot gets the same magnitude, so the first one is as good
        // as any.
        let target = hand
            .active_locations()
            .find(|(_, p)| p.is_revealed() && p.value() > REPLACEABLE_ABOVE);
        if let Some((at, _)) = target {
            return Disposition::Powerset {
                at,
                sign: ModifierSign::Negative,
            };
        }
    }

    let highest = highest_revealed(hand);

    if let CardFace::Fixed(v) = drawn.face {
        if v <= LOW_DRAW {
            let threshold = i32::from(v) + REPLACE_MARGIN;
            if let Some((at, _)) = highest.filter(|&(_, value)| value > threshold) {
                return Disposition::Replace { at, wild_value: None };
            }
        }
    }

    if drawn.is_wild() {
        if let Some((at, _)) = highest.filter(|&(_, value)| value >= HIGH_CARD) {
            return Disposition::Replace { at, wild_value: None };
        }
    }

    if matches!(drawn.face, CardFace::Fixed(v) if v < GAMBLE_BELOW) {
        if let Some(at) = first_unrevealed(hand) {
            return Disposition::Replace { at, wild_value: None };
        }
    }

    Disposition::Discard
}

/// The first face-down position in a live triad.
#[must_use]
pub fn decide_reveal_after_discard(hand: &Hand) -> Option<Location> {
    first_unrevealed(hand)
}

/// Go out once the hand looks small: face-up values plus an average for
/// each face-down card.
#[must_use]
pub fn should_go_out(hand: &Hand) -> bool {
    let (estimate, hidden) = hand
        .active_locations()
        .fold((0, 0), |(sum, hidden), (_, p)| {
            if p.is_revealed() {
                (sum + p.value(), hidden)
            } else {
                (sum + HIDDEN_ESTIMATE, hidden + 1)
            }
        });
    estimate <= GO_OUT_MAX_ESTIMATE && hidden <= GO_OUT_MAX_HIDDEN
}

/// Move a free Wild card onto the highest face-up position (at least 8)
/// elsewhere in the hand. Another free Wild counts as 25 and so outranks
/// any other target.
#[must_use]
pub fn consider_wild_swap(hand: &Hand) -> Option<(Location, Location)> {
    hand.active_locations()
        .filter(|&(from, _)| can_swap_wild(hand, from))
        .find_map(|(from, _)| {
            hand.active_locations()
                .filter(|(to, p)| *to != from && p.is_revealed())
                .filter(|(_, p)| p.value() >= HIGH_CARD)
                .fold(None, |best: Option<(Location, i32)>, (to, p)| match best {
                    Some((_, value)) if value >= p.value() => best,
                    _ => Some((to, p.value())),
                })
                .map(|(to, _)| (from, to))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::hand::Slot;

    fn face_up(values: &[u8]) -> Hand {
        Hand::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Card::fixed(CardId(i as u32), v).revealed())
                .collect(),
        )
    }

    fn fixed(v: u8) -> Card {
        Card::fixed(CardId(100), v).revealed()
    }

    fn loc(triad: usize, slot: Slot) -> Location {
        Location::new(triad, slot)
    }

    #[test]
    fn test_first_turn_reveals_distinct() {
        let hand = Hand::new((0..12).map(|i| Card::fixed(CardId(i), 3)).collect());
        let mut rng = GameRng::new(5);
        for _ in 0..20 {
            let picks = first_turn_reveals(&hand, &mut rng);
            assert_eq!(picks.len(), 2);
            assert_ne!(picks[0], picks[1]);
        }
    }

    #[test]
    fn test_completion_placement_first() {
        let hand = face_up(&[5, 5, 9]);
        assert_eq!(
            decide_disposition(&hand, &fixed(5)),
            Disposition::Replace { at: loc(0, Slot::Bottom), wild_value: None }
        );
    }

    #[test]
    fn test_wild_completion_declares_value() {
        let hand = face_up(&[3, 4, 11]);
        assert_eq!(
            decide_disposition(&hand, &Card::wild(CardId(7)).revealed()),
            Disposition::Replace { at: loc(0, Slot::Bottom), wild_value: Some(5) }
        );
    }

    #[test]
    fn test_power_stacks_on_high_card() {
        let hand = face_up(&[2, 7, 1]);
        let power = Card::power(CardId(8), 2, 2).revealed();
        assert_eq!(
            decide_disposition(&hand, &power),
            Disposition::Powerset { at: loc(0, Slot::Middle), sign: ModifierSign::Negative }
        );
    }

    #[test]
    fn test_low_card_replaces_highest() {
        let hand = face_up(&[6, 10, 2, 10, 9, 0]);
        assert_eq!(
            decide_disposition(&hand, &fixed(4)),
            Disposition::Replace { at: loc(0, Slot::Middle), wild_value: None }
        );
        // Not enough margin: 5 is not more than 3 + 2.
        let tight = face_up(&[5, 1, 0]);
        let mut hidden = tight.clone();
        assert_eq!(decide_disposition(&tight, &fixed(3)), Disposition::Discard);
        hidden.triads_mut().next().unwrap()[Slot::Middle].base_mut().is_revealed = false;
        assert_eq!(
            decide_disposition(&hidden, &fixed(3)),
            Disposition::Replace { at: loc(0, Slot::Middle), wild_value: None }
        );
    }

    #[test]
    fn test_wild_replaces_high_card() {
        let hand = face_up(&[1, 8, 4]);
        assert_eq!(
            decide_disposition(&hand, &Card::wild(CardId(9)).revealed()),
            Disposition::Replace { at: loc(0, Slot::Middle), wild_value: None }
        );
        let low = face_up(&[1, 7, 4]);
        assert_eq!(
            decide_disposition(&low, &Card::wild(CardId(9)).revealed()),
            Disposition::Discard
        );
    }

    #[test]
    fn test_high_card_discarded() {
        let hand = face_up(&[1, 2, 6]);
        assert_eq!(decide_disposition(&hand, &fixed(11)), Disposition::Discard);
    }

    #[test]
    fn test_draw_source() {
        let hand = face_up(&[7, 7, 1]);
        assert_eq!(decide_draw(&hand, None), DrawSource::Deck);
        assert_eq!(decide_draw(&hand, Some(&fixed(7))), DrawSource::Discard);
        assert_eq!(decide_draw(&hand, Some(&fixed(3))), DrawSource::Discard);
        assert_eq!(decide_draw(&hand, Some(&fixed(4))), DrawSource::Deck);

        let low_hand = face_up(&[1, 5, 2]);
        assert_eq!(decide_draw(&low_hand, Some(&fixed(0))), DrawSource::Deck);
    }

    #[test]
    fn test_reveal_after_discard_skips_discarded_triads() {
        let mut hand = Hand::new((0..6).map(|i| Card::fixed(CardId(i), 2)).collect());
        hand.triads_mut().next().unwrap().is_discarded = true;
        assert_eq!(decide_reveal_after_discard(&hand), Some(loc(1, Slot::Top)));
        hand.reveal_all();
        assert_eq!(decide_reveal_after_discard(&hand), None);
    }

    #[test]
    fn test_should_go_out() {
        assert!(should_go_out(&face_up(&[1, 2, 3, 0, 0, 4])));
        assert!(!should_go_out(&face_up(&[1, 2, 3, 0, 0, 12])));

        // 3 + 6 + 6 = 15 with two hidden.
        let mut hand = face_up(&[3, 0, 0]);
        for triad in hand.triads_mut() {
            triad[Slot::Middle].base_mut().is_revealed = false;
            triad[Slot::Bottom].base_mut().is_revealed = false;
        }
        assert!(should_go_out(&hand));
    }

    #[test]
    fn test_wild_swap_targets_highest() {
        let mut hand = face_up(&[1, 9, 2, 12, 3, 4]);
        hand.replace(loc(0, Slot::Top), Card::wild(CardId(50))).unwrap();
        assert_eq!(consider_wild_swap(&hand), Some((loc(0, Slot::Top), loc(1, Slot::Top))));

        let calm = face_up(&[1, 2, 3]);
        assert_eq!(consider_wild_swap(&calm), None);
    }

    #[test]
    fn test_wild_swap_may_target_another_wild() {
        let mut hand = face_up(&[1, 9, 2, 12, 3, 4]);
        hand.replace(loc(0, Slot::Top), Card::wild(CardId(50))).unwrap();
        hand.replace(loc(1, Slot::Bottom), Card::wild(CardId(51))).unwrap();

        assert_eq!(consider_wild_swap(&hand), Some((loc(0, Slot::Top), loc(1, Slot::Bottom))));
    }
}
