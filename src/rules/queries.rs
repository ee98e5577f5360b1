//! Read-only legality checks.

use crate::cards::Card;
use crate::game::{GameState, Phase};
use crate::hand::{Hand, Location};

/// The deck can produce a card, counting a reshuffle of the discard pile.
#[must_use]
pub fn can_draw_from_deck(state: &GameState) -> bool {
    !state.draw_pile.is_empty() || state.discard_pile.len() > 1
}

#[must_use]
pub fn can_draw_from_discard(state: &GameState) -> bool {
    !state.discard_pile.is_empty()
}

fn is_live(hand: &Hand, loc: Location) -> bool {
    hand.triad(loc.triad).is_some_and(|t| !t.is_discarded)
}

/// Any card may replace any position of a triad still in play.
#[must_use]
pub fn can_replace(hand: &Hand, loc: Location) -> bool {
    is_live(hand, loc)
}

#[must_use]
pub fn can_create_powerset(hand: &Hand, loc: Location, card: &Card) -> bool {
    card.is_power()
        && is_live(hand, loc)
        && hand.position(loc).is_some_and(|p| p.is_revealed())
}

/// `loc` holds a lone, face-up, unfrozen Wild card.
#[must_use]
pub fn can_swap_wild(hand: &Hand, loc: Location) -> bool {
    is_live(hand, loc)
        && hand
            .position(loc)
            .is_some_and(|p| p.is_lone_free_wild() && p.is_revealed())
}

/// Going out replaces drawing, so it is only legal at the start of a
/// regular turn.
#[must_use]
pub fn can_go_out(state: &GameState) -> bool {
    state.phase == Phase::Playing
        && state.drawn_card.is_none()
        && !state.awaiting_reveal_after_discard
}
