//! One heuristic step at a time, expressed as an `Action`.

use super::heuristics::{
    consider_wild_swap, decide_disposition, decide_draw, decide_reveal_after_discard,
    first_turn_reveals, should_go_out, Disposition,
};
use crate::core::{GameRng, PlayerId};
use crate::events::{DrawSource, GameEvent};
use crate::game::{GameState, Phase};
use crate::rules::{can_draw_from_deck, can_draw_from_discard, can_go_out, Action};

/// The heuristic's next action for `player`, or `None` when it is not
/// their move.
///
/// Feed the result to `GameState::apply` and ask again until the turn
/// passes. At the start of a turn the order is: go out, swap a Wild (once),
/// draw. A Wild placed to complete a triad is declared first.
#[must_use]
pub fn next_action(state: &GameState, player: PlayerId, rng: &mut GameRng) -> Option<Action> {
    if player != state.current_player {
        return None;
    }
    let hand = state.hand(player)?;

    match state.phase {
        Phase::FirstTurn => first_turn_reveals(hand, rng)
            .into_iter()
            .next()
            .map(Action::Reveal),
        Phase::Playing | Phase::FinalTurns if state.awaiting_reveal_after_discard => {
            decide_reveal_after_discard(hand).map(Action::RevealAfterDiscard)
        }
        Phase::Playing | Phase::FinalTurns => match &state.drawn_card {
            None => {
                if can_go_out(state) && should_go_out(hand) {
                    return Some(Action::GoOut);
                }
                if !just_swapped(state, player) {
                    if let Some((from, to)) = consider_wild_swap(hand) {
                        return Some(Action::SwapWild { from, to });
                    }
                }
                let from_discard = decide_draw(hand, state.discard_top()) == DrawSource::Discard;
                if from_discard && can_draw_from_discard(state) {
                    Some(Action::DrawFromDiscard)
                } else if can_draw_from_deck(state) {
                    Some(Action::DrawFromDeck)
                } else if can_draw_from_discard(state) {
                    Some(Action::DrawFromDiscard)
                } else {
                    None
                }
            }
            Some(drawn) => Some(match decide_disposition(hand, drawn) {
                Disposition::Replace {
                    wild_value: Some(value),
                    ..
                } if drawn.assigned_value != Some(value) => Action::DeclareDrawnWild(value),
                Disposition::Replace { at, .. } => Action::Replace(at),
                Disposition::Powerset { at, sign } => Action::Powerset { at, sign },
                Disposition::Discard => Action::Discard,
            }),
        },
        Phase::Setup | Phase::Scoring | Phase::GameOver => None,
    }
}

/// `player`'s last action was a Wild swap; swapping again would undo it.
fn just_swapped(state: &GameState, player: PlayerId) -> bool {
    matches!(state.events.last(), Some(GameEvent::WildSwapped { player: p, .. }) if *p == player)
}
