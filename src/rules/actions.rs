//! Player actions and per-phase enumeration of the legal ones.

use serde::{Deserialize, Serialize};

use super::queries::{
    can_create_powerset, can_draw_from_deck, can_draw_from_discard, can_go_out, can_replace,
    can_swap_wild,
};
use crate::cards::{ModifierSign, MAX_WILD_VALUE};
use crate::core::PlayerId;
use crate::game::{GameState, Phase};
use crate::hand::{Hand, Location};

/// Everything a player can do, fed to `GameState::apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// First-turn reveal.
    Reveal(Location),
    DrawFromDeck,
    DrawFromDiscard,
    /// Discard the drawn card.
    Discard,
    /// Put the drawn card at a position, discarding what was there.
    Replace(Location),
    /// Stack the drawn Power card with the chosen modifier.
    Powerset { at: Location, sign: ModifierSign },
    SwapWild { from: Location, to: Location },
    /// Declare what a face-up Wild in hand stands for.
    DeclareWild { at: Location, value: u8 },
    /// Declare what the drawn Wild stands for.
    DeclareDrawnWild(u8),
    RevealAfterDiscard(Location),
    GoOut,
}

/// Legal actions for `player` in the current phase.
///
/// Empty unless `player` is the one to act.
#[must_use]
pub fn valid_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    if player != state.current_player {
        return Vec::new();
    }
    let Some(hand) = state.hand(player) else {
        return Vec::new();
    };

    let mut actions = Vec::new();
    match state.phase {
        Phase::FirstTurn => {
            actions.extend(hand.unrevealed_locations().into_iter().map(Action::Reveal));
        }
        Phase::Playing | Phase::FinalTurns if state.awaiting_reveal_after_discard => {
            actions.extend(
                hand.unrevealed_locations()
                    .into_iter()
                    .map(Action::RevealAfterDiscard),
            );
        }
        Phase::Playing | Phase::FinalTurns => {
            match &state.drawn_card {
                None => {
                    if can_draw_from_deck(state) {
                        actions.push(Action::DrawFromDeck);
                    }
                    if can_draw_from_discard(state) {
                        actions.push(Action::DrawFromDiscard);
                    }
                    if can_go_out(state) {
                        actions.push(Action::GoOut);
                    }
                }
                Some(drawn) => {
                    actions.push(Action::Discard);
                    for (at, _) in hand.active_locations() {
                        if can_replace(hand, at) {
                            actions.push(Action::Replace(at));
                        }
                        if can_create_powerset(hand, at, drawn) {
                            actions.push(Action::Powerset { at, sign: ModifierSign::Negative });
                            actions.push(Action::Powerset { at, sign: ModifierSign::Positive });
                        }
                    }
                    if drawn.is_free_wild() {
                        actions.extend((0..=MAX_WILD_VALUE).map(Action::DeclareDrawnWild));
                    }
                }
            }
            actions.extend(wild_actions(hand));
        }
        Phase::Setup | Phase::Scoring | Phase::GameOver => {}
    }
    actions
}

/// Swaps and declarations for every swappable Wild in `hand`.
fn wild_actions(hand: &Hand) -> Vec<Action> {
    let mut actions = Vec::new();
    for (from, _) in hand.active_locations().filter(|&(loc, _)| can_swap_wild(hand, loc)) {
        actions.extend(
            hand.active_locations()
                .filter(|&(to, _)| to != from)
                .map(|(to, _)| Action::SwapWild { from, to }),
        );
        actions.extend((0..=MAX_WILD_VALUE).map(|value| Action::DeclareWild { at: from, value }));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId};
    use crate::core::MatchConfig;
    use crate::hand::Slot;

    fn started() -> GameState {
        let mut state = GameState::new(MatchConfig::default());
        state.start_round();
        state
    }

    #[test]
    fn test_first_turn_reveals_every_face_down() {
        let state = started();
        let actions = valid_actions(&state, state.current_player);
        assert_eq!(actions.len(), 12);
        assert!(actions.iter().all(|a| matches!(a, Action::Reveal(_))));
    }

    #[test]
    fn test_other_seat_gets_nothing() {
        let state = started();
        let other = state.current_player.left(state.player_count());
        assert!(valid_actions(&state, other).is_empty());
    }

    #[test]
    fn test_before_drawing() {
        let mut state = started();
        state.phase = Phase::Playing;
        let actions = valid_actions(&state, state.current_player);
        assert_eq!(
            actions,
            vec![Action::DrawFromDeck, Action::DrawFromDiscard, Action::GoOut]
        );
    }

    #[test]
    fn test_with_drawn_power_card() {
        let mut state = started();
        state.phase = Phase::Playing;
        let seat = state.current_player;
        state.players[seat].hand.reveal(Location::new(0, Slot::Top));
        state.drawn_card = Some(Card::power(CardId(500), 1, 1).revealed());

        let actions = valid_actions(&state, seat);
        assert_eq!(actions[0], Action::Discard);
        assert_eq!(actions.iter().filter(|a| matches!(a, Action::Replace(_))).count(), 12);
        assert_eq!(actions.iter().filter(|a| matches!(a, Action::Powerset { .. })).count(), 2);
        assert!(!actions.contains(&Action::GoOut));
    }

    #[test]
    fn test_wild_swaps_and_declarations_listed() {
        let mut state = started();
        state.phase = Phase::Playing;
        let seat = state.current_player;
        let from = Location::new(2, Slot::Middle);
        state.players[seat].hand.replace(from, Card::wild(CardId(501))).unwrap();

        let actions = valid_actions(&state, seat);
        let swaps = actions.iter().filter(|a| matches!(a, Action::SwapWild { .. })).count();
        assert_eq!(swaps, 11);
        assert!(actions.contains(&Action::DeclareWild { at: from, value: 12 }));
    }

    #[test]
    fn test_awaiting_reveal_only_reveals() {
        let mut state = started();
        state.phase = Phase::FinalTurns;
        state.awaiting_reveal_after_discard = true;
        let actions = valid_actions(&state, state.current_player);
        assert_eq!(actions.len(), 12);
        assert!(actions.iter().all(|a| matches!(a, Action::RevealAfterDiscard(_))));
    }
}
