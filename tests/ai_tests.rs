//! AI decisions and full matches played by the AI.

use kapow_engine::ai::{self, decide_disposition, Disposition};
use kapow_engine::cards::{Card, CardId};
use kapow_engine::core::{GameRng, MatchConfig, PlayerId};
use kapow_engine::events::GameStats;
use kapow_engine::game::{GameState, Phase};
use kapow_engine::hand::{Hand, Location, Slot};
use kapow_engine::rules::{can_go_out, valid_actions, Action};

/// Moves in a single round before the driver forces the current player out.
const PATIENCE: usize = 2_000;

/// Play a whole match with the AI in every seat, checking each action is
/// legal and accepted.
fn play_match(config: MatchConfig) -> GameState {
    let mut state = GameState::new(config);
    let mut rng = state.fork_rng();
    assert!(state.start_round());

    let mut moves_this_round = 0;
    for _ in 0..200_000 {
        match state.phase {
            Phase::GameOver => return state,
            Phase::Scoring => {
                assert!(state.advance_round());
                moves_this_round = 0;
                continue;
            }
            _ => {}
        }

        let seat = state.current_player;
        moves_this_round += 1;
        let action = if moves_this_round > PATIENCE && can_go_out(&state) {
            Action::GoOut
        } else {
            ai::next_action(&state, seat, &mut rng).expect("AI always has a move on its turn")
        };

        assert!(
            valid_actions(&state, seat).contains(&action),
            "{action:?} not listed as valid in {}",
            state.phase
        );
        assert!(state.apply(seat, &action), "{action:?} was refused");
    }
    panic!("match did not finish");
}

// =============================================================================
// Single decisions
// =============================================================================

#[test]
fn test_completes_set_at_bottom() {
    let hand = Hand::new(vec![
        Card::fixed(CardId(0), 5).revealed(),
        Card::fixed(CardId(1), 5).revealed(),
        Card::fixed(CardId(2), 9).revealed(),
    ]);
    let drawn = Card::fixed(CardId(3), 5).revealed();

    assert_eq!(
        decide_disposition(&hand, &drawn),
        Disposition::Replace {
            at: Location::new(0, Slot::Bottom),
            wild_value: None,
        }
    );
}

#[test]
fn test_ai_turn_completes_set() {
    let config = MatchConfig::builder().seed(3).build().unwrap();
    let mut state = GameState::new(config);
    state.start_round();
    state.phase = Phase::Playing;

    let seat = state.current_player;
    state.players[seat].hand = Hand::new(vec![
        Card::fixed(CardId(500), 5).revealed(),
        Card::fixed(CardId(501), 5).revealed(),
        Card::fixed(CardId(502), 9).revealed(),
        Card::fixed(CardId(503), 10),
        Card::fixed(CardId(504), 11),
        Card::fixed(CardId(505), 12),
    ]);
    state.discard_pile.push(Card::fixed(CardId(506), 5).revealed());

    let mut rng = GameRng::new(1);
    let draw = ai::next_action(&state, seat, &mut rng).unwrap();
    assert_eq!(draw, Action::DrawFromDiscard);
    assert!(state.apply(seat, &draw));

    let place = ai::next_action(&state, seat, &mut rng).unwrap();
    assert_eq!(place, Action::Replace(Location::new(0, Slot::Bottom)));
    assert!(state.apply(seat, &place));

    let hand = &state.players[seat].hand;
    assert!(hand.triads()[0].is_discarded);
    assert_eq!(state.discard_top().map(|c| c.id), Some(CardId(502)));
    assert_ne!(state.current_player, seat);
}

// =============================================================================
// Full matches
// =============================================================================

#[test]
fn test_two_player_match_finishes() {
    let config = MatchConfig::builder().max_rounds(3).seed(42).build().unwrap();
    let state = play_match(config);

    assert_eq!(state.phase, Phase::GameOver);
    let winner = state.result().unwrap();
    let totals = state.totals();
    for (seat, player) in state.players.iter() {
        assert_eq!(player.round_scores.len(), 3);
        assert_eq!(player.total_score, player.round_scores.iter().sum::<i32>());
        assert!(totals[seat.index()] >= totals[winner.index()]);
    }

    let stats = GameStats::from_events(state.player_count(), &state.events);
    assert_eq!(stats.rounds_scored, 3);
    assert_eq!(stats.winner, Some(winner));
    assert!(stats.players.values().all(|s| s.draws > 0));
}

#[test]
fn test_match_replays_from_seed() {
    let config = MatchConfig::builder().max_rounds(2).seed(77).build().unwrap();
    let a = play_match(config.clone());
    let b = play_match(config);
    assert_eq!(a.events, b.events);
    assert_eq!(a.totals(), b.totals());
}

#[test]
fn test_many_seats() {
    for players in [3, 5, 8] {
        let names: Vec<String> = (0..players).map(|i| format!("Bot {i}")).collect();
        let config = MatchConfig::builder()
            .players(names)
            .max_rounds(1)
            .seed(players as u64)
            .build()
            .unwrap();
        let state = play_match(config);

        assert!(state.is_game_over());
        assert_eq!(state.player_count(), players);
        assert!(state.result().is_some());
        assert!(PlayerId::all(players).all(|p| state.players[p].round_scores.len() == 1));
    }
}
