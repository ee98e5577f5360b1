//! # kapow-engine
//!
//! Rules engine for the KAPOW! card game: deck, hands of triads,
//! completion detection, scoring, a match state machine, and a heuristic
//! computer opponent.
//!
//! ## Design Principles
//!
//! 1. **One writer**: `GameState` owns every pile and hand. All mutation
//!    goes through its handlers (or `GameState::apply`), one call at a time.
//!
//! 2. **Quiet no-ops**: Handlers whose preconditions fail change nothing
//!    and return `false`. The `rules` queries say what is legal.
//!
//! 3. **Reproducible**: Every shuffle and AI coin flip draws from a seeded
//!    `GameRng`. Same seed, same actions, same match.
//!
//! 4. **Structured history**: Each observable change is recorded as a
//!    `GameEvent`; statistics are folded from the stream.
//!
//! ## Modules
//!
//! - `core`: Player ids, per-seat storage, RNG, match configuration
//! - `cards`: Card model and the 118-card deck
//! - `hand`: Positions, triads, hands
//! - `completion`: Set and run detection, Wild value solving
//! - `rules`: Legal-action queries and the `Action` type
//! - `game`: Phases and the state machine
//! - `scoring`: Hand scores, first-out penalty, match winner
//! - `events`: Event stream and derived statistics
//! - `ai`: Heuristic opponent
//!
//! ## Example
//!
//! ```
//! use kapow_engine::{ai, GameState, MatchConfig};
//!
//! let config = MatchConfig::builder().players(["Ada", "Kai"]).max_rounds(1).build().unwrap();
//! let mut state = GameState::new(config);
//! state.start_round();
//!
//! let mut rng = state.fork_rng();
//! let seat = state.current_player;
//! if let Some(action) = ai::next_action(&state, seat, &mut rng) {
//!     assert!(state.apply(seat, &action));
//! }
//! ```

pub mod core;
pub mod cards;
pub mod hand;
pub mod completion;
pub mod rules;
pub mod game;
pub mod scoring;
pub mod events;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, GameRngState, MatchConfig, PlayerId, PlayerMap};

pub use crate::cards::{Card, CardFace, CardId, ModifierSign};

pub use crate::hand::{Hand, Location, Position, Slot, Triad};

pub use crate::completion::CompletionType;

pub use crate::rules::{valid_actions, Action};

pub use crate::game::{GameState, Phase, Player};

pub use crate::scoring::RoundScores;

pub use crate::events::{DrawSource, GameEvent, GameStats};
