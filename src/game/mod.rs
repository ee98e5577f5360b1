//! Match state and the handlers that advance it.
//!
//! - `phase`: round cycle
//! - `player`: a seat's hand and score history
//! - `state`: `GameState` and every action handler

pub mod phase;
pub mod player;
pub mod state;

pub use phase::Phase;
pub use player::Player;
pub use state::{GameState, FIRST_TURN_REVEALS};
