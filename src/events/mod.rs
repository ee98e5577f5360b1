//! Event stream and the statistics derived from it.

pub mod event;
pub mod stats;

pub use event::{DrawSource, GameEvent};
pub use stats::{GameStats, PlayerStats};
