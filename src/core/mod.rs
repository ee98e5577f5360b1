//! Core building blocks: seats, per-seat storage, seeded RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{ConfigError, MatchConfig, MatchConfigBuilder, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
