//! Match configuration.
//!
//! A `MatchConfig` fixes everything about a match that does not change once
//! play starts: who sits at the table, how many rounds are played, how many
//! cards each hand is dealt, and the RNG seed.
//!
//! ```
//! use kapow_engine::core::MatchConfig;
//!
//! let config = MatchConfig::builder()
//!     .players(["You", "Kai", "Ada"])
//!     .max_rounds(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.player_count(), 3);
//! assert!(config.is_human[0]);
//! assert!(!config.is_human[2]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::DECK_SIZE;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Rejected match configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("at most 8 players supported, got {0}")]
    TooManyPlayers(usize),

    #[error("human flags cover {flags} seats but {players} players are seated")]
    HumanFlagMismatch { flags: usize, players: usize },

    #[error("a match needs at least one round")]
    NoRounds,

    #[error("hand size must be a positive multiple of 3, got {0}")]
    InvalidHandSize(usize),

    #[error("dealing {needed} cards (hands plus discard seed) exceeds the 118-card deck")]
    DeckTooSmall { needed: usize },
}

/// Validated match settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub player_names: Vec<String>,
    /// Parallel to `player_names`.
    pub is_human: Vec<bool>,
    pub max_rounds: u32,
    pub cards_per_player: usize,
    pub seed: u64,
}

impl MatchConfig {
    #[must_use]
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_names: vec!["You".to_string(), "AI".to_string()],
            is_human: vec![true, false],
            max_rounds: 10,
            cards_per_player: 12,
            seed: 42,
        }
    }
}

/// Builder for `MatchConfig`.
///
/// Seat 0 is human and every other seat is AI unless `humans` says
/// otherwise.
#[derive(Clone, Debug)]
pub struct MatchConfigBuilder {
    player_names: Vec<String>,
    is_human: Option<Vec<bool>>,
    max_rounds: u32,
    cards_per_player: usize,
    seed: u64,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        let defaults = MatchConfig::default();
        Self {
            player_names: defaults.player_names,
            is_human: None,
            max_rounds: defaults.max_rounds,
            cards_per_player: defaults.cards_per_player,
            seed: defaults.seed,
        }
    }
}

impl MatchConfigBuilder {
    pub fn players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn humans(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.is_human = Some(flags.into());
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn cards_per_player(mut self, count: usize) -> Self {
        self.cards_per_player = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        let players = self.player_names.len();
        if players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(players));
        }
        if players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(players));
        }

        let is_human = match self.is_human {
            Some(flags) if flags.len() != players => {
                return Err(ConfigError::HumanFlagMismatch {
                    flags: flags.len(),
                    players,
                });
            }
            Some(flags) => flags,
            None => (0..players).map(|seat| seat == 0).collect(),
        };

        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.cards_per_player == 0 || self.cards_per_player % 3 != 0 {
            return Err(ConfigError::InvalidHandSize(self.cards_per_player));
        }

        // One extra card seeds the discard pile.
        let needed = players * self.cards_per_player + 1;
        if needed > DECK_SIZE {
            return Err(ConfigError::DeckTooSmall { needed });
        }

        Ok(MatchConfig {
            player_names: self.player_names,
            is_human,
            max_rounds: self.max_rounds,
            cards_per_player: self.cards_per_player,
            seed: self.seed,
        })
    }
}
