//! Structured game events.
//!
//! The state machine appends one event per observable change, in order.
//! Observers (renderers, telemetry, replay tools) read the stream instead
//! of scraping status text.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, ModifierSign};
use crate::completion::CompletionType;
use crate::core::PlayerId;
use crate::hand::Location;
use crate::scoring::RoundScores;

/// Pile a card was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    Deck,
    Discard,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        dealer: PlayerId,
        first_player: PlayerId,
    },
    CardRevealed {
        player: PlayerId,
        at: Location,
    },
    CardDrawn {
        player: PlayerId,
        source: DrawSource,
        card: Card,
    },
    /// The discard pile was reshuffled into a new draw pile.
    DrawPileReplenished {
        cards: usize,
    },
    CardPlaced {
        player: PlayerId,
        at: Location,
        card: Card,
        replaced: Vec<Card>,
    },
    PowerStacked {
        player: PlayerId,
        at: Location,
        card: Card,
        sign: ModifierSign,
    },
    CardDiscarded {
        player: PlayerId,
        card: Card,
    },
    /// `at` is `None` for the card in hand (drawn, not yet placed).
    WildDeclared {
        player: PlayerId,
        at: Option<Location>,
        value: u8,
    },
    WildSwapped {
        player: PlayerId,
        from: Location,
        to: Location,
    },
    TriadCompleted {
        player: PlayerId,
        triad: usize,
        kind: CompletionType,
    },
    WentOut {
        player: PlayerId,
    },
    RoundScored {
        round: u32,
        scores: RoundScores,
        /// Per seat, Wild cards that scored 25.
        unfrozen_wilds: Vec<usize>,
    },
    PenaltyApplied {
        player: PlayerId,
        raw: i32,
        doubled: i32,
    },
    GameOver {
        winner: PlayerId,
        totals: Vec<i32>,
    },
}

impl GameEvent {
    /// Seat the event is about, if it concerns one player.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardRevealed { player, .. }
            | GameEvent::CardDrawn { player, .. }
            | GameEvent::CardPlaced { player, .. }
            | GameEvent::PowerStacked { player, .. }
            | GameEvent::CardDiscarded { player, .. }
            | GameEvent::WildDeclared { player, .. }
            | GameEvent::WildSwapped { player, .. }
            | GameEvent::TriadCompleted { player, .. }
            | GameEvent::WentOut { player }
            | GameEvent::PenaltyApplied { player, .. } => Some(*player),
            GameEvent::RoundStarted { .. }
            | GameEvent::DrawPileReplenished { .. }
            | GameEvent::RoundScored { .. }
            | GameEvent::GameOver { .. } => None,
        }
    }
}
