//! Per-player statistics folded from the event stream.

use serde::{Deserialize, Serialize};

use super::event::{DrawSource, GameEvent};
use crate::core::{PlayerId, PlayerMap};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub draws: usize,
    pub discard_draws: usize,
    /// Wild cards drawn from either pile.
    pub wild_grabs: usize,
    pub triads_completed: usize,
    pub power_stacks: usize,
    pub wild_swaps: usize,
    pub times_out_first: usize,
    pub penalties_taken: usize,
    /// Unfrozen Wild cards still in hand at scoring.
    pub wild_busts: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub players: PlayerMap<PlayerStats>,
    pub rounds_scored: u32,
    pub winner: Option<PlayerId>,
    pub events_seen: usize,
}

impl GameStats {
    pub fn from_events<'a>(
        player_count: usize,
        events: impl IntoIterator<Item = &'a GameEvent>,
    ) -> Self {
        let mut stats = Self {
            players: PlayerMap::with_default(player_count),
            rounds_scored: 0,
            winner: None,
            events_seen: 0,
        };
        for event in events {
            stats.record(event);
        }
        stats
    }

    fn record(&mut self, event: &GameEvent) {
        self.events_seen += 1;

        match event {
            GameEvent::CardDrawn { player, source, card } => {
                if let Some(s) = self.players.get_mut(*player) {
                    s.draws += 1;
                    if *source == DrawSource::Discard {
                        s.discard_draws += 1;
                    }
                    if card.is_wild() {
                        s.wild_grabs += 1;
                    }
                }
            }
            GameEvent::TriadCompleted { player, .. } => {
                self.bump(*player, |s| s.triads_completed += 1);
            }
            GameEvent::PowerStacked { player, .. } => {
                self.bump(*player, |s| s.power_stacks += 1);
            }
            GameEvent::WildSwapped { player, .. } => {
                self.bump(*player, |s| s.wild_swaps += 1);
            }
            GameEvent::WentOut { player } => {
                self.bump(*player, |s| s.times_out_first += 1);
            }
            GameEvent::PenaltyApplied { player, .. } => {
                self.bump(*player, |s| s.penalties_taken += 1);
            }
            GameEvent::RoundScored { unfrozen_wilds, .. } => {
                self.rounds_scored += 1;
                for (s, busts) in self.players.iter_mut().map(|(_, s)| s).zip(unfrozen_wilds) {
                    s.wild_busts += busts;
                }
            }
            GameEvent::GameOver { winner, .. } => self.winner = Some(*winner),
            _ => {}
        }
    }

    fn bump(&mut self, player: PlayerId, f: impl FnOnce(&mut PlayerStats)) {
        if let Some(s) = self.players.get_mut(player) {
            f(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId};
    use crate::completion::CompletionType;
    use crate::scoring::RoundScores;

    #[test]
    fn test_fold_counts() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let events = vec![
            GameEvent::CardDrawn {
                player: p0,
                source: DrawSource::Discard,
                card: Card::wild(CardId(1)),
            },
            GameEvent::CardDrawn {
                player: p1,
                source: DrawSource::Deck,
                card: Card::fixed(CardId(2), 4),
            },
            GameEvent::TriadCompleted { player: p0, triad: 0, kind: CompletionType::Set },
            GameEvent::WentOut { player: p1 },
            GameEvent::PenaltyApplied { player: p1, raw: 12, doubled: 24 },
            GameEvent::RoundScored {
                round: 1,
                scores: RoundScores { raw: vec![5, 12], adjusted: vec![5, 24] },
                unfrozen_wilds: vec![0, 1],
            },
            GameEvent::GameOver { winner: p0, totals: vec![5, 24] },
        ];

        let stats = GameStats::from_events(2, &events);

        assert_eq!(stats.players[p0].draws, 1);
        assert_eq!(stats.players[p0].discard_draws, 1);
        assert_eq!(stats.players[p0].wild_grabs, 1);
        assert_eq!(stats.players[p0].triads_completed, 1);
        assert_eq!(stats.players[p1].draws, 1);
        assert_eq!(stats.players[p1].discard_draws, 0);
        assert_eq!(stats.players[p1].times_out_first, 1);
        assert_eq!(stats.players[p1].penalties_taken, 1);
        assert_eq!(stats.players[p1].wild_busts, 1);
        assert_eq!(stats.rounds_scored, 1);
        assert_eq!(stats.winner, Some(p0));
        assert_eq!(stats.events_seen, 7);
    }
}
