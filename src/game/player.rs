use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// A seat at the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub is_human: bool,
    /// Replaced wholesale every round.
    pub hand: Hand,
    pub total_score: i32,
    /// Final (post-penalty) score of each round played, in order.
    pub round_scores: Vec<i32>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, is_human: bool) -> Self {
        Self {
            name: name.into(),
            is_human,
            ..Self::default()
        }
    }

    /// Add a finished round's score to the running total.
    pub fn record_round(&mut self, score: i32) {
        self.round_scores.push(score);
        self.total_score += score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_accumulates() {
        let mut player = Player::new("Ada", false);
        player.record_round(12);
        player.record_round(-3);
        assert_eq!(player.total_score, 9);
        assert_eq!(player.round_scores, vec![12, -3]);
    }
}
