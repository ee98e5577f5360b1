//! Round scoring and the match winner.
//!
//! A hand scores the effective value of every position in its live
//! triads; completed triads score nothing. Low score wins.
//!
//! ## First-out penalty
//!
//! The player who went out doubles their round score when some other
//! player finished strictly lower. A score of 0 is never doubled, and a
//! tie for lowest is not punished.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::hand::{Hand, Position};

#[must_use]
pub fn score_position(position: &Position) -> i32 {
    position.value()
}

/// Sum of position values over live triads.
#[must_use]
pub fn score_hand(hand: &Hand) -> i32 {
    hand.active_locations().map(|(_, p)| score_position(p)).sum()
}

/// Unfrozen Wild cards left in live triads; each scores 25.
#[must_use]
pub fn count_unfrozen_wilds(hand: &Hand) -> usize {
    hand.active_locations()
        .filter(|(_, p)| p.base().is_free_wild())
        .count()
}

/// Apply the first-out penalty to one round's raw scores.
#[must_use]
pub fn apply_first_out_penalty(scores: &[i32], first_out: PlayerId) -> Vec<i32> {
    let mut adjusted = scores.to_vec();
    let Some(&own) = scores.get(first_out.index()) else {
        return adjusted;
    };
    if own == 0 {
        return adjusted;
    }

    let lowest_other = scores
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != first_out.index())
        .map(|(_, &s)| s)
        .min();

    if lowest_other.is_some_and(|low| low < own) {
        adjusted[first_out.index()] = own * 2;
    }
    adjusted
}

/// Raw and final (post-penalty) scores for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScores {
    pub raw: Vec<i32>,
    pub adjusted: Vec<i32>,
}

impl RoundScores {
    /// Whether `player`'s score was doubled.
    #[must_use]
    pub fn penalized(&self, player: PlayerId) -> bool {
        self.raw.get(player.index()) != self.adjusted.get(player.index())
    }
}

/// Score every hand and apply the penalty to whoever went out.
#[must_use]
pub fn calculate_round_scores<'a>(
    hands: impl IntoIterator<Item = &'a Hand>,
    first_out: Option<PlayerId>,
) -> RoundScores {
    let raw: Vec<i32> = hands.into_iter().map(score_hand).collect();
    let adjusted = match first_out {
        Some(player) => apply_first_out_penalty(&raw, player),
        None => raw.clone(),
    };
    RoundScores { raw, adjusted }
}

/// Seat with the lowest cumulative total; the earliest seat wins ties.
#[must_use]
pub fn winner(totals: &[i32]) -> Option<PlayerId> {
    totals
        .iter()
        .enumerate()
        .min_by_key(|&(i, &total)| (total, i))
        .map(|(i, _)| PlayerId::new(i as u8))
}
