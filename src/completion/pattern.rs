//! Triad completion patterns.
//!
//! A triad is complete when its three values, read top to bottom, are
//! all equal (a set) or step by exactly one up or down (a run). Only fully
//! face-up triads that are still in play are checked.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, MAX_WILD_VALUE};
use crate::hand::{Position, Slot, Triad};

/// Which pattern completed a triad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionType {
    Set,
    AscendingRun,
    DescendingRun,
}

#[must_use]
pub fn is_set(values: [i32; 3]) -> bool {
    values[0] == values[1] && values[1] == values[2]
}

#[must_use]
pub fn is_ascending_run(values: [i32; 3]) -> bool {
    values[1] == values[0] + 1 && values[2] == values[1] + 1
}

#[must_use]
pub fn is_descending_run(values: [i32; 3]) -> bool {
    values[1] == values[0] - 1 && values[2] == values[1] - 1
}

/// Pattern formed by `values`, checked set first.
#[must_use]
pub fn classify(values: [i32; 3]) -> Option<CompletionType> {
    if is_set(values) {
        Some(CompletionType::Set)
    } else if is_ascending_run(values) {
        Some(CompletionType::AscendingRun)
    } else if is_descending_run(values) {
        Some(CompletionType::DescendingRun)
    } else {
        None
    }
}

/// Pattern completed by `triad`, if any.
///
/// `None` for discarded triads and for triads with any face-down position.
#[must_use]
pub fn completion_type(triad: &Triad) -> Option<CompletionType> {
    if triad.is_discarded || !triad.all_revealed() {
        return None;
    }
    classify(triad.completion_values())
}

#[must_use]
pub fn is_triad_complete(triad: &Triad) -> bool {
    completion_type(triad).is_some()
}

/// Value a Wild card at `wild_slot` would need to complete `triad`.
///
/// The other two positions must be face-up. A set is tried first; failing
/// that, the single run the slot allows is solved for. The answer must lie
/// in `0..=12`. Only one run candidate is ever produced for a given pair of
/// neighbours, so there is no tie to break between ascending and descending.
#[must_use]
pub fn wild_value_for_completion(triad: &Triad, wild_slot: Slot) -> Option<u8> {
    let others: Vec<&Position> = Slot::ALL
        .into_iter()
        .filter(|&slot| slot != wild_slot)
        .map(|slot| &triad[slot])
        .collect();
    if others.iter().any(|p| !p.is_revealed()) {
        return None;
    }
    let (a, b) = (others[0].completion_value(), others[1].completion_value());

    let candidate = if a == b {
        Some(a)
    } else {
        match wild_slot {
            // wild, a, b
            Slot::Top if b == a + 1 => Some(a - 1),
            Slot::Top if b == a - 1 => Some(a + 1),
            // a, wild, b
            Slot::Middle if b == a + 2 => Some(a + 1),
            Slot::Middle if b == a - 2 => Some(a - 1),
            // a, b, wild
            Slot::Bottom if b == a + 1 => Some(b + 1),
            Slot::Bottom if b == a - 1 => Some(b - 1),
            _ => None,
        }
    };

    candidate
        .filter(|v| (0..=i32::from(MAX_WILD_VALUE)).contains(v))
        .and_then(|v| u8::try_from(v).ok())
}

/// Would placing `card` face-up at `slot` (replacing what is there)
/// complete `triad`?
///
/// For a Wild card the best declared value is assumed. Returns the value
/// to declare for Wild cards, `Some(None)` for other cards, and `None`
/// when the placement does not complete the triad.
#[must_use]
pub fn completes_with(triad: &Triad, slot: Slot, card: &Card) -> Option<Option<u8>> {
    if triad.is_discarded {
        return None;
    }
    let mut trial = triad.clone();
    let mut placed = card.clone();
    placed.is_revealed = true;

    let declared = if placed.is_free_wild() {
        let value = wild_value_for_completion(&trial, slot)?;
        placed.assigned_value = Some(value);
        Some(value)
    } else {
        None
    };

    trial.put(slot, Position::new(placed));
    is_triad_complete(&trial).then_some(declared)
}
