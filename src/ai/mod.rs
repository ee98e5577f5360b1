//! Heuristic computer opponent.
//!
//! The AI has no private path into the game: it reads a `GameState` and
//! answers with the same `Action`s a human would submit.
//!
//! - `heuristics`: the individual decisions (reveal, draw, place, go out, swap)
//! - `turn`: `next_action`, which strings them into single steps

pub mod heuristics;
pub mod turn;

pub use heuristics::{
    consider_wild_swap, decide_disposition, decide_draw, decide_reveal_after_discard,
    find_completion_spot, first_turn_reveals, highest_revealed, should_go_out, Disposition,
};
pub use turn::next_action;
