//! What a player may do right now.
//!
//! Pure queries over `GameState` and `Hand`; nothing here mutates. Callers
//! consult these before invoking a `GameState` handler, which otherwise
//! ignores calls whose preconditions fail.

pub mod actions;
pub mod queries;

pub use actions::{valid_actions, Action};
pub use queries::{
    can_create_powerset, can_draw_from_deck, can_draw_from_discard, can_go_out, can_replace,
    can_swap_wild,
};
