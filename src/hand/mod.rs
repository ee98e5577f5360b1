//! Hand layout: positions, triads, and the hand itself.
//!
//! - `position`: a base card plus its powerset, and the `Slot`/`Location` addressing
//! - `triad`: three positions scored together
//! - `layout`: the `Hand` and its placement operations

pub mod layout;
pub mod position;
pub mod triad;

pub use layout::Hand;
pub use position::{Location, Position, PowerLayer, Slot};
pub use triad::Triad;
