//! Screen stack and transition graph.

mod state;
pub mod update;

pub use state::{NavCommand, NavState, Screen, ScreenId, Tab};
