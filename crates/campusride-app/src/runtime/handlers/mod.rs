//! Effect handlers for the controller runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. They never
//! touch state; the runtime spawns them and forwards the returned event to
//! the inbox.

pub mod auth;
pub mod timer;

pub use auth::*;
pub use timer::*;
