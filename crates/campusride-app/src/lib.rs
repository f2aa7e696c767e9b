//! Bootstrap and navigation controller for the CampusRide client.
//!
//! Elm style: `update` is a pure reducer over [`state::AppState`], and
//! [`runtime::AppRuntime`] executes the effects it returns.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod host;
pub mod runtime;
pub mod state;
pub mod update;

pub use events::{UiEvent, UserIntent};
pub use features::auth::LoginTab;
pub use features::navigation::{NavCommand, NavState, Screen, ScreenId, Tab};
pub use host::NavigationHost;
pub use runtime::AppRuntime;
pub use state::AppState;
