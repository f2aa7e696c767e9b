//! Login and signup screens.

mod state;
pub mod update;

pub use state::{LoginScreen, LoginTab, SignupScreen};
