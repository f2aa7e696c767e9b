//! Feature slices for the controller (state/update per slice).

pub mod auth;
pub mod bootstrap;
pub mod navigation;
