//! CLI command handlers.

pub mod boot;
pub mod config;
pub mod flow;
pub mod login;
pub mod signup;
