//! Core CampusRide client library (config, validation, forms, auth client, readiness).

pub mod auth;
pub mod config;
pub mod form;
pub mod logging;
pub mod provider;
pub mod readiness;
pub mod validation;
