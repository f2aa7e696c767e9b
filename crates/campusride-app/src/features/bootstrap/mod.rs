//! First-paint gate and splash dwell.

pub mod update;
