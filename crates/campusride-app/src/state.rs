//! Controller state.
//!
//! ```text
//! AppState
//! ├── readiness: ReadinessState  (first-paint gate, splash timer flag)
//! ├── nav: NavState              (screen stack; screens own their forms)
//! ├── task_seq: TaskSeq          (async task id generator)
//! ├── tasks: Tasks               (task lifecycle state)
//! └── splash_dwell: Duration
//! ```

use std::time::Duration;

use campusride_core::config::Config;
use campusride_core::readiness::ReadinessState;

use crate::common::{TaskSeq, Tasks};
use crate::features::navigation::NavState;

#[derive(Debug)]
pub struct AppState {
    pub readiness: ReadinessState,
    pub nav: NavState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub splash_dwell: Duration,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_readiness(
            ReadinessState::new(config.asset_set(), config.bootstrap.asset_failure),
            config.splash_dwell(),
        )
    }

    pub fn with_readiness(readiness: ReadinessState, splash_dwell: Duration) -> Self {
        Self {
            readiness,
            nav: NavState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            splash_dwell,
            should_quit: false,
        }
    }
}
