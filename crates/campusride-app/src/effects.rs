//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover navigation host calls, timers and network work; the reducer
//! itself never performs I/O.
//!
//! Cancellation is decided by the reducer via `UiEffect::CancelTask` and
//! carried out by the runtime calling `token.cancel()`.

use std::time::Duration;

use campusride_core::auth::AuthRequest;
use campusride_core::form::SubmitHandle;
use campusride_core::provider::ProviderKind;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::features::navigation::NavCommand;

#[derive(Debug)]
pub enum UiEffect {
    /// Tell the navigation host to change screens.
    Navigate(NavCommand),

    /// Start the one-shot splash dwell timer. `cancel` is already held in
    /// `Tasks::splash_timer`.
    StartSplashTimer {
        task: TaskId,
        dwell: Duration,
        cancel: CancellationToken,
    },

    /// Send a login or signup request.
    SpawnAuthRequest {
        task: TaskId,
        handle: SubmitHandle,
        request: AuthRequest,
    },

    /// Run a third-party sign-in flow.
    SpawnProviderSignIn {
        task: TaskId,
        handle: SubmitHandle,
        provider: ProviderKind,
    },

    /// Cancel a running task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    Quit,
}
