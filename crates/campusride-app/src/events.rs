//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: readiness
//! signals from the loaders, user intents from the host, and completions
//! sent back by spawned tasks through the runtime inbox.

use campusride_core::auth::AuthResult;
use campusride_core::form::SubmitHandle;
use campusride_core::provider::ProviderKind;
use campusride_core::readiness::ReadinessSignal;
use campusride_core::validation::FieldKey;

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::features::auth::LoginTab;
use crate::features::navigation::Tab;

#[derive(Debug)]
pub enum UiEvent {
    /// The controller is up. Arms the splash timer.
    Start,

    /// Asset or font loader progress.
    Readiness(ReadinessSignal),

    /// A user action on the active screen.
    Intent(UserIntent),

    /// A spawned task has started.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// The splash dwell timer fired.
    SplashElapsed { task: TaskId },

    /// A cancellable task stopped before finishing.
    TaskCancelled { kind: TaskKind, task: TaskId },

    /// An auth request or provider sign-in resolved.
    AuthCompleted {
        task: TaskId,
        handle: SubmitHandle,
        result: AuthResult,
    },

    /// Tear the controller down.
    Shutdown,
}

/// User actions, as reported by the navigation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    OpenLogin,
    OpenSignup,
    Back,
    SelectTab(Tab),
    SelectLoginTab(LoginTab),
    EditField { key: FieldKey, value: String },
    ToggleSecret,
    Submit,
    ProviderSignIn(ProviderKind),
    FinishOnboarding,
}

impl From<UserIntent> for UiEvent {
    fn from(intent: UserIntent) -> Self {
        UiEvent::Intent(intent)
    }
}

impl From<ReadinessSignal> for UiEvent {
    fn from(signal: ReadinessSignal) -> Self {
        UiEvent::Readiness(signal)
    }
}
