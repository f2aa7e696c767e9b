//! Controller reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use tracing::debug;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{UiEvent, UserIntent};
use crate::features::{auth, bootstrap, navigation};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Start => bootstrap::update::handle_start(app),
        UiEvent::Readiness(signal) => bootstrap::update::handle_signal(app, &signal),
        UiEvent::SplashElapsed { task } => bootstrap::update::handle_splash_elapsed(app, task),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.on_started(kind, &started);
            vec![]
        }
        UiEvent::TaskCancelled { kind, task } => {
            bootstrap::update::handle_cancelled(app, kind, task)
        }
        UiEvent::Intent(intent) => handle_intent(app, intent),
        UiEvent::AuthCompleted {
            task,
            handle,
            result,
        } => {
            app.tasks.auth.remove(&task);
            let action = auth::update::handle_auth_result(&mut app.nav, handle, &result);
            navigation::update::apply_auth_action(&mut app.nav, action)
        }
        UiEvent::Shutdown => handle_shutdown(app),
    }
}

fn handle_intent(app: &mut AppState, intent: UserIntent) -> Vec<UiEffect> {
    if app.nav.is_booting() {
        debug!(?intent, "ignoring intent while booting");
        return vec![];
    }

    let nav = &mut app.nav;
    match intent {
        UserIntent::OpenLogin => navigation::update::handle_open_login(nav),
        UserIntent::OpenSignup => navigation::update::handle_open_signup(nav),
        UserIntent::Back => navigation::update::handle_back(nav),
        UserIntent::SelectTab(tab) => navigation::update::handle_select_tab(nav, tab),
        UserIntent::FinishOnboarding => navigation::update::handle_finish_onboarding(nav),
        UserIntent::SelectLoginTab(tab) => auth::update::handle_select_login_tab(nav, tab),
        UserIntent::EditField { key, value } => auth::update::handle_edit(nav, key, value),
        UserIntent::ToggleSecret => auth::update::handle_toggle_secret(nav),
        UserIntent::Submit => auth::update::handle_submit(nav, &mut app.task_seq),
        UserIntent::ProviderSignIn(provider) => {
            auth::update::handle_provider_sign_in(nav, &mut app.task_seq, provider)
        }
    }
}

/// Cancels the splash timer. Auth calls in flight are left to finish.
fn handle_shutdown(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if app.tasks.splash_timer.is_running() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::SplashTimer,
            token: app.tasks.splash_timer.cancel.take(),
        });
    }
    effects.push(UiEffect::Quit);
    effects
}
