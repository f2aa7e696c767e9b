//! Bootstrap reducer.
//!
//! Booting -> Splash once the render gate holds, then Splash -> Welcome once
//! the splash dwell has elapsed. The dwell timer is armed when the controller
//! starts, runs alongside loading and is never restarted. Either may finish
//! first.

use campusride_core::readiness::ReadinessSignal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::features::navigation::{Screen, ScreenId};
use crate::state::AppState;

/// Arms the splash timer. Later calls are no-ops.
pub fn handle_start(app: &mut AppState) -> Vec<UiEffect> {
    start_splash_timer(app).into_iter().collect()
}

pub fn handle_signal(app: &mut AppState, signal: &ReadinessSignal) -> Vec<UiEffect> {
    if !app.readiness.apply(signal) {
        return vec![];
    }
    advance(app)
}

pub fn handle_splash_elapsed(app: &mut AppState, task: TaskId) -> Vec<UiEffect> {
    if !app.tasks.splash_timer.finish_if_active(task) {
        debug!(?task, "ignoring stale splash timer");
        return vec![];
    }
    app.readiness.apply(&ReadinessSignal::SplashTimerElapsed);
    advance(app)
}

pub fn handle_cancelled(app: &mut AppState, kind: TaskKind, task: TaskId) -> Vec<UiEffect> {
    if kind == TaskKind::SplashTimer && app.tasks.splash_timer.finish_if_active(task) {
        debug!(?task, "splash timer cancelled");
    }
    vec![]
}

/// Moves forward as far as the current readiness allows.
fn advance(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();

    if app.nav.is_booting() && app.readiness.can_render() {
        info!("resources ready, showing splash");
        effects.push(UiEffect::Navigate(app.nav.reset(Screen::Splash)));
    }

    if app.readiness.splash_timer_elapsed() && app.nav.top_id() == Some(ScreenId::Splash) {
        info!("splash dwell elapsed, showing welcome");
        effects.push(UiEffect::Navigate(app.nav.reset(Screen::welcome())));
    }

    effects
}

/// The token is stored before the task exists so teardown can always reach it.
fn start_splash_timer(app: &mut AppState) -> Option<UiEffect> {
    if app.tasks.splash_timer.is_running() || app.readiness.splash_timer_elapsed() {
        return None;
    }
    let task = app.task_seq.next_id();
    let cancel = CancellationToken::new();
    app.tasks.splash_timer.active = Some(task);
    app.tasks.splash_timer.cancel = Some(cancel.clone());
    debug!(?task, dwell = ?app.splash_dwell, "arming splash timer");
    Some(UiEffect::StartSplashTimer {
        task,
        dwell: app.splash_dwell,
        cancel,
    })
}
