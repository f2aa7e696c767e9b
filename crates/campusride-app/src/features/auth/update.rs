//! Auth feature reducer.
//!
//! Edits and submissions always target the form of the top screen. Results
//! are routed back by session id, so a result for a screen that has been
//! popped finds nothing and is dropped.

use campusride_core::auth::AuthResult;
use campusride_core::form::{FormKind, SubmitError, SubmitHandle};
use campusride_core::provider::ProviderKind;
use campusride_core::validation::FieldKey;
use tracing::{debug, info, warn};

use super::LoginTab;
use crate::common::TaskSeq;
use crate::effects::UiEffect;
use crate::features::navigation::{NavState, Screen};

/// What the navigation reducer should do after an auth result.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthScreenAction {
    Stay,
    EnterOnBoard,
    RestartSignup,
}

pub fn handle_edit(nav: &mut NavState, key: FieldKey, value: String) -> Vec<UiEffect> {
    let Some(form) = nav.active_form_mut() else {
        debug!(%key, "ignoring edit: no form on screen");
        return vec![];
    };
    match form.set_field(key, value) {
        Ok(next) => *form = next,
        Err(err) => debug!(%err, "ignoring edit"),
    }
    vec![]
}

pub fn handle_toggle_secret(nav: &mut NavState) -> Vec<UiEffect> {
    if let Some(form) = nav.active_form_mut() {
        *form = form.toggle_secret();
    }
    vec![]
}

pub fn handle_select_login_tab(nav: &mut NavState, tab: LoginTab) -> Vec<UiEffect> {
    match nav.top_mut() {
        Some(Screen::Login(login)) => login.tab = tab,
        _ => debug!(?tab, "ignoring login tab outside login screen"),
    }
    vec![]
}

pub fn handle_submit(nav: &mut NavState, task_seq: &mut TaskSeq) -> Vec<UiEffect> {
    let Some(form) = nav.active_form_mut() else {
        debug!("ignoring submit: no form on screen");
        return vec![];
    };

    let (next, outcome) = form.begin_submit();
    *form = next;
    match outcome {
        Ok(handle) => {
            let request = form.request();
            let task = task_seq.next_id();
            debug!(?task, path = request.path(), "submitting");
            vec![UiEffect::SpawnAuthRequest {
                task,
                handle,
                request,
            }]
        }
        Err(SubmitError::InvalidFields) => {
            debug!(errors = form.errors().count(), "submit blocked by validation");
            vec![]
        }
        Err(err) => {
            debug!(%err, "ignoring submit");
            vec![]
        }
    }
}

/// Third-party sign-in is offered on the signup screen only.
pub fn handle_provider_sign_in(
    nav: &mut NavState,
    task_seq: &mut TaskSeq,
    provider: ProviderKind,
) -> Vec<UiEffect> {
    let Some(Screen::Signup(signup)) = nav.top_mut() else {
        debug!(%provider, "ignoring provider sign-in outside signup");
        return vec![];
    };

    let (next, outcome) = signup.form.begin_external();
    signup.form = next;
    match outcome {
        Ok(handle) => {
            let task = task_seq.next_id();
            vec![UiEffect::SpawnProviderSignIn {
                task,
                handle,
                provider,
            }]
        }
        Err(err) => {
            debug!(%provider, %err, "ignoring provider sign-in");
            vec![]
        }
    }
}

/// Applies an auth result to the session that submitted it.
pub fn handle_auth_result(
    nav: &mut NavState,
    handle: SubmitHandle,
    result: &AuthResult,
) -> AuthScreenAction {
    let session = handle.session();
    let Some((form, on_top)) = nav.session_mut(session) else {
        info!(%session, "dropping auth result for a closed screen");
        return AuthScreenAction::Stay;
    };

    let kind = form.kind();
    match form.complete_submit(handle, result) {
        Ok(next) => *form = next,
        Err(err) => {
            warn!(%session, %err, "dropping auth result");
            return AuthScreenAction::Stay;
        }
    }

    if let AuthResult::Failure { user_message } = result {
        warn!(%user_message, "authentication failed");
        return AuthScreenAction::Stay;
    }
    if !on_top {
        debug!(%session, "screen is covered, not navigating");
        return AuthScreenAction::Stay;
    }

    match result {
        AuthResult::Success { .. } => AuthScreenAction::EnterOnBoard,
        AuthResult::Cancelled if kind == FormKind::Signup => AuthScreenAction::RestartSignup,
        _ => AuthScreenAction::Stay,
    }
}
