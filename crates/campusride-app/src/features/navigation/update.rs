//! Navigation reducer.
//!
//! User-driven moves between screens. Intents that make no sense on the
//! current screen are ignored.

use tracing::{debug, info};

use super::{NavCommand, NavState, Screen, ScreenId, Tab};
use crate::effects::UiEffect;
use crate::features::auth::update::AuthScreenAction;

fn navigate(command: NavCommand) -> Vec<UiEffect> {
    info!(%command, "navigate");
    vec![UiEffect::Navigate(command)]
}

fn ignored(intent: &str, nav: &NavState) -> Vec<UiEffect> {
    debug!(intent, screen = ?nav.active(), "ignoring intent");
    vec![]
}

pub fn handle_open_login(nav: &mut NavState) -> Vec<UiEffect> {
    match nav.top_id() {
        Some(ScreenId::Welcome | ScreenId::Signup) => navigate(nav.push(Screen::login())),
        _ => ignored("open_login", nav),
    }
}

pub fn handle_open_signup(nav: &mut NavState) -> Vec<UiEffect> {
    match nav.top_id() {
        Some(ScreenId::Welcome | ScreenId::Login) => navigate(nav.push(Screen::signup())),
        _ => ignored("open_signup", nav),
    }
}

pub fn handle_back(nav: &mut NavState) -> Vec<UiEffect> {
    if !matches!(nav.top_id(), Some(ScreenId::Login | ScreenId::Signup)) {
        return ignored("back", nav);
    }
    match nav.pop() {
        Some(command) => navigate(command),
        None => ignored("back", nav),
    }
}

pub fn handle_select_tab(nav: &mut NavState, tab: Tab) -> Vec<UiEffect> {
    if nav.top_id() == Some(ScreenId::OnBoard) {
        return ignored("select_tab", nav);
    }
    let commands = nav.select_tab(tab);
    if commands.is_empty() {
        return ignored("select_tab", nav);
    }
    commands.into_iter().flat_map(navigate).collect()
}

pub fn handle_finish_onboarding(nav: &mut NavState) -> Vec<UiEffect> {
    if nav.top_id() != Some(ScreenId::OnBoard) {
        return ignored("finish_onboarding", nav);
    }
    navigate(nav.reset(Screen::welcome()))
}

pub fn apply_auth_action(nav: &mut NavState, action: AuthScreenAction) -> Vec<UiEffect> {
    match action {
        AuthScreenAction::Stay => vec![],
        AuthScreenAction::EnterOnBoard => navigate(nav.replace(Screen::OnBoard)),
        AuthScreenAction::RestartSignup => navigate(nav.replace(Screen::signup())),
    }
}
