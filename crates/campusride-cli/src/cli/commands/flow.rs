//! Headless controller driver shared by the flow commands.

use anyhow::{Context, Result, bail};
use campusride_app::{AppRuntime, NavCommand, NavState, NavigationHost, ScreenId, UserIntent};
use campusride_core::config::Config;
use campusride_core::form::FormSession;
use campusride_core::readiness::ReadinessSignal;
use campusride_core::validation::FieldKey;
use tracing::debug;

/// Prints each navigation command to stdout.
pub struct PrintHost;

impl NavigationHost for PrintHost {
    fn navigate(&mut self, command: NavCommand, nav: &NavState) {
        debug!(history = ?nav.history(), "navigated");
        println!("-> {command}");
    }
}

pub type Runtime = AppRuntime<PrintHost>;

/// Boots the controller to the Welcome screen.
///
/// There are no real loaders here, so every configured asset resolves and
/// fonts load straight away. The splash dwell still runs on the clock,
/// counted from `start`.
pub async fn boot(config: &Config) -> Result<Runtime> {
    let mut rt = AppRuntime::from_config(config, PrintHost)?;
    rt.start();

    let assets: Vec<String> = rt
        .state
        .readiness
        .assets()
        .pending()
        .map(str::to_owned)
        .collect();
    for asset in assets {
        rt.dispatch(ReadinessSignal::AssetResolved(asset).into());
    }
    rt.dispatch(ReadinessSignal::FontsLoaded.into());

    if !rt
        .run_until(|s| s.nav.top_id() == Some(ScreenId::Welcome))
        .await
    {
        bail!("controller stopped before reaching Welcome");
    }
    Ok(rt)
}

/// Fills the active form, submits it and waits for the outcome.
///
/// # Errors
/// Returns the server message, or the field errors when nothing was sent.
pub async fn submit(rt: &mut Runtime, fields: Vec<(FieldKey, String)>) -> Result<()> {
    for (key, value) in fields {
        rt.dispatch(UserIntent::EditField { key, value }.into());
    }
    rt.dispatch(UserIntent::Submit.into());
    rt.run_until(|s| {
        s.tasks.auth.is_empty() && !s.nav.active_form().is_some_and(FormSession::is_submitting)
    })
    .await;

    if rt.state.nav.top_id() == Some(ScreenId::OnBoard) {
        return Ok(());
    }

    let form = rt
        .state
        .nav
        .active_form()
        .context("sign-in screen closed unexpectedly")?;
    if let Some(message) = form.server_message() {
        bail!("{message}");
    }
    let errors: Vec<&str> = form.errors().map(|(_, message)| message).collect();
    if errors.is_empty() {
        bail!("sign-in did not complete");
    }
    bail!("{}", errors.join("\n"))
}
