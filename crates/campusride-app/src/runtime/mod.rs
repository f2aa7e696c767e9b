//! Controller runtime: runs the event loop and executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Spawned handlers send their resulting `UiEvent` to `inbox_tx`. The
//! runtime pulls one event at a time from `inbox_rx`, feeds it to the
//! reducer and executes what comes back. Readiness signals and user intents
//! from the host go straight in through [`AppRuntime::dispatch`].
//!
//! Structure:
//! - `mod.rs`: Core runtime (AppRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations

mod handlers;
mod inbox;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use campusride_core::auth::AuthClient;
use campusride_core::config::Config;
use campusride_core::provider::{IdentityProvider, ProviderKind};
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::host::NavigationHost;
use crate::state::AppState;
use crate::update;

/// Headless controller runtime.
///
/// Owns the state and the navigation host. A splash timer still running
/// when the runtime is dropped is cancelled.
pub struct AppRuntime<H> {
    /// Controller state.
    pub state: AppState,
    host: H,
    auth: AuthClient,
    providers: HashMap<ProviderKind, Arc<dyn IdentityProvider>>,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - the event loop reads from this.
    inbox_rx: UiEventReceiver,
}

impl<H: NavigationHost> AppRuntime<H> {
    pub fn new(state: AppState, auth: AuthClient, host: H) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            host,
            auth,
            providers: HashMap::new(),
            inbox_tx,
            inbox_rx,
        }
    }

    /// Builds state and auth client from configuration.
    ///
    /// # Errors
    /// Returns an error if the account service URL is invalid.
    pub fn from_config(config: &Config, host: H) -> Result<Self> {
        let auth = AuthClient::from_config(config)?;
        Ok(Self::new(AppState::new(config), auth, host))
    }

    /// Registers an identity provider, replacing any of the same kind.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Arms the splash timer. Call once, before feeding readiness signals;
    /// the dwell then runs while assets and fonts load.
    pub fn start(&mut self) {
        self.dispatch(UiEvent::Start);
    }

    /// Runs one event through the reducer and executes its effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Waits for the next inbox event and dispatches it.
    ///
    /// Returns false once the controller has quit.
    pub async fn step(&mut self) -> bool {
        if self.state.should_quit {
            return false;
        }
        match self.inbox_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Processes inbox events until `done` holds for the state.
    ///
    /// Returns false if the controller quit first.
    pub async fn run_until<F>(&mut self, mut done: F) -> bool
    where
        F: FnMut(&AppState) -> bool,
    {
        loop {
            if done(&self.state) {
                return true;
            }
            if !self.step().await {
                return false;
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.dispatch(UiEvent::Shutdown);
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted lifecycle.
    ///
    /// The task's own event is forwarded to the inbox when it completes.
    fn spawn_task<Fut>(
        &self,
        kind: TaskKind,
        id: TaskId,
        cancel: Option<CancellationToken>,
        task: Fut,
    ) where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id, cancel },
        });
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Navigate(command) => {
                self.host.navigate(command, &self.state.nav);
            }
            UiEffect::StartSplashTimer {
                task,
                dwell,
                cancel,
            } => {
                self.spawn_task(
                    TaskKind::SplashTimer,
                    task,
                    Some(cancel.clone()),
                    handlers::splash_timer(task, dwell, cancel),
                );
            }
            UiEffect::SpawnAuthRequest {
                task,
                handle,
                request,
            } => {
                let client = self.auth.clone();
                self.spawn_task(
                    TaskKind::AuthRequest,
                    task,
                    None,
                    handlers::auth_request(client, task, handle, request),
                );
            }
            UiEffect::SpawnProviderSignIn {
                task,
                handle,
                provider,
            } => {
                let registered = self.providers.get(&provider).map(Arc::clone);
                self.spawn_task(
                    TaskKind::ProviderSignIn,
                    task,
                    None,
                    handlers::provider_sign_in(registered, provider, task, handle),
                );
            }
            UiEffect::CancelTask { kind, token } => {
                if let Some(token) = token {
                    debug!(?kind, "cancelling task");
                    token.cancel();
                }
            }
        }
    }
}

impl<H> Drop for AppRuntime<H> {
    fn drop(&mut self) {
        if let Some(token) = self.state.tasks.splash_timer.cancel.take() {
            token.cancel();
        }
    }
}
