//! Third-party identity providers (platform sign-in).
//!
//! The providers themselves live outside this crate. They report one of
//! three outcomes, which are adapted into an [`AuthResult`] here so the
//! controller handles them exactly like a password login.

use std::fmt;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::auth::AuthResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    Apple,
    Google,
    Facebook,
}

impl ProviderKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Apple => "Apple",
            ProviderKind::Google => "Google",
            ProviderKind::Facebook => "Facebook",
        }
    }

    /// Fixed message shown when this provider reports an error.
    pub fn failure_message(self) -> String {
        format!("Failed to sign in with {}", self.display_name())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What a provider reports back after its sign-in sheet closes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Authorized { credential: Value },
    Cancelled,
    Failed { reason: String },
}

/// A platform sign-in flow.
pub trait IdentityProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Runs the provider's sign-in flow to completion.
    fn sign_in(&self) -> BoxFuture<'static, ProviderOutcome>;
}

/// Folds a provider outcome into an [`AuthResult`].
///
/// The provider's own error text is never shown to the user.
pub fn adapt_outcome(kind: ProviderKind, outcome: ProviderOutcome) -> AuthResult {
    match outcome {
        ProviderOutcome::Authorized { credential } => AuthResult::Success {
            payload: credential,
        },
        ProviderOutcome::Cancelled => AuthResult::Cancelled,
        ProviderOutcome::Failed { reason } => {
            tracing::warn!(provider = %kind, %reason, "identity provider sign-in failed");
            AuthResult::failure(kind.failure_message())
        }
    }
}
