use std::sync::Arc;

use campusride_core::auth::{AuthClient, AuthRequest};
use campusride_core::form::SubmitHandle;
use campusride_core::provider::{IdentityProvider, ProviderKind, ProviderOutcome, adapt_outcome};
use tracing::warn;

use crate::common::TaskId;
use crate::events::UiEvent;

/// Sends one login or signup request.
pub async fn auth_request(
    client: AuthClient,
    task: TaskId,
    handle: SubmitHandle,
    request: AuthRequest,
) -> UiEvent {
    let result = client.submit(&request).await;
    UiEvent::AuthCompleted {
        task,
        handle,
        result,
    }
}

/// Runs a provider's sign-in flow. A provider that was never registered
/// fails like any other provider error.
pub async fn provider_sign_in(
    provider: Option<Arc<dyn IdentityProvider>>,
    kind: ProviderKind,
    task: TaskId,
    handle: SubmitHandle,
) -> UiEvent {
    let outcome = match provider {
        Some(provider) => provider.sign_in().await,
        None => {
            warn!(%kind, "no identity provider registered");
            ProviderOutcome::Failed {
                reason: "provider not registered".to_string(),
            }
        }
    };
    UiEvent::AuthCompleted {
        task,
        handle,
        result: adapt_outcome(kind, outcome),
    }
}
