use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::events::UiEvent;

/// Waits out the splash dwell unless cancelled first.
pub async fn splash_timer(
    task: TaskId,
    dwell: Duration,
    cancel: CancellationToken,
) -> UiEvent {
    tokio::select! {
        () = cancel.cancelled() => UiEvent::TaskCancelled {
            kind: TaskKind::SplashTimer,
            task,
        },
        () = tokio::time::sleep(dwell) => UiEvent::SplashElapsed { task },
    }
}
