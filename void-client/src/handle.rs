//! Cancellation handle for an in-flight exchange.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use void_types::StreamOutcome;

/// Handle to one streaming exchange running on the tokio runtime.
///
/// Dropping the handle cancels the exchange. Call [`StreamHandle::detach`] to
/// let it run to completion unobserved.
#[must_use = "dropping a StreamHandle cancels the exchange"]
#[derive(Debug)]
pub struct StreamHandle {
    token: CancellationToken,
    guard: DropGuard,
    task: JoinHandle<Option<StreamOutcome>>,
}

impl StreamHandle {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<Option<StreamOutcome>>) -> Self {
        Self {
            guard: token.clone().drop_guard(),
            token,
            task,
        }
    }

    /// Abort the exchange: the in-flight request or body read is dropped and
    /// no callback runs afterwards. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel the exchange if it is still running after `deadline`.
    pub fn cancel_after(&self, deadline: Duration) {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(deadline) => {
                    tracing::debug!(?deadline, "stream deadline elapsed, cancelling");
                    token.cancel();
                }
            }
        });
    }

    /// Whether [`StreamHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the exchange has ended, for any reason.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// A token that fires when this exchange is cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the exchange to end.
    ///
    /// Returns `None` when the exchange failed (the error went to `on_error`)
    /// or its task panicked.
    pub async fn join(self) -> Option<StreamOutcome> {
        let Self { guard, task, .. } = self;
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "stream task did not complete");
                None
            }
        };
        drop(guard);
        outcome
    }

    /// Let the exchange run to completion without holding the handle.
    pub fn detach(self) {
        let Self { guard, .. } = self;
        guard.disarm();
    }
}
