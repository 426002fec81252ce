// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single pending log line and its completion signal.

use tokio::sync::oneshot;

use crate::error::AppendError;

/// Outcome of one record: `Ok` once written, `Err` if the write failed or
/// the record was rejected during shutdown.
pub type Outcome = Result<(), AppendError>;

/// One submission, in flight from a caller to the worker.
///
/// The worker consumes the record when it resolves it, so a record is
/// resolved exactly once and its outcome can never be both written and
/// failed.
#[derive(Debug)]
pub(crate) struct LogRecord {
    message: String,
    done: oneshot::Sender<Outcome>,
}

/// Caller's half of a record: waits for the worker's verdict.
#[derive(Debug)]
pub(crate) struct Pending {
    done: oneshot::Receiver<Outcome>,
}

impl LogRecord {
    pub(crate) fn new(message: impl Into<String>) -> (Self, Pending) {
        let (done, rx) = oneshot::channel();
        (
            Self {
                message: message.into(),
                done,
            },
            Pending { done: rx },
        )
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    /// Deliver the outcome to the waiting caller.
    ///
    /// A caller that stopped waiting has nothing left to hear, so a closed
    /// receiver is ignored.
    pub(crate) fn resolve(self, outcome: Outcome) {
        let _ = self.done.send(outcome);
    }
}

impl Pending {
    /// Wait for the worker to resolve the record.
    ///
    /// A record dropped without a verdict means the worker went away.
    pub(crate) async fn wait(self) -> Outcome {
        self.done.await.unwrap_or(Err(AppendError::NotRunning))
    }

    /// Blocking flavor of [`Pending::wait`] for threads outside the runtime.
    pub(crate) fn wait_blocking(self) -> Outcome {
        self.done.blocking_recv().unwrap_or(Err(AppendError::NotRunning))
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
