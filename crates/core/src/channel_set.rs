// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The log channel set: shared handle between callers and the worker.
//!
//! One `LogChannelSet` backs exactly one worker over its whole life. The
//! set is shared as `Arc<LogChannelSet>`; callers only ever `submit` and
//! request shutdown, and never see the channels themselves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, DEFAULT_FILE_MODE};
use crate::error::AppendError;
use crate::record::LogRecord;
use crate::worker::{open_log_file, Worker, WorkerState};

/// Channels lent to the worker while it serves.
enum Slot {
    Unbound,
    Starting,
    Serving {
        records: mpsc::Sender<LogRecord>,
        shutdown: oneshot::Sender<()>,
    },
    Draining,
    Stopped,
}

impl Slot {
    fn state(&self) -> WorkerState {
        match self {
            Slot::Unbound => WorkerState::Unbound,
            Slot::Starting => WorkerState::Starting,
            Slot::Serving { .. } => WorkerState::Serving,
            Slot::Draining => WorkerState::Draining,
            Slot::Stopped => WorkerState::Stopped,
        }
    }
}

/// Shared handle binding a log file to its single writer worker.
///
/// ```no_run
/// # async fn demo() -> Result<(), scribe_core::AppendError> {
/// use std::sync::Arc;
/// use scribe_core::LogChannelSet;
///
/// let log = Arc::new(LogChannelSet::new("app.log"));
/// let worker = log.start(64);
/// log.ready().await?;
///
/// log.submit("service started").await?;
///
/// log.shutdown_and_wait().await?;
/// # let _ = worker.await;
/// # Ok(())
/// # }
/// ```
pub struct LogChannelSet<C: Clock = SystemClock> {
    path: PathBuf,
    file_mode: u32,
    clock: C,
    slot: Mutex<Slot>,
    state: watch::Sender<WorkerState>,
}

impl LogChannelSet<SystemClock> {
    /// Create a channel set for `path`. Channels stay unset until a worker starts.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, DEFAULT_FILE_MODE, SystemClock)
    }

    /// Create a channel set using the configured path and file mode.
    ///
    /// The configured `log_buffer` is passed to [`LogChannelSet::start`] by the caller.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config.path.clone(), config.file_mode, SystemClock)
    }
}

impl<C: Clock> LogChannelSet<C> {
    pub fn with_clock(path: impl Into<PathBuf>, file_mode: u32, clock: C) -> Self {
        let (state, _) = watch::channel(WorkerState::Unbound);
        Self {
            path: path.into(),
            file_mode,
            clock,
            slot: Mutex::new(Slot::Unbound),
            state,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Spawn the worker on the current tokio runtime.
    ///
    /// The handle resolves when the worker stops: `Ok` after a requested
    /// shutdown, `Err` if it could not start.
    pub fn start(self: &Arc<Self>, log_buffer: usize) -> JoinHandle<Result<(), AppendError>> {
        tokio::spawn(Arc::clone(self).run(log_buffer))
    }

    /// Run the worker to completion on the calling task.
    ///
    /// `log_buffer` is the number of records that may wait in the queue
    /// before `submit` has to wait for room. A zero buffer fails the start
    /// like an open failure: the set is left `Stopped`.
    pub async fn run(self: Arc<Self>, log_buffer: usize) -> Result<(), AppendError> {
        self.claim()?;
        let _stopped = StopGuard(&*self);

        if log_buffer == 0 {
            error!(path = %self.path.display(), "log writer needs a buffer of at least 1");
            return Err(AppendError::InvalidBuffer);
        }

        let file = match open_log_file(&self.path, self.file_mode).await {
            Ok(file) => file,
            Err(source) => {
                error!(
                    path = %self.path.display(),
                    error = %source,
                    "failed to open log file"
                );
                return Err(AppendError::FileOpen {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let (records_tx, records_rx) = mpsc::channel(log_buffer);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.transition(Slot::Serving {
            records: records_tx,
            shutdown: shutdown_tx,
        });
        info!(path = %self.path.display(), log_buffer, "log writer started");

        let mut worker = Worker::new(file, &self.clock, &self.path);
        worker.serve(records_rx, shutdown_rx).await;

        info!(path = %self.path.display(), "log writer stopped");
        Ok(())
    }

    /// Wait until the worker is serving.
    ///
    /// Fails with `NotRunning` if the worker stopped (or failed to start)
    /// before it got there.
    pub async fn ready(&self) -> Result<(), AppendError> {
        let mut rx = self.state.subscribe();
        let state = rx
            .wait_for(|s| matches!(s, WorkerState::Serving | WorkerState::Stopped))
            .await
            .map_err(|_| AppendError::NotRunning)?;
        if state.is_running() {
            Ok(())
        } else {
            Err(AppendError::NotRunning)
        }
    }

    /// Append `message` and wait until the worker has tried to write it.
    ///
    /// Waits for queue room when the buffer is full. Returns the write
    /// error for this record, or `NotRunning` if no worker is serving or
    /// it shut down before reaching the record.
    pub async fn submit(&self, message: impl Into<String>) -> Result<(), AppendError> {
        let records = self.records()?;
        let (record, pending) = LogRecord::new(message);
        records
            .send(record)
            .await
            .map_err(|_| AppendError::NotRunning)?;
        pending.wait().await
    }

    /// Blocking flavor of [`LogChannelSet::submit`] for plain threads.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn submit_blocking(&self, message: impl Into<String>) -> Result<(), AppendError> {
        let records = self.records()?;
        let (record, pending) = LogRecord::new(message);
        records
            .blocking_send(record)
            .map_err(|_| AppendError::NotRunning)?;
        pending.wait_blocking()
    }

    /// Signal the worker to stop, without waiting for it.
    ///
    /// New submissions are rejected from this point on. Fails with
    /// `NotRunning` when no worker is serving, including a second request.
    pub fn request_shutdown(&self) -> Result<(), AppendError> {
        let (records, shutdown) = {
            let mut slot = self.slot.lock();
            match std::mem::replace(&mut *slot, Slot::Draining) {
                Slot::Serving { records, shutdown } => {
                    self.state.send_replace(WorkerState::Draining);
                    (records, shutdown)
                }
                other => {
                    *slot = other;
                    return Err(AppendError::NotRunning);
                }
            }
        };
        info!(path = %self.path.display(), "log writer shutdown requested");
        // Signal before the last record sender drops
        let sent = shutdown.send(());
        drop(records);
        sent.map_err(|_| AppendError::NotRunning)
    }

    /// Request shutdown and wait for the worker to stop.
    pub async fn shutdown_and_wait(&self) -> Result<(), AppendError> {
        self.request_shutdown()?;
        self.stopped().await;
        Ok(())
    }

    /// Wait until the worker has stopped.
    ///
    /// Never resolves for a set whose worker is never started.
    pub async fn stopped(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so this only ends on `Stopped`
        let _ = rx.wait_for(|s| *s == WorkerState::Stopped).await;
    }

    fn records(&self) -> Result<mpsc::Sender<LogRecord>, AppendError> {
        match &*self.slot.lock() {
            Slot::Serving { records, .. } => Ok(records.clone()),
            _ => Err(AppendError::NotRunning),
        }
    }

    /// Bind this set to a new worker. A set only ever gets one.
    fn claim(&self) -> Result<(), AppendError> {
        let mut slot = self.slot.lock();
        if !matches!(*slot, Slot::Unbound) {
            return Err(AppendError::AlreadyStarted);
        }
        *slot = Slot::Starting;
        self.state.send_replace(WorkerState::Starting);
        Ok(())
    }

    fn transition(&self, next: Slot) {
        let mut slot = self.slot.lock();
        let state = next.state();
        *slot = next;
        self.state.send_replace(state);
    }
}

/// Marks the set stopped when the worker exits, however it exits.
struct StopGuard<'a, C: Clock>(&'a LogChannelSet<C>);

impl<C: Clock> Drop for StopGuard<'_, C> {
    fn drop(&mut self) {
        self.0.transition(Slot::Stopped);
    }
}

#[cfg(test)]
#[path = "channel_set_tests.rs"]
mod tests;
