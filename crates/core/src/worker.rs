// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The writer worker: sole owner of the log file.
//!
//! Drains the submission channel in FIFO order, stamps and appends each
//! record, and resolves the record with the outcome. Stops on the shutdown
//! signal, rejecting whatever is still queued.

use std::io;
use std::path::Path;

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::AppendError;
use crate::format::format_entry;
use crate::record::LogRecord;

/// Lifecycle of the worker bound to a channel set, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// No worker has been started yet
    Unbound,
    /// Worker claimed the set and is opening the file
    Starting,
    /// Accepting and writing records
    Serving,
    /// Shutdown requested; new submissions are rejected
    Draining,
    /// Terminal
    Stopped,
}

impl WorkerState {
    pub fn is_running(self) -> bool {
        matches!(self, WorkerState::Serving)
    }
}

/// Open the target for appending, creating it (and its parent directories)
/// if needed. `mode` only applies when the file is created.
pub(crate) async fn open_log_file(path: &Path, mode: u32) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path).await
}

pub(crate) struct Worker<'a, C: Clock> {
    file: File,
    clock: &'a C,
    path: &'a Path,
    appended: u64,
    failed: u64,
}

impl<'a, C: Clock> Worker<'a, C> {
    pub(crate) fn new(file: File, clock: &'a C, path: &'a Path) -> Self {
        Self {
            file,
            clock,
            path,
            appended: 0,
            failed: 0,
        }
    }

    /// Serve records until shutdown is signaled.
    ///
    /// Shutdown wins over pending records: once it is observed nothing
    /// else is written. Closing the submission channel wakes callers
    /// waiting for queue room, and every record still queued is resolved
    /// with `NotRunning`.
    pub(crate) async fn serve(
        &mut self,
        mut records: mpsc::Receiver<LogRecord>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                biased;

                // A dropped shutdown sender counts as a request too
                _ = &mut shutdown => break,

                record = records.recv() => match record {
                    Some(record) => self.append(record).await,
                    // Every sender is gone: nothing can arrive again
                    None => break,
                },
            }
        }

        records.close();
        shutdown.close();

        let mut rejected = 0u64;
        while let Some(record) = records.recv().await {
            record.resolve(Err(AppendError::NotRunning));
            rejected += 1;
        }

        debug!(
            path = %self.path.display(),
            appended = self.appended,
            failed = self.failed,
            rejected,
            "log writer drained"
        );
    }

    async fn append(&mut self, record: LogRecord) {
        let entry = format_entry(self.clock.now(), record.message());
        match self.write(entry.as_bytes()).await {
            Ok(()) => {
                self.appended += 1;
                debug!(bytes = entry.len(), "appended log entry");
                record.resolve(Ok(()));
            }
            Err(e) => {
                self.failed += 1;
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to append log entry"
                );
                record.resolve(Err(AppendError::Write(e)));
            }
        }
    }

    /// Write one entry and wait for it to reach the file, so failures
    /// surface against the record that caused them.
    async fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes).await?;
        self.file.flush().await
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
