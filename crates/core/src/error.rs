// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the log appender

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while appending log entries
#[derive(Debug, Error)]
pub enum AppendError {
    /// The worker could not open its target file; no records were processed.
    #[error("failed to open log file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A single record could not be written. The worker keeps serving.
    #[error("failed to write log entry: {0}")]
    Write(#[source] io::Error),
    /// No worker is serving this channel set (never started, shutting down, or stopped).
    #[error("log writer is not running")]
    NotRunning,
    #[error("log writer already started for this channel set")]
    AlreadyStarted,
    #[error("log buffer must be at least 1")]
    InvalidBuffer,
}

impl AppendError {
    /// True for errors that mean the channel set no longer accepts records.
    pub fn is_not_running(&self) -> bool {
        matches!(self, AppendError::NotRunning)
    }
}
