// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scribe-core: single-writer asynchronous log appender
//!
//! Callers on any task or thread submit text lines; one background worker
//! owns the file and appends each line with a local timestamp, reporting
//! the outcome back to the caller that submitted it.

pub mod channel_set;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
mod record;
pub mod worker;

pub use channel_set::LogChannelSet;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError, DEFAULT_FILE_MODE, DEFAULT_LOG_BUFFER};
pub use error::AppendError;
pub use format::format_entry;
pub use worker::WorkerState;
