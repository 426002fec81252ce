// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appender configuration and centralized environment variable access.

use std::path::PathBuf;

use thiserror::Error;

/// Default submission queue capacity
pub const DEFAULT_LOG_BUFFER: usize = 64;

/// Permission bits for a newly created log file: owner+group write, nothing else
pub const DEFAULT_FILE_MODE: u32 = 0o220;

pub const ENV_LOG_FILE: &str = "SCRIBE_LOG_FILE";
pub const ENV_LOG_BUFFER: &str = "SCRIBE_LOG_BUFFER";
pub const ENV_FILE_MODE: &str = "SCRIBE_FILE_MODE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Appender configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target log file (relative or absolute)
    pub path: PathBuf,
    /// Maximum in-flight submissions before `submit` waits for room
    pub log_buffer: usize,
    /// Permission bits applied only when the file is created
    pub file_mode: u32,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            log_buffer: DEFAULT_LOG_BUFFER,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

/// Log file override
pub fn log_file() -> Option<PathBuf> {
    std::env::var_os(ENV_LOG_FILE).map(PathBuf::from)
}

/// Submission queue capacity override
pub fn log_buffer() -> Result<Option<usize>, ConfigError> {
    let Ok(value) = std::env::var(ENV_LOG_BUFFER) else {
        return Ok(None);
    };
    parse_log_buffer(&value)
        .map(Some)
        .map_err(|reason| ConfigError::Invalid {
            var: ENV_LOG_BUFFER,
            value,
            reason,
        })
}

/// File creation mode override
pub fn file_mode() -> Result<Option<u32>, ConfigError> {
    let Ok(value) = std::env::var(ENV_FILE_MODE) else {
        return Ok(None);
    };
    parse_file_mode(&value)
        .map(Some)
        .map_err(|reason| ConfigError::Invalid {
            var: ENV_FILE_MODE,
            value,
            reason,
        })
}

pub fn parse_log_buffer(value: &str) -> Result<usize, &'static str> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1"),
        Ok(n) => Ok(n),
        Err(_) => Err("not a positive integer"),
    }
}

/// Parse permission bits written in octal, with or without a `0o` / `0` prefix.
pub fn parse_file_mode(value: &str) -> Result<u32, &'static str> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
    let mode = u32::from_str_radix(digits, 8).map_err(|_| "not an octal mode")?;
    if mode > 0o7777 {
        return Err("out of range");
    }
    Ok(mode)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
