// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scribe - append timestamped lines to a log file through a single writer

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use scribe_core::config::{self, Config, ENV_LOG_FILE};
use scribe_core::LogChannelSet;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "scribe",
    version,
    about = "Append timestamped lines to a log file through a single writer",
    after_help = "Environment:\n  SCRIBE_LOG_FILE    log file when --file is not given\n  \
                  SCRIBE_LOG_BUFFER  queue capacity when --buffer is not given\n  \
                  SCRIBE_FILE_MODE   creation mode when --mode is not given"
)]
struct Cli {
    /// Log file to append to
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Submissions that may queue before callers wait for room
    #[arg(short, long, value_parser = parse_buffer)]
    buffer: Option<usize>,

    /// Permission bits (octal) for a newly created log file
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<u32>,

    /// Messages to append; lines from stdin when omitted
    messages: Vec<String>,
}

fn parse_buffer(value: &str) -> Result<usize, String> {
    config::parse_log_buffer(value).map_err(str::to_string)
}

fn parse_mode(value: &str) -> Result<u32, String> {
    config::parse_file_mode(value).map_err(str::to_string)
}

#[tokio::main]
async fn main() {
    setup_logging();

    match run(Cli::parse()).await {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("Error: {} log entries could not be written", failed);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr; stdout stays clean.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Flags win over environment variables, which win over defaults.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.file {
        Some(path) => path.clone(),
        None => config::log_file()
            .ok_or_else(|| anyhow!("no log file: pass --file or set {}", ENV_LOG_FILE))?,
    };
    let mut config = Config::new(path);
    let buffer = match cli.buffer {
        Some(buffer) => Some(buffer),
        None => config::log_buffer()?,
    };
    if let Some(buffer) = buffer {
        config.log_buffer = buffer;
    }
    let mode = match cli.mode {
        Some(mode) => Some(mode),
        None => config::file_mode()?,
    };
    if let Some(mode) = mode {
        config.file_mode = mode;
    }
    Ok(config)
}

/// Append every message, then shut the writer down.
///
/// Returns the number of messages that failed to write.
async fn run(cli: Cli) -> Result<usize> {
    let config = resolve_config(&cli)?;
    debug!(?config, "resolved configuration");

    let log = Arc::new(LogChannelSet::from_config(&config));
    let worker = log.start(config.log_buffer);
    if log.ready().await.is_err() {
        worker.await??;
        bail!("log writer stopped before accepting entries");
    }

    let mut failed = 0;
    if cli.messages.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            failed += submit(&log, line).await?;
        }
    } else {
        for message in cli.messages {
            failed += submit(&log, message).await?;
        }
    }

    log.shutdown_and_wait().await?;
    worker.await??;
    info!(path = %config.path.display(), failed, "done");
    Ok(failed)
}

/// Submit one message, counting a write failure instead of aborting.
async fn submit(log: &LogChannelSet, message: String) -> Result<usize> {
    match log.submit(message).await {
        Ok(()) => Ok(0),
        Err(e) if e.is_not_running() => Err(e.into()),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(1)
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
