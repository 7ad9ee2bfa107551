//! Tracing subscriber setup.
//!
//! The interactive view owns the terminal, so it logs to a file in the data
//! directory. One-shot subcommands log to stderr.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `SCHEDNAV_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const LOG_ENV_VAR: &str = "SCHEDNAV_LOG";

pub const LOG_FILE_NAME: &str = "schednav.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(sink: &LogSink, level: &str) -> Result<()> {
    match sink {
        LogSink::Stderr => tracing_subscriber::registry()
            .with(build_env_filter(level))
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}")),
        LogSink::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(build_env_filter(level))
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .try_init()
                .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level))
}
