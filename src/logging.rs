//! Centralized structured logging configuration.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedder's choice. `init` wires up the standard one: EnvFilter,
//! stderr, pretty or JSON lines.

pub mod ledger;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable colored output
    Pretty,
    /// Structured JSON lines
    Json,
}

/// Errors from logging initialization.
#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to parse log filter: {0}")]
    FilterError(String),

    #[error("Failed to set global subscriber: {0}")]
    SetGlobalError(String),
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` env var overrides the provided level when set.
/// All output is directed to **stderr** so stdout stays free for the
/// embedder's own surface.
pub fn init(level: Level, format: LogFormat) -> Result<(), LogInitError> {
    let filter = build_env_filter(level)?;

    match format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| LogInitError::SetGlobalError(e.to_string()))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| LogInitError::SetGlobalError(e.to_string()))?;
        }
    }

    Ok(())
}

fn build_env_filter(level: Level) -> Result<EnvFilter, LogInitError> {
    // RUST_LOG overrides the provided level when set
    let filter_str = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&filter_str).map_err(|e| LogInitError::FilterError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn build_env_filter_pretty_succeeds() {
        let filter = build_env_filter(Level::DEBUG);
        assert!(filter.is_ok(), "Pretty filter should build successfully");
    }

    #[test]
    fn build_env_filter_for_json_level() {
        let filter = build_env_filter(Level::INFO);
        assert!(filter.is_ok(), "JSON filter should build successfully");
    }

    #[test]
    fn log_format_variants() {
        // Ensure both variants exist and are distinct
        assert_ne!(LogFormat::Pretty, LogFormat::Json);
    }
}
