//! Structured logging via the `tracing` ecosystem.
//!
//! The terminal belongs to the game screen, so log output only ever goes to a
//! file. Without a file no subscriber is installed and every event is dropped.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither RUST_LOG nor `--log-level` is given
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter: RUST_LOG wins, then the caller's filter, then the default
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_FILTER)))
}

/// Install the global subscriber writing plain-text lines to `log_file`
pub fn init_logging(log_file: Option<&Path>, level: Option<&str>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        for filter_str in ["info", "debug,grid_snake::game_loop=trace", "warn"] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {}",
                filter_str
            );
        }
    }

    #[test]
    fn test_no_file_installs_nothing() {
        assert!(init_logging(None, Some("debug")).is_ok());
    }

    #[test]
    fn test_log_file_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("snake.log");

        init_logging(Some(&log_path), Some("debug")).unwrap();
        tracing::info!("hello from the test");

        assert!(log_path.exists());
    }
}
