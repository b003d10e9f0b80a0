// src/util/log.rs

//! Logging setup - console output plus an optional append-only log file
use std::fs::{create_dir_all, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{BridgeError, Result};

pub const LOG_FILE_NAME: &str = "shady-bridge.log";

/// Install the global tracing subscriber.
///
/// `filter` uses the `RUST_LOG` directive syntax (`info`, `shady_bridge=debug`, ...).
/// Console output goes to stderr, keeping stdout free for generated config.
/// When `log_dir` is set, every event is also appended to `<log_dir>/shady-bridge.log`.
pub fn init_logging(filter: &str, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| BridgeError::RuntimeError(format!("invalid log filter '{}': {}", filter, e)))?;

    let file_layer = match log_dir {
        Some(dir) => {
            let file = open_log_file(dir)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| BridgeError::RuntimeError(format!("logger already installed: {}", e)))
}

/// Open (creating directory and file if needed) the log file in append mode
pub fn open_log_file(log_dir: &Path) -> std::io::Result<File> {
    create_dir_all(log_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_creation() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let _file = open_log_file(&log_dir).expect("Failed to open log file");

        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_log_file_is_appended_not_truncated() {
        use std::io::Write;

        let temp_dir = tempfile::TempDir::new().unwrap();
        {
            let mut file = open_log_file(temp_dir.path()).unwrap();
            writeln!(file, "first run").unwrap();
        }
        {
            let mut file = open_log_file(temp_dir.path()).unwrap();
            writeln!(file, "second run").unwrap();
        }

        let content = std::fs::read_to_string(temp_dir.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "first run\nsecond run\n");
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let result = init_logging("shady_bridge=notalevel", None);
        assert!(result.is_err());
    }
}
