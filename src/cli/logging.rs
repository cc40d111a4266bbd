use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::io::paths::CooeePaths;
use crate::{CooeeError, Result};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// File for the TUI (configured path or the platform data dir), stderr otherwise
    pub fn for_command(logs_to_file: bool, config: &LoggingConfig) -> Self {
        if !logs_to_file {
            return LogTarget::Stderr;
        }
        let path = config
            .file
            .clone()
            .unwrap_or_else(|| CooeePaths::default().log_file());
        LogTarget::File(path)
    }
}

/// `RUST_LOG` wins when set and valid, otherwise the given level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| CooeeError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global tracing subscriber
pub fn initialize_tracing(level: &str, target: &LogTarget) -> Result<()> {
    let filter = build_filter(level)?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr) // keep stdout for command output
                .try_init()
                .ok();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .ok();
        }
    }

    tracing::debug!(level, log_target = ?target, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_configured_level() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(build_filter("warn").unwrap().to_string(), "warn");
        assert!(build_filter("cooee=notalevel").is_err());

        std::env::set_var("RUST_LOG", "cooee=trace");
        assert_eq!(build_filter("warn").unwrap().to_string(), "cooee=trace");
        std::env::remove_var("RUST_LOG");
    }
}
