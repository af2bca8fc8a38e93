//! Local state configuration: task expiry, on-disk state and theme support.

use crate::domain::theme::ThemeSupport;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// How long finished tasks stay visible before they are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTrackerConfig {
    pub completed_ttl: Duration,
    pub failed_ttl: Duration,
}

impl Default for TaskTrackerConfig {
    fn default() -> Self {
        Self {
            completed_ttl: Duration::from_secs(3),
            failed_ttl: Duration::from_secs(5),
        }
    }
}

impl TaskTrackerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            completed_ttl: Duration::from_millis(
                env::var("FINDASH_TASK_COMPLETED_TTL_MS")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse::<u64>()
                    .context("Failed to parse FINDASH_TASK_COMPLETED_TTL_MS")?,
            ),
            failed_ttl: Duration::from_millis(
                env::var("FINDASH_TASK_FAILED_TTL_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse::<u64>()
                    .context("Failed to parse FINDASH_TASK_FAILED_TTL_MS")?,
            ),
        })
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the persisted key-value state.
    pub state_dir: PathBuf,
    /// Where PDF and parquet exports are written.
    pub export_dir: PathBuf,
    pub theme_support: ThemeSupport,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        let state_dir = match env::var("FINDASH_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => match env::var("HOME") {
                Ok(home) => PathBuf::from(home).join(".findash"),
                Err(_) => {
                    warn!("HOME is not set, keeping state in ./.findash");
                    PathBuf::from(".findash")
                }
            },
        };

        let export_dir = env::var("FINDASH_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| state_dir.join("exports"));

        let theme_support = match env::var("FINDASH_THEME_SUPPORT") {
            Ok(raw) => ThemeSupport::from_str(&raw)?,
            Err(_) => ThemeSupport::default(),
        };

        Ok(Self {
            state_dir,
            export_dir,
            theme_support,
        })
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join("state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_tracker_defaults() {
        let config = TaskTrackerConfig::default();
        assert_eq!(config.completed_ttl, Duration::from_secs(3));
        assert_eq!(config.failed_ttl, Duration::from_secs(5));
    }
}
