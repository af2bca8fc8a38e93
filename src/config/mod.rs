//! Configuration module for findash.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: backend API endpoints and local state.

mod api_config;
mod store_config;

pub use api_config::{
    ApiConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, ServiceFamily,
};
pub use store_config::{StorageConfig, TaskTrackerConfig};

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub tasks: TaskTrackerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api = ApiConfig::from_env().context("Failed to load API config")?;
        let tasks = TaskTrackerConfig::from_env().context("Failed to load task tracker config")?;
        let storage = StorageConfig::from_env().context("Failed to load storage config")?;

        Ok(Self {
            api,
            tasks,
            storage,
        })
    }
}
