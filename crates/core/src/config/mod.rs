//! Configuration module for the ingestq system
//!
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

use defaults::*;

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of work items grouped into a single batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Fixed simulated setup delay applied once per batch, in milliseconds
    #[serde(default = "default_batch_setup_delay_ms")]
    pub batch_setup_delay_ms: u64,

    /// Simulated processing delay applied per work item, in milliseconds
    #[serde(default = "default_per_item_delay_ms")]
    pub per_item_delay_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_setup_delay_ms: default_batch_setup_delay_ms(),
            per_item_delay_ms: default_per_item_delay_ms(),
        }
    }
}

/// REST server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty disables CORS, "*" allows all
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Main configuration structure for the ingestq system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Validate configuration values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.scheduler.batch_size == 0 {
            return Err(Error::config("batch_size must be at least 1".to_string()));
        }
        if self.server.host.is_empty() {
            return Err(Error::config("server host cannot be empty".to_string()));
        }
        Ok(())
    }
}
