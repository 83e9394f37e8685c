//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::Path;

use super::Config;

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `INGESTQ_` and use double
    /// underscores for nested values. For example:
    /// - `INGESTQ_SCHEDULER__BATCH_SIZE=5`
    /// - `INGESTQ_SERVER__PORT=8080`
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("INGESTQ")
                .separator("__")
                .try_parsing(true),
        );

        let raw = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build configuration: {e}")))?;

        let config: Config = raw
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize configuration: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string (used by tests and tooling)
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)
            .map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
