//! Configuration management module for the sparse grid.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
//! - Component-wise validation
mod neighbors;
use std::env;

pub use neighbors::*;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::constants::CONFIG_ENV_PREFIX;
use crate::constants::CONFIG_ENV_SEPARATOR;
use crate::constants::CONFIG_PATH_ENV;
use crate::Result;

/// Main configuration container for grid behavior
///
/// Combines all section configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `GRID_CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GridConfig {
    /// Defaults for neighbor enumeration
    #[serde(default)]
    pub neighbors: NeighborConfig,
}

impl GridConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Configuration sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from `GRID_CONFIG_PATH` environment variable (if set)
    /// 3. Environment variables with `GRID__` prefix (highest priority)
    ///
    /// # Note
    /// This method does NOT validate the configuration. Callers MUST call `validate()`
    /// before handing the configuration to a grid.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("GRID__NEIGHBORS__DISTANCE", "2");
    /// let cfg = GridConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            debug!("loading grid config from {}", config_path);
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(Self::environment());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        debug!("applying grid config override from {}", path);
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates configuration and returns validated instance.
    pub fn validate(self) -> Result<Self> {
        self.neighbors.validate()?;
        Ok(self)
    }

    fn environment() -> Environment {
        Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator(CONFIG_ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true)
    }
}
