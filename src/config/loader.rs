//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::ServiceConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ORG_CHART_CONFIG";

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use org_chart_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default.yaml")?;
/// println!("Binding to {}", loader.config().server.bind_addr);
/// # Ok::<(), org_chart_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns an error if the file is missing or is not valid YAML for
    /// [`ServiceConfig`]. Sections absent from the file take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Loads the file named by `ORG_CHART_CONFIG`, or defaults when unset.
    pub fn from_env() -> EngineResult<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> Result<ServiceConfig, String> {
        // serde_yaml rejects an empty document; treat it as all-defaults.
        if content.trim().is_empty() {
            return Ok(ServiceConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
