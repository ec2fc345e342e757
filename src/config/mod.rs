//! Configuration loading and management for the org chart service.
//!
//! This module loads the service configuration from a YAML file: bind
//! address, seed data, logging and the update merge policy.
//!
//! # Example
//!
//! ```no_run
//! use org_chart_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default.yaml").unwrap();
//! println!("Log filter: {}", config.config().logging.filter);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, ConfigLoader};
pub use types::{
    HierarchyLimits, LogFormat, LoggingSettings, SeedSettings, ServerSettings, ServiceConfig,
    UpdatePolicy,
};
