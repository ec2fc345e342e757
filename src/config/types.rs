//! Configuration types for the org chart service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default, so an empty file yields a usable configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// The socket address the server binds to.
    pub bind_addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

/// Seed data loaded into the employee store at start-up.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Path to a JSON array of employee records.
    pub employees: Option<PathBuf>,
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Policy applied to partial employee updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdatePolicy {
    /// Reject updates that carry no fields at all.
    pub reject_empty: bool,
    /// How many times a read-merge-save cycle is attempted when the stored
    /// record changes underneath it.
    pub max_attempts: u32,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            reject_empty: true,
            max_attempts: 3,
        }
    }
}

/// Bounds applied when projecting a reporting graph into a tree.
///
/// A report below `max_depth` levels, or one reached after `max_nodes`
/// tree nodes were emitted, is returned as a leaf with empty reports. The
/// distinct report count is taken from the graph and is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HierarchyLimits {
    /// Deepest level expanded below the root.
    pub max_depth: usize,
    /// Most tree nodes emitted for one resolution.
    pub max_nodes: usize,
}

impl Default for HierarchyLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_nodes: 10_000,
        }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Seed data settings.
    pub seed: SeedSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Update merge policy.
    pub updates: UpdatePolicy,
    /// Tree projection bounds.
    pub hierarchy: HierarchyLimits,
}
