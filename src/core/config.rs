//! Status report configuration
//!
//! ```toml
//! [report]
//! show_privileges = false
//! pretty = true
//!
//! [logging]
//! filter = "info"
//! ```
//!
//! Every field is optional; missing sections fall back to their defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Report defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Expand privileges when the request does not ask for them
    pub show_privileges: bool,
    /// Pretty-print JSON replies
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            show_privileges: false,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusConfig {
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

impl StatusConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Load configuration from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
