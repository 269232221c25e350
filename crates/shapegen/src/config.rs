//! Defaults read from a TOML config file
//!
//! ```toml
//! time_format = "2006-01-02"
//! tag = "csv"
//! unexported = false
//! log_level = "info"
//! ```
//!
//! Command-line flags take precedence over every value here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Log filter used when neither a flag, the config file nor `RUST_LOG` sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub time_format: Option<String>,
    pub tag: Option<String>,
    pub unexported: Option<bool>,
    pub log_level: Option<String>,
}

impl CliConfig {
    pub fn from_toml(path: &Path, input: &str) -> Result<Self, CliError> {
        toml::from_str(input).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::io("read", path.display().to_string(), e))?;
        Self::from_toml(path, &content)
    }

    /// Load the file when a path is given, otherwise use empty defaults
    pub fn load_optional(path: Option<&Path>) -> Result<Self, CliError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// The log filter to install, preferring `flag` over the file
    pub fn log_level(&self, flag: Option<&str>) -> String {
        flag.or(self.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    }
}
