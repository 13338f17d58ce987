//! Configuration
//!
//! Layered configuration built with the `config` crate. See
//! [`merge::service::MergeService`] for source precedence.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZwotagConfig {
    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ZwotagConfig {
    /// Render as TOML, the format of the config files
    pub fn to_toml_string(&self) -> Result<String, crate::error::ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::ApiError::ConfigError(e.to_string()))
    }
}

/// Tagging run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingConfig {
    /// Workout file extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Suffix of the sibling mirror directory
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Rewrite files in place instead of mirroring
    #[serde(default)]
    pub in_place: bool,

    /// Ignore dot-directories and dot-files
    #[serde(default = "default_true")]
    pub skip_hidden: bool,

    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["zwo".to_string(), "xml".to_string()]
}

fn default_output_suffix() -> String {
    "_tagged".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            output_suffix: default_output_suffix(),
            in_place: false,
            skip_hidden: default_true(),
            follow_symlinks: false,
        }
    }
}
