//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ZwotagConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<ZwotagConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file, with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ZwotagConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> ZwotagConfig {
        ZwotagConfig::default()
    }
}
