//! Walk configuration and entry filters

use crate::config::TaggingConfig;
use std::path::Path;
use walkdir::DirEntry;

/// Controls which entries the group walk visits
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub follow_symlinks: bool,
    /// Skip entries whose name starts with `.`
    pub skip_hidden: bool,
    /// Workout file extensions, without the dot; matched case-insensitively
    pub extensions: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            skip_hidden: true,
            extensions: vec!["zwo".to_string(), "xml".to_string()],
        }
    }
}

impl From<&TaggingConfig> for WalkerConfig {
    fn from(config: &TaggingConfig) -> Self {
        Self {
            follow_symlinks: config.follow_symlinks,
            skip_hidden: config.skip_hidden,
            extensions: config.extensions.clone(),
        }
    }
}

impl WalkerConfig {
    /// Whether a file path names a workout document
    pub fn is_workout(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

pub(crate) fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
