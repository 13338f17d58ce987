//! Output destinations and atomic persistence

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where rewritten documents go; fixed for a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "root", rename_all = "snake_case")]
pub enum OutputMode {
    /// Rewrite files where they are
    InPlace,
    /// Mirror the relative layout under another directory
    Mirror(PathBuf),
}

impl OutputMode {
    /// Sibling mirror directory `<root-name><suffix>`
    pub fn sibling_mirror(root: &Path, suffix: &str) -> Option<Self> {
        let name = root.file_name()?.to_string_lossy();
        let parent = root.parent()?;
        Some(OutputMode::Mirror(
            parent.join(format!("{}{}", name, suffix)),
        ))
    }

    /// Destination for a file given its root-relative path
    pub fn destination(&self, source: &Path, relative: &Path) -> PathBuf {
        match self {
            OutputMode::InPlace => source.to_path_buf(),
            OutputMode::Mirror(root) => root.join(relative),
        }
    }

    pub fn is_in_place(&self) -> bool {
        matches!(self, OutputMode::InPlace)
    }
}

/// Write `contents` to `path` so that readers see either the old file or
/// the complete new one.
///
/// The data goes to a temporary file in the destination directory first,
/// which is then renamed over `path`. Missing parent directories are created.
pub fn persist_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
