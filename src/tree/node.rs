//! Directory and workout file nodes

use serde::Serialize;
use std::path::PathBuf;

/// Position of a directory in the index arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DirectoryId(pub(crate) usize);

/// Directory node representation
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub relative: PathBuf,
    /// Root-relative path joined with `/`, NFC-normalized
    pub label: String,
    /// 0 for top-level groups
    pub depth: usize,
    /// 1-based position among siblings under the same parent
    pub sibling_index: u32,
    pub parent: Option<DirectoryId>,
    /// Workout files directly inside this directory
    pub workout_count: usize,
    pub(crate) child_count: u32,
}

impl DirectoryNode {
    /// Whether this directory directly holds at least one workout file
    pub fn is_group_bearing(&self) -> bool {
        self.workout_count > 0
    }
}

/// A workout file discovered during the walk
#[derive(Debug, Clone)]
pub struct WorkoutFile {
    pub path: PathBuf,
    pub relative: PathBuf,
    /// Immediate parent directory; `None` for files at the scan root
    pub parent: Option<DirectoryId>,
}
