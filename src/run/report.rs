//! Run report types.

use crate::error::TagError;
use crate::writer::OutputMode;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome class of one workout file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Fields were rewritten and persisted (or would be, on a dry run)
    Tagged,
    /// Output equals input; in-place runs leave the file untouched
    Unchanged,
    /// The file could not be processed; see `failure`
    Skipped,
}

/// Failure details kept for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub reason: String,
}

impl From<&TagError> for Failure {
    fn from(err: &TagError) -> Self {
        Failure {
            kind: err.kind(),
            reason: err.reason(),
        }
    }
}

/// One row of the report
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Path relative to the scan root
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

/// A directory or entry the walk could not read
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub failure: Failure,
}

/// Summary of one tagging run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub output: OutputMode,
    pub dry_run: bool,
    pub started_at: String,
    /// Number of indexed directories
    pub groups: usize,
    pub files: Vec<FileOutcome>,
    pub skipped_paths: Vec<SkippedPath>,
}

impl RunReport {
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Files that were tagged or already up to date
    pub fn processed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status != FileStatus::Skipped)
            .count()
    }

    /// Skipped files, in walk order
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Skipped)
    }

    /// Whether every file and directory was handled
    pub fn is_clean(&self) -> bool {
        self.skipped_paths.is_empty() && self.failures().next().is_none()
    }
}
