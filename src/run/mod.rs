//! Tagging run
//!
//! Builds the group index for a root, then reads, rewrites and persists each
//! workout file on its own. A file's failure is recorded in the report and
//! the run moves on; nothing is retried and nothing already written is
//! rolled back.

mod report;

pub use report::{Failure, FileOutcome, FileStatus, RunReport, SkippedPath};

use crate::config::TaggingConfig;
use crate::document::{DocumentError, WorkoutDocument};
use crate::error::{ApiError, TagError};
use crate::tree::{GroupIndex, IndexChain, WalkerConfig, WorkoutFile};
use crate::writer::{persist_atomic, OutputMode, TagWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a run should put its output, before the root is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    InPlace,
    /// `<root-name><suffix>` next to the root
    SiblingMirror { suffix: String },
    /// Explicit mirror directory
    Directory(PathBuf),
}

/// Options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub walker: WalkerConfig,
    pub target: OutputTarget,
    /// Compute and report without writing anything
    pub dry_run: bool,
}

impl From<&TaggingConfig> for RunOptions {
    fn from(config: &TaggingConfig) -> Self {
        let target = if config.in_place {
            OutputTarget::InPlace
        } else {
            OutputTarget::SiblingMirror {
                suffix: config.output_suffix.clone(),
            }
        };
        Self {
            walker: WalkerConfig::from(config),
            target,
            dry_run: false,
        }
    }
}

/// Tag every workout file under `root`.
///
/// Returns `Err` only when the run cannot start (bad root or output
/// location); per-file problems end up in the report.
pub fn run(root: &Path, options: &RunOptions) -> Result<RunReport, ApiError> {
    let started_at = chrono::Utc::now().to_rfc3339();
    let index = GroupIndex::build(root, &options.walker)?;
    let output = resolve_output(index.root(), &options.target)?;
    info!(
        "Tagging {} ({}){}",
        index.root().display(),
        describe_output(&output),
        if options.dry_run { " [dry run]" } else { "" }
    );

    let context = FileContext {
        index: &index,
        writer: TagWriter::new(),
        output: &output,
        dry_run: options.dry_run,
    };

    let mut files = Vec::with_capacity(index.files().len());
    for file in index.files() {
        let chain = file
            .parent
            .map(|dir| index.chain_of(dir))
            .unwrap_or_default();
        let outcome = match context.process(file, &chain) {
            Ok((status, destination)) => {
                debug!("{} -> {:?} {}", file.relative.display(), status, chain);
                FileOutcome {
                    path: file.relative.clone(),
                    status,
                    tag: chain.tag(),
                    destination,
                    failure: None,
                }
            }
            Err(err) => {
                warn!("Skipping {}", err);
                FileOutcome {
                    path: file.relative.clone(),
                    status: FileStatus::Skipped,
                    tag: chain.tag(),
                    destination: None,
                    failure: Some(Failure::from(&err)),
                }
            }
        };
        files.push(outcome);
    }

    let skipped_paths = index
        .skipped()
        .iter()
        .map(|err| SkippedPath {
            path: err.path().to_path_buf(),
            failure: Failure::from(err),
        })
        .collect();

    let report = RunReport {
        root: index.root().to_path_buf(),
        output,
        dry_run: options.dry_run,
        started_at,
        groups: index.group_count(),
        files,
        skipped_paths,
    };
    info!(
        "Processed {} groups, {} files.",
        report.groups,
        report.processed_count()
    );
    Ok(report)
}

struct FileContext<'a> {
    index: &'a GroupIndex,
    writer: TagWriter,
    output: &'a OutputMode,
    dry_run: bool,
}

impl FileContext<'_> {
    /// Read, rewrite and persist one file
    fn process(
        &self,
        file: &WorkoutFile,
        chain: &IndexChain,
    ) -> Result<(FileStatus, Option<PathBuf>), TagError> {
        let source = read_workout(&file.path)?;
        let mut document =
            WorkoutDocument::parse(source).map_err(|e| document_error(&file.path, e))?;

        if let Some(dir) = file.parent {
            self.writer.apply(
                &mut document,
                chain,
                self.index.directory_label(dir),
                |line| self.index.is_directory_label(line),
            );
        }

        let modified = document.is_modified();
        if self.output.is_in_place() && !modified {
            return Ok((FileStatus::Unchanged, None));
        }

        let destination = self.output.destination(&file.path, &file.relative);
        if !self.dry_run {
            persist_atomic(&destination, document.render().as_bytes()).map_err(|source| {
                TagError::WriteError {
                    path: destination.clone(),
                    source,
                }
            })?;
        }

        let status = if modified {
            FileStatus::Tagged
        } else {
            FileStatus::Unchanged
        };
        Ok((status, Some(destination)))
    }
}

/// Read a workout file, replacing invalid UTF-8 sequences
fn read_workout(path: &Path) -> Result<String, TagError> {
    let bytes = std::fs::read(path).map_err(|source| TagError::AccessError {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                "{} is not valid UTF-8; invalid sequences replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

fn document_error(path: &Path, err: DocumentError) -> TagError {
    match err {
        DocumentError::MissingField(field) => TagError::MissingFieldError {
            path: path.to_path_buf(),
            field: field.element(),
        },
        other => TagError::ParseError {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Turn the requested target into a concrete mode for a canonical `root`.
///
/// A mirror directory must not live inside the root, or the next run would
/// index its own output.
pub fn resolve_output(root: &Path, target: &OutputTarget) -> Result<OutputMode, ApiError> {
    let mirror = match target {
        OutputTarget::InPlace => return Ok(OutputMode::InPlace),
        OutputTarget::SiblingMirror { suffix } => match OutputMode::sibling_mirror(root, suffix) {
            Some(OutputMode::Mirror(dir)) => dir,
            _ => return Err(ApiError::InvalidPath(root.to_path_buf())),
        },
        OutputTarget::Directory(dir) => absolutize(dir)?,
    };

    if mirror.starts_with(root) {
        return Err(ApiError::InvalidPath(mirror));
    }
    Ok(OutputMode::Mirror(mirror))
}

fn absolutize(dir: &Path) -> Result<PathBuf, ApiError> {
    if let Ok(canonical) = dunce::canonicalize(dir) {
        return Ok(canonical);
    }
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|_| ApiError::InvalidPath(dir.to_path_buf()))?;
    let cwd = dunce::canonicalize(&cwd).unwrap_or(cwd);
    Ok(cwd.join(dir))
}

fn describe_output(output: &OutputMode) -> String {
    match output {
        OutputMode::InPlace => "in place".to_string(),
        OutputMode::Mirror(dir) => format!("mirror to {}", dir.display()),
    }
}
