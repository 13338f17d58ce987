//! Group Index
//!
//! Builds the directory arena for one run. Siblings are visited in byte-wise
//! file-name order and every directory in the listing consumes a sibling
//! slot, whether or not it holds workout files. The index is read-only once
//! built and is never cached across runs.

use crate::error::{ApiError, TagError};
use crate::tree::chain::IndexChain;
use crate::tree::node::{DirectoryId, DirectoryNode, WorkoutFile};
use crate::tree::walker::{is_hidden, WalkerConfig};
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

/// Directory arena plus the workout files found under the scan root
#[derive(Debug)]
pub struct GroupIndex {
    root: PathBuf,
    nodes: Vec<DirectoryNode>,
    by_relative: HashMap<PathBuf, DirectoryId>,
    labels: HashSet<String>,
    files: Vec<WorkoutFile>,
    skipped: Vec<TagError>,
    top_level_count: u32,
}

impl GroupIndex {
    /// Walk `root` and assign indices to every directory below it.
    ///
    /// Unreadable entries are recorded in [`GroupIndex::skipped`] and the walk
    /// carries on. Only a missing or non-directory root is an error.
    pub fn build(root: &Path, config: &WalkerConfig) -> Result<Self, ApiError> {
        let root = dunce::canonicalize(root)
            .map_err(|_| ApiError::InvalidPath(root.to_path_buf()))?;
        if !root.is_dir() {
            return Err(ApiError::InvalidPath(root));
        }

        let mut index = GroupIndex {
            root: root.clone(),
            nodes: Vec::new(),
            by_relative: HashMap::new(),
            labels: HashSet::new(),
            files: Vec::new(),
            skipped: Vec::new(),
            top_level_count: 0,
        };

        let skip_hidden = config.skip_hidden;
        let walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && is_hidden(entry)));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    index.record_walk_error(err);
                    continue;
                }
            };
            let relative = entry
                .path()
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());

            let file_type = entry.file_type();
            if file_type.is_dir() {
                index.insert_directory(entry.path().to_path_buf(), relative, entry.depth() - 1);
            } else if file_type.is_file() && config.is_workout(entry.path()) {
                index.insert_file(entry.path().to_path_buf(), relative);
            }
        }

        info!(
            root = %index.root.display(),
            directories = index.nodes.len(),
            workouts = index.files.len(),
            skipped = index.skipped.len(),
            "Indexed workout tree"
        );
        Ok(index)
    }

    fn insert_directory(&mut self, path: PathBuf, relative: PathBuf, depth: usize) {
        let parent = match parent_key(&relative) {
            None => None,
            Some(key) => match self.by_relative.get(key) {
                Some(id) => Some(*id),
                None => {
                    debug!("Parent of {} not indexed, skipping", relative.display());
                    return;
                }
            },
        };

        let sibling_index = match parent {
            None => {
                self.top_level_count += 1;
                self.top_level_count
            }
            Some(DirectoryId(p)) => {
                self.nodes[p].child_count += 1;
                self.nodes[p].child_count
            }
        };

        let label = directory_label(&relative);
        let id = DirectoryId(self.nodes.len());
        debug!(
            "Directory {} -> index {} at depth {}",
            label, sibling_index, depth
        );
        self.labels.insert(label.clone());
        self.by_relative.insert(relative.clone(), id);
        self.nodes.push(DirectoryNode {
            path,
            relative,
            label,
            depth,
            sibling_index,
            parent,
            workout_count: 0,
            child_count: 0,
        });
    }

    fn insert_file(&mut self, path: PathBuf, relative: PathBuf) {
        let parent = parent_key(&relative).and_then(|key| self.by_relative.get(key).copied());
        if let Some(DirectoryId(p)) = parent {
            self.nodes[p].workout_count += 1;
        }
        self.files.push(WorkoutFile {
            path,
            relative,
            parent,
        });
    }

    fn record_walk_error(&mut self, err: walkdir::Error) {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        warn!("Skipping unreadable path {}: {}", path.display(), source);
        self.skipped.push(TagError::AccessError { path, source });
    }

    /// Canonical scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directories(&self) -> &[DirectoryNode] {
        &self.nodes
    }

    pub fn directory(&self, id: DirectoryId) -> &DirectoryNode {
        &self.nodes[id.0]
    }

    /// All directories with their ids, in walk order
    pub fn entries(&self) -> impl Iterator<Item = (DirectoryId, &DirectoryNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (DirectoryId(i), node))
    }

    /// Directories that directly hold workout files
    pub fn group_bearing(&self) -> impl Iterator<Item = (DirectoryId, &DirectoryNode)> {
        self.entries().filter(|(_, node)| node.is_group_bearing())
    }

    pub fn files(&self) -> &[WorkoutFile] {
        &self.files
    }

    /// Paths the walk could not read
    pub fn skipped(&self) -> &[TagError] {
        &self.skipped
    }

    /// Number of indexed directories
    pub fn group_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.files.is_empty()
    }

    /// Chain for a directory, top-level group first
    pub fn chain_of(&self, id: DirectoryId) -> IndexChain {
        let mut segments = Vec::with_capacity(self.nodes[id.0].depth + 1);
        let mut current = Some(id);
        while let Some(DirectoryId(i)) = current {
            let node = &self.nodes[i];
            segments.push(node.sibling_index);
            current = node.parent;
        }
        segments.reverse();
        IndexChain::from_segments(segments).unwrap_or_default()
    }

    /// Chain for the directory holding `file`.
    ///
    /// Accepts absolute paths under the root or root-relative paths. Files at
    /// the root, and paths the index does not know, get an empty chain.
    pub fn chain_for(&self, file: &Path) -> IndexChain {
        let relative = if file.is_absolute() {
            match file.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => return IndexChain::empty(),
            }
        } else {
            file
        };
        parent_key(relative)
            .and_then(|key| self.by_relative.get(key))
            .map(|id| self.chain_of(*id))
            .unwrap_or_default()
    }

    /// Label (root-relative `/` path) of a directory
    pub fn directory_label(&self, id: DirectoryId) -> &str {
        &self.nodes[id.0].label
    }

    /// Whether `label` names a directory in this index
    pub fn is_directory_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

fn parent_key(relative: &Path) -> Option<&Path> {
    relative.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Join normal components with `/` regardless of platform
pub(crate) fn directory_label(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    joined.nfc().collect()
}
