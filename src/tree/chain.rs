//! Index chains and the bracket tag format

use serde::Serialize;
use std::fmt;

/// Sibling indices from the top-level group down to a directory
///
/// Every segment is at least 1. An empty chain means the file sits at the
/// scan root and carries no tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IndexChain(Vec<u32>);

impl IndexChain {
    /// Build a chain, rejecting zero segments
    pub fn from_segments(segments: Vec<u32>) -> Option<Self> {
        if segments.iter().any(|&s| s == 0) {
            return None;
        }
        Some(IndexChain(segments))
    }

    pub fn empty() -> Self {
        IndexChain(Vec::new())
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `[i]`, `[i-j]`, ...; `None` for an empty chain
    pub fn tag(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let joined = self
            .0
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("-");
        Some(format!("[{}]", joined))
    }
}

impl fmt::Display for IndexChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(&tag),
            None => Ok(()),
        }
    }
}
