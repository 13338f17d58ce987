//! Directory tree and group indexing
//!
//! Walks a workout tree once, assigns every directory a 1-based sibling index
//! and exposes, for any workout file, the chain of indices from the top-level
//! group down to the file's own directory.

pub mod chain;
pub mod index;
pub mod node;
pub mod walker;

pub use chain::IndexChain;
pub use index::GroupIndex;
pub use node::{DirectoryId, DirectoryNode, WorkoutFile};
pub use walker::WalkerConfig;
