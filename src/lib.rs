//! Zwotag: directory-group tags for workout files
//!
//! Rewrites each workout file under a directory tree so that its `<name>`
//! ends with a bracketed group tag (`[i]`, `[i-j]`, ...) derived from the
//! directory hierarchy, and its `<description>` starts with the directory
//! path. Filtering tools can then search on directory structure.

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod run;
pub mod tooling;
pub mod tree;
pub mod writer;
