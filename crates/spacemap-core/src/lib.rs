//! Core types for spacemap.
//!
//! This crate provides the data structures shared by the scanner and the
//! reporter: nodes, scanned trees, configuration, and error types.

mod config;
mod error;
mod node;
mod tree;

pub use config::{DEFAULT_DISPLAY_DEPTH, ScanConfig, ScanConfigBuilder, ScanConfigBuilderError};
pub use error::{EntryInaccessible, InaccessibleReason, ScanError};
pub use node::{Node, NodeKind, compare_by_size};
pub use tree::{FileTree, LargestEntry, TreeStats};
