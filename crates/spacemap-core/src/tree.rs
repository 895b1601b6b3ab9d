//! Scanned tree container and statistics.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::EntryInaccessible;
use crate::node::{Node, NodeKind};

/// Summary statistics for a scanned tree, counted over the full traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size in bytes.
    pub total_size: u64,
    /// Total number of file-like entries (symlinks included).
    pub total_files: u64,
    /// Total number of directories, root excluded.
    pub total_dirs: u64,
    /// Total number of symbolic links.
    pub total_symlinks: u64,
    /// Total number of inaccessible entries.
    pub total_inaccessible: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
    /// Largest file (path, size).
    pub largest_file: Option<(PathBuf, u64)>,
    /// Entries eligible for the largest list: every non-root file-like
    /// entry and directory, whether or not it was kept.
    #[serde(default)]
    pub largest_candidates: u64,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, path: &std::path::Path, size: u64, depth: u32) {
        self.total_files += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);

        if self.largest_file.as_ref().is_none_or(|(_, s)| size > *s) {
            self.largest_file = Some((path.to_path_buf(), size));
        }
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink. The link is also counted as a file.
    pub fn record_symlink(&mut self) {
        self.total_symlinks += 1;
    }

    /// Record an inaccessible entry.
    pub fn record_inaccessible(&mut self, depth: u32) {
        self.total_inaccessible += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// One candidate for the largest-entries list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestEntry {
    /// Absolute path.
    pub path: PathBuf,
    /// Size in bytes (aggregate for directories).
    pub size: u64,
    /// File or directory.
    pub kind: NodeKind,
}

impl LargestEntry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, size: u64, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            size,
            kind,
        }
    }

    /// Rank order: larger sizes first, then path ascending.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Complete scanned tree with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTree {
    /// Root node, truncated at the display depth.
    pub root: Node,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Entries that could not be read.
    pub inaccessible: Vec<EntryInaccessible>,

    /// Largest entries across the full tree, in rank order.
    pub largest: Vec<LargestEntry>,
}

impl FileTree {
    /// Create a new file tree.
    pub fn new(
        root: Node,
        root_path: PathBuf,
        config: ScanConfig,
        stats: TreeStats,
        scan_duration: Duration,
        inaccessible: Vec<EntryInaccessible>,
        largest: Vec<LargestEntry>,
    ) -> Self {
        Self {
            root,
            root_path,
            scan_duration,
            config,
            stats,
            inaccessible,
            largest,
        }
    }

    /// Get the total size of the tree.
    pub fn total_size(&self) -> u64 {
        self.root.size
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Check if any entry could not be read.
    pub fn has_inaccessible(&self) -> bool {
        !self.inaccessible.is_empty()
    }
}
