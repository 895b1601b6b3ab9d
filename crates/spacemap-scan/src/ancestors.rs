//! Directory identity tracking along the current traversal path.

use std::collections::HashSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Identity of a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirIdentity {
    /// Device and inode number.
    Inode { device: u64, inode: u64 },
    /// Canonical path, where inodes are not available.
    Path(PathBuf),
}

impl DirIdentity {
    /// Identify a directory from its (non-following) metadata.
    #[cfg(unix)]
    pub fn of(_path: &Path, metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self::Inode {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    pub fn of(path: &Path, _metadata: &Metadata) -> Option<Self> {
        std::fs::canonicalize(path).ok().map(Self::Path)
    }
}

/// Set of directories on the current depth-first path.
///
/// Only ancestors are tracked. A directory reached again through another
/// branch (hard links, bind mounts) is walked and counted again under that
/// parent.
#[derive(Debug, Default)]
pub struct AncestorSet {
    on_path: HashSet<DirIdentity>,
}

impl AncestorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            on_path: HashSet::new(),
        }
    }

    /// Enter a directory. Returns `false` if it is already on the path.
    pub fn enter(&mut self, identity: DirIdentity) -> bool {
        self.on_path.insert(identity)
    }

    /// Leave a directory previously entered.
    pub fn leave(&mut self, identity: &DirIdentity) {
        self.on_path.remove(identity);
    }

    /// Check if a directory is on the current path.
    pub fn contains(&self, identity: &DirIdentity) -> bool {
        self.on_path.contains(identity)
    }

    /// Current path depth in directories.
    pub fn len(&self) -> usize {
        self.on_path.len()
    }

    /// Check if no directory is entered.
    pub fn is_empty(&self) -> bool {
        self.on_path.is_empty()
    }
}
