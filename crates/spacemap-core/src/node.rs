//! File and directory node types.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file, symlink or any other non-directory entry.
    File,
    /// Directory.
    Directory,
    /// Entry whose metadata or contents could not be read.
    Inaccessible,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a file-like leaf.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Check if this entry could not be read.
    pub fn is_inaccessible(&self) -> bool {
        matches!(self, NodeKind::Inaccessible)
    }

    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::Inaccessible => "inaccessible",
        }
    }
}

/// A single file or directory in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Final path component.
    pub name: CompactString,

    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Node type.
    pub kind: NodeKind,

    /// Size in bytes (aggregate for directories, 0 for inaccessible entries).
    pub size: u64,

    /// Children sorted by size descending, then name ascending.
    ///
    /// `None` for files, inaccessible entries, and directories below the
    /// display depth.
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(name: impl Into<CompactString>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            size,
            children: None,
        }
    }

    /// Create a new directory node.
    ///
    /// Pass `None` for `children` when the directory sits at the display
    /// depth limit. Children are sorted on construction.
    pub fn new_directory(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        children: Option<Vec<Node>>,
    ) -> Self {
        let mut node = Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            size,
            children,
        };
        node.sort_children();
        node
    }

    /// Create an inaccessible leaf.
    pub fn new_inaccessible(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Inaccessible,
            size: 0,
            children: None,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node could not be read.
    pub fn is_inaccessible(&self) -> bool {
        self.kind.is_inaccessible()
    }

    /// Get the materialized children, empty if none were kept.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Get the number of materialized children.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name.as_str() == name)
    }

    /// Resolve a descendant by a root-relative path.
    pub fn find(&self, relative: impl AsRef<Path>) -> Option<&Node> {
        let mut current = self;
        for component in relative.as_ref().components() {
            let name = component.as_os_str().to_str()?;
            current = current.child(name)?;
        }
        Some(current)
    }

    /// Sort children by size descending, ties broken by name ascending.
    pub fn sort_children(&mut self) {
        if let Some(children) = self.children.as_mut() {
            children.sort_by(compare_by_size);
        }
    }

    /// Visit this node and every materialized descendant, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node, u32)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: u32, visit: &mut impl FnMut(&'a Node, u32)) {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// Ordering used for sibling lists: size descending, then name ascending.
pub fn compare_by_size(a: &Node, b: &Node) -> Ordering {
    b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name))
}
