//! Report document rendering.
//!
//! The report is the JSON document read by the viewer: one object per node
//! with `name`, `path`, `size`, `kind` and, for directories within the
//! display depth, `children`. It carries no timestamps, so rendering an
//! unchanged tree twice yields the same bytes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use spacemap_core::{FileTree, Node, NodeKind};

/// Errors from producing the report document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the report file failed.
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One node of the report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    /// Final path component.
    pub name: String,
    /// Absolute path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// `file`, `directory` or `inaccessible`.
    pub kind: NodeKind,
    /// Children, largest first. Absent beyond the display depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ReportNode>>,
}

impl ReportNode {
    fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.to_string(),
            path: node.path.to_string_lossy().into_owned(),
            size: node.size,
            kind: node.kind,
            children: node
                .children
                .as_ref()
                .map(|children| children.iter().map(Self::from_node).collect()),
        }
    }
}

/// The complete report document, serialized as its root node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    /// Node for the scanned path itself.
    pub root: ReportNode,
}

impl Report {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report, replacing any existing file at `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "report written");
        Ok(())
    }
}

/// Render a scanned tree into its report document.
pub fn render(tree: &FileTree) -> Report {
    render_node(&tree.root)
}

/// Render any node as a report root.
pub fn render_node(node: &Node) -> Report {
    Report {
        root: ReportNode::from_node(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new_directory(
            "root",
            "/r",
            180,
            Some(vec![
                Node::new_file("b.txt", "/r/b.txt", 30),
                Node::new_directory("a", "/r/a", 150, None),
                Node::new_inaccessible("locked", "/r/locked"),
            ]),
        )
    }

    #[test]
    fn test_render_preserves_structure() {
        let report = render_node(&sample());

        assert_eq!(report.root.size, 180);
        let children = report.root.children.as_ref().unwrap();
        assert_eq!(children[0].name, "a");
        assert_eq!(children[0].kind, NodeKind::Directory);
        assert!(children[0].children.is_none());
        assert_eq!(children[2].kind, NodeKind::Inaccessible);
    }

    #[test]
    fn test_json_shape() {
        let json = render_node(&sample()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "root");
        assert_eq!(value["path"], "/r");
        assert_eq!(value["kind"], "directory");
        assert_eq!(value["children"][0]["name"], "a");
        assert!(value["children"][0].get("children").is_none());
        assert_eq!(value["children"][1]["kind"], "file");
        assert_eq!(value["children"][2]["kind"], "inaccessible");
        assert_eq!(value["children"][2]["size"], 0);
    }

    #[test]
    fn test_json_round_trips() {
        let report = render_node(&sample());
        let parsed: Report = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed, report);
    }
}
