//! Reporting for spacemap.
//!
//! This crate turns a scanned [`FileTree`] into its outputs:
//!
//! - **Report document** - the depth-bounded JSON tree read by the viewer
//! - **Largest entries** - the top-K files and directories across the full tree
//! - **Shortcuts** - link artifacts for those entries in a dedicated directory
//!
//! ```rust,ignore
//! use spacemap_report::{largest, render, ShortcutConfig, ShortcutWriter};
//! use spacemap_scan::{RecursiveScanner, ScanConfig};
//!
//! let config = ScanConfig::builder()
//!     .root("/path/to/scan")
//!     .largest_count(20usize)
//!     .build()
//!     .unwrap();
//! let tree = RecursiveScanner::new().scan(&config).unwrap();
//!
//! render(&tree).write_to("disk-report.json").unwrap();
//!
//! let writer = ShortcutWriter::with_config(ShortcutConfig::default());
//! writer.write(largest(&tree, 20).unwrap()).unwrap();
//! ```

mod largest;
mod render;
pub mod shortcuts;

pub use largest::{LargestError, largest};
pub use render::{Report, ReportError, ReportNode, render, render_node};
pub use shortcuts::{ShortcutConfig, ShortcutError, ShortcutSummary, ShortcutWriter};

// Re-export core types
pub use spacemap_core::{FileTree, LargestEntry, Node, NodeKind};
