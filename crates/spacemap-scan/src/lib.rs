//! File system scanning engine for spacemap.
//!
//! This crate walks a directory tree depth-first and builds the size tree
//! consumed by `spacemap-report`. Key properties:
//!
//! - **Exact totals**: every directory is summed over its full subtree,
//!   even below the display depth
//! - **Bounded output**: nodes are only built down to
//!   [`ScanConfig::max_display_depth`]
//! - **No link following**: symlinks are leaves sized by the link itself
//! - **Local failures**: unreadable entries become inaccessible leaves; only
//!   an unreadable root fails the scan
//!
//! # Example
//!
//! ```rust,no_run
//! use spacemap_scan::{RecursiveScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let scanner = RecursiveScanner::new();
//! let tree = scanner.scan(&config).unwrap();
//!
//! println!("Total size: {} bytes", tree.total_size());
//! println!("Inaccessible: {}", tree.inaccessible.len());
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use spacemap_scan::{RecursiveScanner, ScanConfig};
//!
//! let scanner = RecursiveScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         println!("Scanned {} files", progress.files_scanned);
//!     }
//! });
//! ```

mod ancestors;
mod largest;
mod progress;
mod scanner;

pub use ancestors::{AncestorSet, DirIdentity};
pub use largest::LargestTracker;
pub use progress::ScanProgress;
pub use scanner::RecursiveScanner;

// Re-export core types for convenience
pub use spacemap_core::{
    EntryInaccessible, FileTree, InaccessibleReason, LargestEntry, Node, NodeKind, ScanConfig,
    ScanError, TreeStats,
};
