//! Depth-first, size-aggregating directory scanner.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use tokio::sync::broadcast;

use spacemap_core::{
    EntryInaccessible, FileTree, Node, NodeKind, ScanConfig, ScanError, TreeStats,
};

use crate::ancestors::{AncestorSet, DirIdentity};
use crate::largest::LargestTracker;
use crate::progress::{ProgressTracker, ScanProgress};

/// Single-threaded recursive scanner.
///
/// Every directory is walked to full depth so sizes are exact, but nodes are
/// only built for levels within [`ScanConfig::max_display_depth`]. Symlinks
/// are never followed.
pub struct RecursiveScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl RecursiveScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Perform a scan of the configured root.
    ///
    /// Fails only when the root itself cannot be resolved, stat'ed or
    /// listed. Every failure below the root becomes an inaccessible leaf.
    pub fn scan(&self, config: &ScanConfig) -> Result<FileTree, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::root_unreadable(&config.root, e))?;
        let metadata =
            fs::symlink_metadata(&root_path).map_err(|e| ScanError::root_unreadable(&root_path, e))?;

        let name = root_name(&root_path);
        let mut walk = Walk::new(config, &self.progress_tx);

        tracing::debug!(root = %root_path.display(), depth = config.max_display_depth, "starting scan");

        let root = if metadata.is_dir() {
            let entries =
                fs::read_dir(&root_path).map_err(|e| ScanError::root_unreadable(&root_path, e))?;
            let identity = DirIdentity::of(&root_path, &metadata);
            if let Some(id) = &identity {
                walk.ancestors.enter(id.clone());
            }
            let (_, node) = walk.walk_dir(root_path.clone(), name, 0, true, identity, entries);
            node.unwrap_or_else(|| Node::new_directory(root_name(&root_path), &root_path, 0, None))
        } else {
            let size = metadata.len();
            walk.stats.record_file(&root_path, size, 0);
            walk.progress.record_file(size);
            Node::new_file(name, &root_path, size)
        };

        let _ = self
            .progress_tx
            .send(walk.progress.snapshot(&root_path, true));

        walk.stats.largest_candidates = walk.largest.offered();

        let scan_duration = start.elapsed();
        tracing::debug!(
            root = %root_path.display(),
            size = root.size,
            inaccessible = walk.inaccessible.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(FileTree::new(
            root,
            root_path,
            config.clone(),
            walk.stats,
            scan_duration,
            walk.inaccessible,
            walk.largest.into_sorted(),
        ))
    }
}

impl Default for RecursiveScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state threaded through one traversal.
struct Walk<'a> {
    config: &'a ScanConfig,
    progress_tx: &'a broadcast::Sender<ScanProgress>,
    progress: ProgressTracker,
    ancestors: AncestorSet,
    largest: LargestTracker,
    stats: TreeStats,
    inaccessible: Vec<EntryInaccessible>,
}

impl<'a> Walk<'a> {
    fn new(config: &'a ScanConfig, progress_tx: &'a broadcast::Sender<ScanProgress>) -> Self {
        Self {
            config,
            progress_tx,
            progress: ProgressTracker::new(),
            ancestors: AncestorSet::new(),
            largest: LargestTracker::new(config.largest_count),
            stats: TreeStats::new(),
            inaccessible: Vec::new(),
        }
    }

    /// Visit a non-root entry at `depth`.
    ///
    /// Returns the entry's full size and, when `materialize` is set, its node.
    fn visit(
        &mut self,
        path: PathBuf,
        name: CompactString,
        depth: u32,
        materialize: bool,
    ) -> (u64, Option<Node>) {
        let metadata = match fs::symlink_metadata(&path) {
            Ok(m) => m,
            Err(err) => {
                let record = EntryInaccessible::metadata(&path, &err);
                return self.mark_inaccessible(record, name, depth, materialize);
            }
        };

        let file_type = metadata.file_type();
        if !file_type.is_dir() {
            let size = metadata.len();
            if file_type.is_symlink() {
                self.stats.record_symlink();
            }
            self.stats.record_file(&path, size, depth);
            self.progress.record_file(size);
            self.largest.offer(&path, size, NodeKind::File);
            return (size, materialize.then(|| Node::new_file(name, path, size)));
        }

        let identity = DirIdentity::of(&path, &metadata);
        if let Some(id) = &identity {
            if self.ancestors.contains(id) {
                let record = EntryInaccessible::cycle(&path);
                return self.mark_inaccessible(record, name, depth, materialize);
            }
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(err) => {
                let record = EntryInaccessible::listing(&path, &err);
                return self.mark_inaccessible(record, name, depth, materialize);
            }
        };

        if let Some(id) = &identity {
            self.ancestors.enter(id.clone());
        }
        self.stats.record_dir(depth);
        self.progress.record_dir();

        let (size, node) = self.walk_dir(path.clone(), name, depth, materialize, identity, entries);
        self.largest.offer(&path, size, NodeKind::Directory);
        (size, node)
    }

    /// Sum an already opened directory whose identity has been entered.
    fn walk_dir(
        &mut self,
        path: PathBuf,
        name: CompactString,
        depth: u32,
        materialize: bool,
        identity: Option<DirIdentity>,
        entries: ReadDir,
    ) -> (u64, Option<Node>) {
        let keep_children = materialize && self.config.keeps_children_at(depth);
        let mut children: Option<Vec<Node>> = keep_children.then(Vec::new);
        let mut total: u64 = 0;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    // The directory itself stays; the unreadable remainder is recorded.
                    let record = EntryInaccessible::listing(&path, &err);
                    tracing::debug!(path = %path.display(), error = %err, "listing interrupted");
                    self.stats.record_inaccessible(depth + 1);
                    self.progress.record_inaccessible();
                    self.inaccessible.push(record);
                    continue;
                }
            };

            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if self.config.should_skip_hidden(&file_name) {
                continue;
            }

            let (size, child) = self.visit(
                entry.path(),
                CompactString::from(file_name.as_ref()),
                depth + 1,
                keep_children,
            );
            total += size;

            if let (Some(children), Some(child)) = (children.as_mut(), child) {
                children.push(child);
            }
        }

        if let Some(id) = &identity {
            self.ancestors.leave(id);
        }

        if self.progress.due() {
            let _ = self.progress_tx.send(self.progress.snapshot(&path, false));
        }

        tracing::trace!(path = %path.display(), size = total, depth, "directory done");

        (
            total,
            materialize.then(|| Node::new_directory(name, path, total, children)),
        )
    }

    fn mark_inaccessible(
        &mut self,
        record: EntryInaccessible,
        name: CompactString,
        depth: u32,
        materialize: bool,
    ) -> (u64, Option<Node>) {
        tracing::debug!(path = %record.path.display(), reason = ?record.reason, "entry inaccessible");
        self.stats.record_inaccessible(depth);
        self.progress.record_inaccessible();
        let node = materialize.then(|| Node::new_inaccessible(name, record.path.clone()));
        self.inaccessible.push(record);
        (0, node)
    }
}

/// Display name for the scan root; the full path when it has no final component.
fn root_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::from(n.to_string_lossy().as_ref()))
        .unwrap_or_else(|| CompactString::from(path.to_string_lossy().as_ref()))
}
