//! Scan progress reporting.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Number of entries between two progress snapshots.
pub(crate) const PROGRESS_INTERVAL: u64 = 1000;

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of files scanned so far.
    pub files_scanned: u64,
    /// Number of directories scanned so far.
    pub dirs_scanned: u64,
    /// Total bytes counted so far.
    pub bytes_scanned: u64,
    /// Directory being scanned when the snapshot was taken.
    pub current_path: PathBuf,
    /// Number of inaccessible entries encountered.
    pub inaccessible_count: u64,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
    /// Set on the final snapshot.
    pub finished: bool,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            dirs_scanned: 0,
            bytes_scanned: 0,
            current_path: PathBuf::new(),
            inaccessible_count: 0,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get total items scanned (files + dirs).
    pub fn total_items(&self) -> u64 {
        self.files_scanned + self.dirs_scanned
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_scanned: u64,
    dirs_scanned: u64,
    bytes_scanned: u64,
    inaccessible_count: u64,
    since_snapshot: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_scanned: 0,
            dirs_scanned: 0,
            bytes_scanned: 0,
            inaccessible_count: 0,
            since_snapshot: 0,
        }
    }

    pub fn record_file(&mut self, size: u64) {
        self.files_scanned += 1;
        self.bytes_scanned += size;
        self.since_snapshot += 1;
    }

    pub fn record_dir(&mut self) {
        self.dirs_scanned += 1;
        self.since_snapshot += 1;
    }

    pub fn record_inaccessible(&mut self) {
        self.inaccessible_count += 1;
        self.since_snapshot += 1;
    }

    /// Returns true once every [`PROGRESS_INTERVAL`] entries.
    pub fn due(&mut self) -> bool {
        if self.since_snapshot >= PROGRESS_INTERVAL {
            self.since_snapshot = 0;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self, current_path: &Path, finished: bool) -> ScanProgress {
        ScanProgress {
            files_scanned: self.files_scanned,
            dirs_scanned: self.dirs_scanned,
            bytes_scanned: self.bytes_scanned,
            current_path: current_path.to_path_buf(),
            inaccessible_count: self.inaccessible_count,
            elapsed: self.start_time.elapsed(),
            finished,
        }
    }
}
