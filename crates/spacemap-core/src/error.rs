//! Error types for scanning operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a scan.
///
/// Failures below the root never surface here; they are recorded as
/// [`EntryInaccessible`] and the traversal continues.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist or cannot be read.
    #[error("Cannot read scan root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create a root error with path context.
    pub fn root_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RootUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::RootUnreadable { path, .. } => path,
        }
    }
}

/// Why an entry could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InaccessibleReason {
    /// Permission was denied.
    PermissionDenied,
    /// The entry vanished between listing and stat.
    NotFound,
    /// Error listing a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
    /// Directory already on the current traversal path.
    Cycle,
}

/// A non-root entry that was recorded as an inaccessible leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInaccessible {
    /// Path of the entry.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Why it could not be read.
    pub reason: InaccessibleReason,
}

impl EntryInaccessible {
    /// Create a new record.
    pub fn new(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        reason: InaccessibleReason,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            reason,
        }
    }

    /// Classify an I/O error from a stat call.
    pub fn metadata(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::from_io(path, error, InaccessibleReason::MetadataError)
    }

    /// Classify an I/O error from listing a directory.
    pub fn listing(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::from_io(path, error, InaccessibleReason::ReadError)
    }

    /// Create a cycle record.
    pub fn cycle(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Directory already on traversal path: {}", path.display()),
            path,
            reason: InaccessibleReason::Cycle,
        }
    }

    fn from_io(path: impl Into<PathBuf>, error: &std::io::Error, fallback: InaccessibleReason) -> Self {
        let path = path.into();
        let reason = match error.kind() {
            std::io::ErrorKind::PermissionDenied => InaccessibleReason::PermissionDenied,
            std::io::ErrorKind::NotFound => InaccessibleReason::NotFound,
            _ => fallback,
        };
        Self {
            message: format!("{}: {error}", path.display()),
            path,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unreadable_message() {
        let err = ScanError::root_unreadable(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, ScanError::RootUnreadable { .. }));
        assert!(err.to_string().contains("/test/path"));
    }

    #[test]
    fn test_permission_denied_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let entry = EntryInaccessible::listing("/test/locked", &io);
        assert_eq!(entry.reason, InaccessibleReason::PermissionDenied);

        let io = std::io::Error::other("boom");
        let entry = EntryInaccessible::listing("/test/broken", &io);
        assert_eq!(entry.reason, InaccessibleReason::ReadError);
        let entry = EntryInaccessible::metadata("/test/broken", &io);
        assert_eq!(entry.reason, InaccessibleReason::MetadataError);
    }
}
