//! Shortcut generation for the largest entries.
//!
//! The output directory is removed and recreated on every run, then filled
//! with one artifact per entry under `folders/` or `files/`. Artifacts are
//! named `{rank:03}_{size_mb}MB_{name}` so a file manager lists them in
//! rank order.

use std::fs;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use spacemap_core::{LargestEntry, NodeKind};

/// Subdirectory for directory shortcuts.
pub const FOLDERS_DIR: &str = "folders";
/// Subdirectory for file shortcuts.
pub const FILES_DIR: &str = "files";

/// Errors preparing the shortcut directory.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// Clearing the previous output failed.
    #[error("Failed to clear shortcut directory {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the output layout failed.
    #[error("Failed to create shortcut directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for shortcut generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct ShortcutConfig {
    /// Directory that is cleared and repopulated.
    #[builder(default = "PathBuf::from(\"shortcuts\")")]
    pub output_dir: PathBuf,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("shortcuts"),
        }
    }
}

impl ShortcutConfig {
    /// Create a new config builder.
    pub fn builder() -> ShortcutConfigBuilder {
        ShortcutConfigBuilder::default()
    }
}

/// Outcome of a shortcut run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortcutSummary {
    /// Artifacts created, in rank order.
    pub created: Vec<PathBuf>,
    /// Entries whose artifact could not be created.
    pub failed: Vec<PathBuf>,
}

/// Writes shortcut artifacts for ranked entries.
pub struct ShortcutWriter {
    config: ShortcutConfig,
}

impl ShortcutWriter {
    /// Create a writer with default config.
    pub fn new() -> Self {
        Self {
            config: ShortcutConfig::default(),
        }
    }

    /// Create a writer with custom config.
    pub fn with_config(config: ShortcutConfig) -> Self {
        Self { config }
    }

    /// Recreate the output directory and write one artifact per entry.
    ///
    /// Per-entry failures are logged and listed in the summary.
    pub fn write(&self, entries: &[LargestEntry]) -> Result<ShortcutSummary, ShortcutError> {
        self.prepare()?;

        let mut summary = ShortcutSummary::default();
        for (i, entry) in entries.iter().enumerate() {
            let dir = self.dir_for(entry.kind);
            let artifact = dir.join(artifact_name(i + 1, entry));

            match create_artifact(&entry.path, &artifact) {
                Ok(created) => summary.created.push(created),
                Err(err) => {
                    tracing::warn!(
                        target = %entry.path.display(),
                        error = %err,
                        "could not create shortcut"
                    );
                    summary.failed.push(entry.path.clone());
                }
            }
        }

        tracing::info!(
            dir = %self.config.output_dir.display(),
            created = summary.created.len(),
            failed = summary.failed.len(),
            "shortcuts written"
        );
        Ok(summary)
    }

    fn prepare(&self) -> Result<(), ShortcutError> {
        let root = &self.config.output_dir;
        if root.exists() {
            fs::remove_dir_all(root).map_err(|source| ShortcutError::Clear {
                path: root.clone(),
                source,
            })?;
        }

        for dir in [root.join(FOLDERS_DIR), root.join(FILES_DIR)] {
            fs::create_dir_all(&dir).map_err(|source| ShortcutError::Create { path: dir, source })?;
        }
        Ok(())
    }

    fn dir_for(&self, kind: NodeKind) -> PathBuf {
        let root = &self.config.output_dir;
        if kind.is_dir() {
            root.join(FOLDERS_DIR)
        } else {
            root.join(FILES_DIR)
        }
    }
}

impl Default for ShortcutWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the artifact file name for a ranked entry.
pub fn artifact_name(rank: usize, entry: &LargestEntry) -> String {
    let name = entry
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.path.to_string_lossy().into_owned());
    let safe_name: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    let size_mb = entry.size as f64 / (1024.0 * 1024.0);
    format!("{rank:03}_{size_mb:.0}MB_{safe_name}")
}

/// Symbolic link to the target.
#[cfg(unix)]
fn create_artifact(target: &Path, artifact: &Path) -> std::io::Result<PathBuf> {
    std::os::unix::fs::symlink(target, artifact)?;
    Ok(artifact.to_path_buf())
}

/// Internet shortcut pointing at a `file://` URL.
#[cfg(not(unix))]
fn create_artifact(target: &Path, artifact: &Path) -> std::io::Result<PathBuf> {
    let mut path = artifact.as_os_str().to_owned();
    path.push(".url");
    let path = PathBuf::from(path);
    fs::write(&path, format!("[InternetShortcut]\r\nURL={}\r\n", file_url(target)))?;
    Ok(path)
}

/// `file://` URL for an absolute path, with spaces escaped.
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/").replace(' ', "%20");
    if raw.starts_with('/') {
        format!("file://{raw}")
    } else {
        format!("file:///{raw}")
    }
}
