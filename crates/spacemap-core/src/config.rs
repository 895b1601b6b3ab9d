//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of levels kept in the report.
pub const DEFAULT_DISPLAY_DEPTH: u32 = 3;

/// Configuration for scanning operations.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Deepest level whose nodes appear in the report. Sizes are always
    /// aggregated from the full tree.
    #[builder(default = "DEFAULT_DISPLAY_DEPTH")]
    #[serde(default = "default_display_depth")]
    pub max_display_depth: u32,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Number of largest entries tracked during the walk (0 = none).
    #[builder(default = "0")]
    #[serde(default)]
    pub largest_count: usize,
}

fn default_true() -> bool {
    true
}

fn default_display_depth() -> u32 {
    DEFAULT_DISPLAY_DEPTH
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_display_depth: DEFAULT_DISPLAY_DEPTH,
            include_hidden: true,
            largest_count: 0,
        }
    }

    /// Check if hidden files should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }

    /// Whether a node at `depth` keeps its children list.
    pub fn keeps_children_at(&self, depth: u32) -> bool {
        depth < self.max_display_depth
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
