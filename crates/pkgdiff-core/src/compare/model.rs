//! Package comparison output types.

use crate::deps::DependencyChange;
use crate::tree::{FileChange, FileTreeNode, DEFAULT_MAX_FILES};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Already-fetched inputs for one comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareInput<'a> {
    pub from_tree: &'a [FileTreeNode],
    pub to_tree: &'a [FileTreeNode],
    pub from_manifest: Option<&'a Value>,
    pub to_manifest: Option<&'a Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareOptions {
    /// Cap on recorded file changes across added, removed and modified.
    pub max_files: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// File (not directory) counts for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareTotals {
    pub from_files: usize,
    pub to_files: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareMeta {
    /// Set when the file change cap dropped at least one change
    pub truncated: bool,
    /// Human-readable, non-fatal notes about the result
    pub warnings: Vec<String>,
    /// Wall time spent in the comparison, monotonic clock
    pub compute_time_ms: u64,
}

/// Full comparison of two package versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub added: Vec<FileChange>,
    pub removed: Vec<FileChange>,
    pub modified: Vec<FileChange>,
    pub dependencies: Vec<DependencyChange>,
    pub totals: CompareTotals,
    pub meta: CompareMeta,
}

impl CompareResult {
    pub fn file_change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.file_change_count() == 0 && self.dependencies.is_empty()
    }
}
