//! File tree input and change output types.

use crate::errors::PkgDiffError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// One node of a package file tree, as handed over by a tree provider.
///
/// `path` is the full path from the package root, not just the basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    pub fn file(path: impl Into<String>, size: Option<u64>, hash: Option<String>) -> Self {
        Self {
            path: path.into(),
            node_type: NodeType::File,
            size,
            hash,
            children: None,
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<FileTreeNode>) -> Self {
        Self {
            path: path.into(),
            node_type: NodeType::Directory,
            size: None,
            hash: None,
            children: Some(children),
        }
    }

    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    pub fn is_directory(&self) -> bool {
        self.node_type == NodeType::Directory
    }
}

/// Decode a tree document: either a JSON array of root nodes or a single
/// root node object.
///
/// # Errors
///
/// - `InvalidTree` — bytes are not JSON or do not match the node shape
pub fn tree_from_json_slice(bytes: &[u8]) -> Result<Vec<FileTreeNode>, PkgDiffError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| PkgDiffError::InvalidTree {
            reason: e.to_string(),
        })?;
    let roots = if value.is_array() {
        serde_json::from_value::<Vec<FileTreeNode>>(value)
    } else {
        serde_json::from_value::<FileTreeNode>(value).map(|node| vec![node])
    };
    roots.map_err(|e| PkgDiffError::InvalidTree {
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeKind {
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub path: String,
    pub kind: FileChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_size: Option<u64>,
}

/// Result of comparing two trees. Lists are sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeComparison {
    pub added: Vec<FileChange>,
    pub removed: Vec<FileChange>,
    pub modified: Vec<FileChange>,
    pub truncated: bool,
}

impl TreeComparison {
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}
