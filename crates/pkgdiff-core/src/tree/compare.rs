//! Path-level comparison of two file trees.

use crate::tree::flatten::flatten;
use crate::tree::model::{FileChange, FileChangeKind, FileTreeNode, TreeComparison};

pub const DEFAULT_MAX_FILES: usize = 1000;

/// What the two nodes' metadata can tell us about a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvidence {
    Hash { changed: bool },
    Size { changed: bool },
    /// Neither hashes nor sizes are present on both sides. Treated as unchanged.
    Unknown,
}

impl ChangeEvidence {
    pub fn between(from: &FileTreeNode, to: &FileTreeNode) -> Self {
        if let (Some(a), Some(b)) = (&from.hash, &to.hash) {
            return ChangeEvidence::Hash { changed: a != b };
        }
        if let (Some(a), Some(b)) = (from.size, to.size) {
            return ChangeEvidence::Size { changed: a != b };
        }
        ChangeEvidence::Unknown
    }

    pub fn is_changed(self) -> bool {
        match self {
            ChangeEvidence::Hash { changed } | ChangeEvidence::Size { changed } => changed,
            ChangeEvidence::Unknown => false,
        }
    }
}

/// Collects changes until the cap is hit.
struct CappedRecorder {
    cap: usize,
    result: TreeComparison,
}

impl CappedRecorder {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            result: TreeComparison::default(),
        }
    }

    /// Returns false once the cap refused a change; the caller stops walking.
    fn record(&mut self, change: FileChange) -> bool {
        if self.result.total_changes() >= self.cap {
            self.result.truncated = true;
            return false;
        }
        match change.kind {
            FileChangeKind::Added => self.result.added.push(change),
            FileChangeKind::Removed => self.result.removed.push(change),
            FileChangeKind::Modified => self.result.modified.push(change),
        }
        true
    }

    fn finish(mut self) -> TreeComparison {
        self.result.added.sort_by(|a, b| a.path.cmp(&b.path));
        self.result.removed.sort_by(|a, b| a.path.cmp(&b.path));
        self.result.modified.sort_by(|a, b| a.path.cmp(&b.path));
        self.result
    }
}

/// Compare two trees by path.
///
/// Walks the target tree first, then the source tree for files that
/// disappeared. A file replaced by a directory shows up only as `removed`;
/// a directory replaced by a file shows up only as `added`.
pub fn compare_trees(
    from: &[FileTreeNode],
    to: &[FileTreeNode],
    max_files: usize,
) -> TreeComparison {
    let from_flat = flatten(from);
    let to_flat = flatten(to);
    let mut recorder = CappedRecorder::new(max_files);

    for (path, to_node) in to_flat.iter() {
        let from_node = from_flat.get(path);
        let change = match from_node {
            Some(source) if to_node.is_directory() && source.is_file() => Some(FileChange {
                path: path.to_string(),
                kind: FileChangeKind::Removed,
                old_size: source.size,
                new_size: None,
            }),
            _ if to_node.is_directory() => None,
            Some(source) if source.is_file() => {
                if ChangeEvidence::between(source, to_node).is_changed() {
                    Some(FileChange {
                        path: path.to_string(),
                        kind: FileChangeKind::Modified,
                        old_size: source.size,
                        new_size: to_node.size,
                    })
                } else {
                    None
                }
            }
            _ => Some(FileChange {
                path: path.to_string(),
                kind: FileChangeKind::Added,
                old_size: None,
                new_size: to_node.size,
            }),
        };
        if let Some(change) = change {
            if !recorder.record(change) {
                tracing::debug!(max_files, "tree comparison truncated");
                return recorder.finish();
            }
        }
    }

    for (path, from_node) in from_flat.iter() {
        if !from_node.is_file() || to_flat.contains(path) {
            continue;
        }
        let change = FileChange {
            path: path.to_string(),
            kind: FileChangeKind::Removed,
            old_size: from_node.size,
            new_size: None,
        };
        if !recorder.record(change) {
            tracing::debug!(max_files, "tree comparison truncated");
            break;
        }
    }

    recorder.finish()
}
