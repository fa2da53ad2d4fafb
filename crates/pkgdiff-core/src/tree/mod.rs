//! File tree model and comparison.

pub mod compare;
pub mod flatten;
pub mod model;

pub use compare::{compare_trees, ChangeEvidence, DEFAULT_MAX_FILES};
pub use flatten::{count_files, count_nodes, flatten, FlatTree};
pub use model::{
    tree_from_json_slice, FileChange, FileChangeKind, FileTreeNode, NodeType, TreeComparison,
};
