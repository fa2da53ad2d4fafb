//! pkgdiff Core - Diff & comparison engine
//!
//! This crate turns already-fetched inputs into structured, renderable change
//! descriptions:
//! - Unified diff text parsed by an explicit state machine into files and hunks
//! - Word-level inline segments for modified lines (similarity-gated merging)
//! - Skip blocks for collapsed gaps between hunks, plus per-file stats
//! - File tree comparison with a hard change cap and truncation flag
//! - Dependency section comparison with semantic version bucketing
//!
//! Everything here is synchronous and performs no I/O. Fetching inputs and
//! bounding their size is the caller's job (see `pkgdiff-engine`).

pub mod compare;
pub mod deps;
pub mod errors;
pub mod inline;
pub mod logging_facility;
pub mod options;
pub mod similarity;
pub mod tree;
pub mod unified;

pub use pkgdiff_core_types::schema;

// Re-export commonly used types
pub use compare::{build_compare_result, CompareInput, CompareOptions, CompareResult};
pub use deps::{compare_dependencies, DependencyChange};
pub use errors::{ExError, ExErrorKind, PkgDiffError, Result};
pub use options::ParseOptions;
pub use tree::{compare_trees, FileChange, FileTreeNode, TreeComparison};
pub use unified::{parse_unified_diff, DiffItem, FileDiff, Hunk, Line, Segment};
