//! Package version comparison.
//!
//! Combines the tree and dependency comparators into one result with file
//! totals and metadata.
//!
//! ```
//! use pkgdiff_core::compare::{build_compare_result, CompareInput, CompareOptions};
//! use pkgdiff_core::FileTreeNode;
//!
//! let from = vec![FileTreeNode::file("a.js", Some(10), Some("x".into()))];
//! let to = vec![FileTreeNode::file("a.js", Some(12), Some("y".into()))];
//! let input = CompareInput { from_tree: &from, to_tree: &to, ..CompareInput::default() };
//! let result = build_compare_result(input, CompareOptions::default());
//! assert_eq!(result.modified.len(), 1);
//! ```

pub mod builder;
pub mod human_summary;
pub mod model;

pub use builder::{build_compare_result, truncation_warning};
pub use human_summary::{render_compare_summary, render_diff_summary};
pub use model::{CompareInput, CompareMeta, CompareOptions, CompareResult, CompareTotals};
