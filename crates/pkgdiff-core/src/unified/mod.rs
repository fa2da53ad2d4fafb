//! Unified diff pipeline.
//!
//! ```text
//! raw text ─▶ parser (FSM) ─▶ raw hunk bodies ─▶ hunk (merge + inline align)
//!          ─▶ skip (gap markers) ─▶ stats (insert/delete totals)
//! ```
//!
//! ## Entry point
//!
//! ```
//! use pkgdiff_core::options::ParseOptions;
//! use pkgdiff_core::unified::parse_unified_diff;
//!
//! let text = "--- a/index.js\n+++ b/index.js\n@@ -1 +1 @@\n-let a = 1;\n+let a = 2;\n";
//! let files = parse_unified_diff(text, &ParseOptions::default());
//! assert_eq!(files.len(), 1);
//! ```

pub mod hunk;
pub mod model;
pub mod parser;
pub mod skip;
pub mod stats;

pub use hunk::process_hunk;
pub use model::{
    ChangeKind, DiffItem, DiffStats, FileDiff, FileDiffKind, Hunk, HunkHeader, Line, RawKind,
    RawLineChange, Segment, SkipBlock,
};
pub use parser::parse_unified_diff;
pub use skip::insert_skip_blocks;
pub use stats::count_changes;
