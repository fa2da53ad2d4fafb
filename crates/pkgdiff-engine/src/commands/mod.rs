//! Query orchestration layer.
//!
//! Coordinates package sources, limits and the pure diff core.

pub mod engine_query;

pub use engine_query::{
    apply_engine_query, compare_tree_documents, parse_diff_text, EngineQuery, EngineQueryResult,
    FileDiffResult,
};
