//! pkgdiff Engine - Orchestration layer
//!
//! Fetches package inputs through provider traits, bounds their size, and
//! drives the pure diff core. Ships a filesystem package store.

pub mod commands;
pub mod config;
pub mod errors;
pub mod fs_store;
pub mod providers;
pub mod unified_text;

pub use commands::{
    apply_engine_query, compare_tree_documents, parse_diff_text, EngineQuery, EngineQueryResult,
    FileDiffResult,
};
pub use config::{EngineConfig, Limits};
pub use fs_store::FsPackageStore;
pub use providers::{FileContentProvider, FileTreeProvider, ManifestProvider, PackageSource};
