//! Engine-level query surface.
//!
//! `apply_engine_query` is the single entry point that fetches inputs from a
//! [`PackageSource`], enforces [`Limits`](crate::config::Limits), and hands
//! the bounded inputs to the pure core.

#![allow(clippy::result_large_err)]

use pkgdiff_core::compare::{build_compare_result, CompareInput, CompareOptions, CompareResult};
use pkgdiff_core::errors::ExError;
use pkgdiff_core::errors::PkgDiffError;
use pkgdiff_core::tree::{count_nodes, tree_from_json_slice};
use pkgdiff_core::{log_op_end, log_op_error, log_op_start};
use pkgdiff_core::{parse_unified_diff, FileDiff, FileTreeNode};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::providers::PackageSource;
use crate::unified_text::{unified_text, DEFAULT_CONTEXT_LINES};

// ---------------------------------------------------------------------------
// EngineQuery
// ---------------------------------------------------------------------------

/// Queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Parse raw unified diff text.
    ParseDiff { text: String },
    /// Structured diff of one file between two versions.
    FileDiff {
        package: String,
        from_version: String,
        to_version: String,
        path: String,
    },
    /// Compare file trees and manifests of two versions.
    Compare {
        package: String,
        from_version: String,
        to_version: String,
    },
}

/// Result of a `FileDiff` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiffResult {
    /// `None` when the two sides have no line to diff
    pub file: Option<FileDiff>,
    /// Both versions hold the file with the same bytes
    pub identical: bool,
}

/// All possible results from `apply_engine_query`.
#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    ParseDiff(Vec<FileDiff>),
    FileDiff(FileDiffResult),
    Compare(Box<CompareResult>),
}

// ---------------------------------------------------------------------------
// apply_engine_query
// ---------------------------------------------------------------------------

/// Run one query against a package source.
///
/// # Errors
///
/// - `InputTooLarge` — content, diff text or a tree exceeds its limit
/// - `NotFound` — the file is missing from both versions, or a version is
///   unknown to the source
/// - anything the source reports (`Io`, `InvalidInput`, `InvalidManifest`, ...)
pub fn apply_engine_query<S>(
    query: EngineQuery,
    source: &S,
    config: &EngineConfig,
) -> Result<EngineQueryResult>
where
    S: PackageSource + ?Sized,
{
    match query {
        // ── ParseDiff ─────────────────────────────────────────────────────────
        EngineQuery::ParseDiff { text } => {
            parse_diff_text(&text, config).map(EngineQueryResult::ParseDiff)
        }

        // ── FileDiff ──────────────────────────────────────────────────────────
        EngineQuery::FileDiff {
            package,
            from_version,
            to_version,
            path,
        } => {
            log_op_start!(
                "file_diff",
                package = package.as_str(),
                from_version = from_version.as_str(),
                to_version = to_version.as_str(),
                path = path.as_str()
            );
            let start = std::time::Instant::now();

            let result = (|| -> Result<FileDiffResult> {
                let old = source.file_content(&package, &from_version, &path)?;
                let new = source.file_content(&package, &to_version, &path)?;
                if old.is_none() && new.is_none() {
                    return Err(PkgDiffError::FileNotFound {
                        package: package.clone(),
                        path: path.clone(),
                    }
                    .into());
                }

                // present on both sides with equal bytes; a missing side is never identical
                let identical = old == new;
                let old = old.unwrap_or_default();
                let new = new.unwrap_or_default();
                config.limits.check_content(&path, &old)?;
                config.limits.check_content(&path, &new)?;
                if old == new {
                    return Ok(FileDiffResult {
                        file: None,
                        identical,
                    });
                }

                let text = unified_text(&path, &path, &old, &new, DEFAULT_CONTEXT_LINES);
                config.limits.check_diff(&text)?;
                let file = parse_unified_diff(&text, &config.parse).into_iter().next();
                Ok(FileDiffResult {
                    file,
                    identical: false,
                })
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("file_diff", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("file_diff", e_clone, duration_ms = elapsed);
                }
            }
            result
                .map(EngineQueryResult::FileDiff)
                .map_err(|e| with_query_context(e, "file_diff", &package))
        }

        // ── Compare ───────────────────────────────────────────────────────────
        EngineQuery::Compare {
            package,
            from_version,
            to_version,
        } => {
            log_op_start!(
                "compare",
                package = package.as_str(),
                from_version = from_version.as_str(),
                to_version = to_version.as_str()
            );
            let start = std::time::Instant::now();

            let result = (|| -> Result<CompareResult> {
                let from_tree = source.file_tree(&package, &from_version)?;
                config
                    .limits
                    .check_tree(&package, &from_version, count_nodes(&from_tree))?;
                let to_tree = source.file_tree(&package, &to_version)?;
                config
                    .limits
                    .check_tree(&package, &to_version, count_nodes(&to_tree))?;

                let from_manifest = source.manifest(&package, &from_version)?;
                let to_manifest = source.manifest(&package, &to_version)?;

                let input = CompareInput {
                    from_tree: &from_tree,
                    to_tree: &to_tree,
                    from_manifest: from_manifest.as_ref(),
                    to_manifest: to_manifest.as_ref(),
                };
                let options = CompareOptions {
                    max_files: config.limits.max_files,
                };
                Ok(build_compare_result(input, options))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(compared) => log_op_end!(
                    "compare",
                    duration_ms = elapsed,
                    change_count = compared.file_change_count(),
                    truncated = compared.meta.truncated
                ),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("compare", e_clone, duration_ms = elapsed);
                }
            }
            result
                .map(|compared| EngineQueryResult::Compare(Box::new(compared)))
                .map_err(|e| with_query_context(e, "compare", &package))
        }
    }
}

/// Parse raw diff text under the configured limits.
///
/// Needs no package source, so callers holding only text can skip
/// [`apply_engine_query`].
///
/// # Errors
///
/// - `InputTooLarge` — text exceeds `max_diff_bytes`
pub fn parse_diff_text(text: &str, config: &EngineConfig) -> Result<Vec<FileDiff>> {
    log_op_start!("parse_diff", size = text.len());
    let start = std::time::Instant::now();

    let result = (|| -> Result<Vec<FileDiff>> {
        config.limits.check_diff(text)?;
        Ok(parse_unified_diff(text, &config.parse))
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(files) => log_op_end!(
            "parse_diff",
            duration_ms = elapsed,
            file_count = files.len()
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("parse_diff", e_clone, duration_ms = elapsed);
        }
    }
    result.map_err(|e| {
        if e.op().is_none() {
            e.with_op("parse_diff")
        } else {
            e
        }
    })
}

/// Compare two file tree documents without a package source.
///
/// Each document is a JSON array of root nodes or a single root node, as
/// printed by `pkgdiff tree`. No manifests are involved, so the result
/// carries no dependency changes.
///
/// # Errors
///
/// - `InvalidTree` — a document is not JSON or does not match the node shape
/// - `InputTooLarge` — a tree exceeds `max_tree_nodes`
pub fn compare_tree_documents(
    from: &[u8],
    to: &[u8],
    config: &EngineConfig,
) -> Result<CompareResult> {
    log_op_start!("compare_trees", from_size = from.len(), to_size = to.len());
    let start = std::time::Instant::now();

    let result = (|| -> Result<CompareResult> {
        let from_tree = decode_tree(from, "from", config)?;
        let to_tree = decode_tree(to, "to", config)?;
        let input = CompareInput {
            from_tree: &from_tree,
            to_tree: &to_tree,
            from_manifest: None,
            to_manifest: None,
        };
        let options = CompareOptions {
            max_files: config.limits.max_files,
        };
        Ok(build_compare_result(input, options))
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(compared) => log_op_end!(
            "compare_trees",
            duration_ms = elapsed,
            change_count = compared.file_change_count(),
            truncated = compared.meta.truncated
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("compare_trees", e_clone, duration_ms = elapsed);
        }
    }
    result.map_err(|e| {
        if e.op().is_none() {
            e.with_op("compare_trees")
        } else {
            e
        }
    })
}

/// `side` names the document in limit errors, which have no real version.
fn decode_tree(bytes: &[u8], side: &str, config: &EngineConfig) -> Result<Vec<FileTreeNode>> {
    let tree = tree_from_json_slice(bytes)?;
    config.limits.check_tree("tree", side, count_nodes(&tree))?;
    Ok(tree)
}

/// Fill in op and package on errors that do not carry them yet.
fn with_query_context(err: ExError, op: &str, package: &str) -> ExError {
    let err = if err.op().is_none() { err.with_op(op) } else { err };
    if err.package().is_none() {
        err.with_package(package)
    } else {
        err
    }
}
