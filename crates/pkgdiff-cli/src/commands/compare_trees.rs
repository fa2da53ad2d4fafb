//! Compare-trees command
//!
//! Usage: pkgdiff compare-trees <FROM_TREE> <TO_TREE> [--max-files <N>] [--summary]

use clap::Args;
use pkgdiff_core::compare::render_compare_summary;
use pkgdiff_engine::{compare_tree_documents, EngineConfig};
use std::path::PathBuf;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct CompareTreesArgs {
    /// Base tree JSON file, as printed by `pkgdiff tree`
    pub from_tree: PathBuf,

    /// Target tree JSON file
    pub to_tree: PathBuf,

    /// Cap on reported file changes
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Execute compare-trees command
pub fn execute(args: CompareTreesArgs, mut config: EngineConfig) -> CommandResult {
    if let Some(max_files) = args.max_files {
        config.limits.max_files = max_files;
    }

    let from = std::fs::read(&args.from_tree)?;
    let to = std::fs::read(&args.to_tree)?;
    let result = compare_tree_documents(&from, &to, &config)?;

    if args.summary {
        print!("{}", render_compare_summary(&result));
        Ok(())
    } else {
        print_json(&result)
    }
}
