//! Compare command
//!
//! Usage: pkgdiff compare --store <DIR> <PACKAGE> <FROM> <TO> [--max-files <N>] [--summary]

use clap::Args;
use pkgdiff_core::compare::render_compare_summary;
use pkgdiff_engine::{
    apply_engine_query, EngineConfig, EngineQuery, EngineQueryResult, FsPackageStore,
};
use std::path::PathBuf;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Package store root (<DIR>/<PACKAGE>/<VERSION>/...)
    #[arg(long)]
    pub store: PathBuf,

    /// Package name
    pub package: String,

    /// Base version
    pub from: String,

    /// Target version
    pub to: String,

    /// Cap on reported file changes
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs, mut config: EngineConfig) -> CommandResult {
    if let Some(max_files) = args.max_files {
        config.limits.max_files = max_files;
    }

    let store = FsPackageStore::new(args.store).with_max_nodes(config.limits.max_tree_nodes);
    let query = EngineQuery::Compare {
        package: args.package,
        from_version: args.from,
        to_version: args.to,
    };

    match apply_engine_query(query, &store, &config)? {
        EngineQueryResult::Compare(result) if args.summary => {
            print!("{}", render_compare_summary(&result));
            Ok(())
        }
        EngineQueryResult::Compare(result) => print_json(&result),
        other => Err(format!("unexpected query result: {:?}", other).into()),
    }
}
