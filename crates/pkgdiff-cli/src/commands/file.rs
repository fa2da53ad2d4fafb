//! File command
//!
//! Usage: pkgdiff file --store <DIR> <PACKAGE> <FROM> <TO> <PATH>

use clap::Args;
use pkgdiff_engine::{
    apply_engine_query, EngineConfig, EngineQuery, EngineQueryResult, FsPackageStore,
};
use std::path::PathBuf;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Package store root
    #[arg(long)]
    pub store: PathBuf,

    /// Package name
    pub package: String,

    /// Base version
    pub from: String,

    /// Target version
    pub to: String,

    /// File path relative to the package root
    pub path: String,
}

/// Execute file command
pub fn execute(args: FileArgs, config: EngineConfig) -> CommandResult {
    let store = FsPackageStore::new(args.store);
    let query = EngineQuery::FileDiff {
        package: args.package,
        from_version: args.from,
        to_version: args.to,
        path: args.path,
    };

    match apply_engine_query(query, &store, &config)? {
        EngineQueryResult::FileDiff(result) => print_json(&result),
        other => Err(format!("unexpected query result: {:?}", other).into()),
    }
}
