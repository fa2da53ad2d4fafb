//! Tree command
//!
//! Usage: pkgdiff tree --store <DIR> <PACKAGE> <VERSION>

use clap::Args;
use pkgdiff_engine::{EngineConfig, FileTreeProvider, FsPackageStore};
use std::path::PathBuf;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Package store root
    #[arg(long)]
    pub store: PathBuf,

    /// Package name
    pub package: String,

    /// Version to list
    pub version: String,
}

/// Execute tree command
pub fn execute(args: TreeArgs, config: EngineConfig) -> CommandResult {
    let store = FsPackageStore::new(args.store).with_max_nodes(config.limits.max_tree_nodes);
    let tree = store.file_tree(&args.package, &args.version)?;
    print_json(&tree)
}
