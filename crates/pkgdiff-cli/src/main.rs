//! pkgdiff CLI
//!
//! Command-line interface for the pkgdiff engine

use clap::{Parser, Subcommand};
use pkgdiff_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pkgdiff")]
#[command(about = "pkgdiff - Structured diffs and package version comparison", long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a unified diff file
    Parse(commands::parse::ParseArgs),
    /// Compare two versions of a package
    Compare(commands::compare::CompareArgs),
    /// Compare two file tree JSON documents
    CompareTrees(commands::compare_trees::CompareTreesArgs),
    /// Structured diff of one file between two versions
    File(commands::file::FileArgs),
    /// Print the file tree of one version
    Tree(commands::tree::TreeArgs),
}

fn main() {
    let cli = Cli::parse();

    init(Profile::for_cli(cli.log_json));

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Parse(args) => commands::parse::execute(args, config),
            Commands::Compare(args) => commands::compare::execute(args, config),
            Commands::CompareTrees(args) => commands::compare_trees::execute(args, config),
            Commands::File(args) => commands::file::execute(args, config),
            Commands::Tree(args) => commands::tree::execute(args, config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
