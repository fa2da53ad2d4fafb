//! Parse command
//!
//! Usage: pkgdiff parse <DIFF_FILE> [--no-merge] [--max-change-ratio <R>] [--summary]

use clap::Args;
use pkgdiff_core::compare::render_diff_summary;
use pkgdiff_engine::{parse_diff_text, EngineConfig};
use std::io::Read;
use std::path::PathBuf;

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Unified diff file ("-" reads stdin)
    pub diff_file: PathBuf,

    /// Keep delete/insert pairs as separate lines
    #[arg(long)]
    pub no_merge: bool,

    /// Maximum change ratio for merging a delete/insert pair
    #[arg(long)]
    pub max_change_ratio: Option<f64>,

    /// Print a text summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Execute parse command
pub fn execute(args: ParseArgs, mut config: EngineConfig) -> CommandResult {
    if args.no_merge {
        config.parse.merge_modified_lines = false;
    }
    if let Some(ratio) = args.max_change_ratio {
        config.parse.max_change_ratio = ratio;
    }
    config.validate()?;

    let text = if args.diff_file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.diff_file)?
    };

    let files = parse_diff_text(&text, &config)?;
    if args.summary {
        print!("{}", render_diff_summary(&files));
        Ok(())
    } else {
        print_json(&files)
    }
}
