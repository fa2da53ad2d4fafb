pub mod compare;
pub mod compare_trees;
pub mod file;
pub mod parse;
pub mod tree;

use pkgdiff_engine::EngineConfig;
use serde::Serialize;
use std::path::Path;

pub type CommandResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Load the engine config, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CommandResult<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
