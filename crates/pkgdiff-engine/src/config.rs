//! Engine configuration: input limits and parse options.
//!
//! Loaded from TOML. Every field is optional and falls back to its default,
//! so a config file only needs the values it changes:
//!
//! ```toml
//! [limits]
//! max_files = 500
//!
//! [parse]
//! max_change_ratio = 0.3
//! ```

use crate::errors::{config_error, io_error, Result};
use pkgdiff_core::errors::{ExError, PkgDiffError};
use pkgdiff_core::tree::DEFAULT_MAX_FILES;
use pkgdiff_core::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_DIFF_BYTES: usize = 4 * 1024 * 1024;
pub const DEFAULT_MAX_TREE_NODES: usize = 100_000;

/// Size bounds enforced before any input reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Per-file content size, in bytes
    pub max_content_bytes: usize,
    /// Unified diff text size, in bytes
    pub max_diff_bytes: usize,
    /// Cap on recorded file changes in a comparison
    pub max_files: usize,
    /// Nodes (files and directories) per file tree
    pub max_tree_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
            max_files: DEFAULT_MAX_FILES,
            max_tree_nodes: DEFAULT_MAX_TREE_NODES,
        }
    }
}

impl Limits {
    pub fn check_content(
        &self,
        path: &str,
        content: &str,
    ) -> std::result::Result<(), PkgDiffError> {
        if content.len() > self.max_content_bytes {
            return Err(PkgDiffError::ContentTooLarge {
                path: path.to_string(),
                size: content.len(),
                limit: self.max_content_bytes,
            });
        }
        Ok(())
    }

    pub fn check_diff(&self, text: &str) -> std::result::Result<(), PkgDiffError> {
        if text.len() > self.max_diff_bytes {
            return Err(PkgDiffError::DiffTooLarge {
                size: text.len(),
                limit: self.max_diff_bytes,
            });
        }
        Ok(())
    }

    pub fn check_tree(
        &self,
        package: &str,
        version: &str,
        nodes: usize,
    ) -> std::result::Result<(), PkgDiffError> {
        if nodes > self.max_tree_nodes {
            return Err(PkgDiffError::TreeTooLarge {
                package: package.to_string(),
                version: version.to_string(),
                nodes,
                limit: self.max_tree_nodes,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: Limits,
    pub parse: ParseOptions,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// - `InvalidOptions` — malformed TOML, unknown value types, or parse
    ///   options that fail validation
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// - `Io` — the file cannot be read
    /// - `InvalidOptions` — see [`EngineConfig::from_toml_str`]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| io_error("config_load", e).with_path(path.display().to_string()))?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// - `InvalidOptions` — parse options are not usable
    pub fn validate(&self) -> Result<()> {
        self.parse
            .validate()
            .map_err(|e| ExError::from(e).with_op("config_load"))
    }
}
