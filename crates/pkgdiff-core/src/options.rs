//! Parse options for the unified diff pipeline.
//!
//! Callers may supply any subset of fields; missing fields fall back to the
//! defaults below (`#[serde(default)]`). Keys are camelCase on the wire, with
//! snake_case aliases so the same struct can be embedded in a TOML config.

use crate::errors::PkgDiffError;
use serde::{Deserialize, Serialize};

/// Default lookahead distance accepted for compatibility.
pub const DEFAULT_MAX_DIFF_DISTANCE: u32 = 30;
/// Default merge similarity threshold.
pub const DEFAULT_MAX_CHANGE_RATIO: f64 = 0.45;
/// Default inline character edit budget accepted for compatibility.
pub const DEFAULT_INLINE_MAX_CHAR_EDITS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Accepted but not consulted by the merge logic.
    #[serde(alias = "max_diff_distance")]
    pub max_diff_distance: u32,
    /// A delete/insert pair merges when its change ratio is at most this.
    #[serde(alias = "max_change_ratio")]
    pub max_change_ratio: f64,
    /// Merge adjacent similar delete/insert pairs into one inline-diffed line.
    #[serde(alias = "merge_modified_lines")]
    pub merge_modified_lines: bool,
    /// Reserved.
    #[serde(alias = "inline_max_char_edits")]
    pub inline_max_char_edits: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_diff_distance: DEFAULT_MAX_DIFF_DISTANCE,
            max_change_ratio: DEFAULT_MAX_CHANGE_RATIO,
            merge_modified_lines: true,
            inline_max_char_edits: DEFAULT_INLINE_MAX_CHAR_EDITS,
        }
    }
}

impl ParseOptions {
    /// Merge a partial JSON override object over the defaults.
    ///
    /// `null` yields the defaults unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidOptions` — the value is not an object, a field has the wrong
    ///   type, or the merged options fail [`ParseOptions::validate`]
    pub fn from_json_overrides(value: &serde_json::Value) -> Result<Self, PkgDiffError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if !value.is_object() {
            return Err(PkgDiffError::InvalidOptions {
                reason: "options must be a JSON object".to_string(),
            });
        }
        let options: ParseOptions =
            serde_json::from_value(value.clone()).map_err(|e| PkgDiffError::InvalidOptions {
                reason: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values the similarity gate cannot interpret.
    ///
    /// Ratios outside `[0, 1]` are allowed: `<= 0` means exact match only and
    /// `>= 1` means always merge.
    ///
    /// # Errors
    ///
    /// - `InvalidOptions` — `max_change_ratio` is NaN or infinite
    pub fn validate(&self) -> Result<(), PkgDiffError> {
        if !self.max_change_ratio.is_finite() {
            return Err(PkgDiffError::InvalidOptions {
                reason: format!(
                    "maxChangeRatio must be a finite number, got {}",
                    self.max_change_ratio
                ),
            });
        }
        Ok(())
    }
}
