//! Unified diff output types.
//!
//! These are the wire contract consumed by rendering layers: camelCase keys,
//! lowercase kind tags, optional fields omitted when absent.

use serde::{Deserialize, Serialize};

/// Kind of a raw line taken straight from a hunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Insert,
    Delete,
    Context,
}

/// One hunk body line before any merging. Text excludes the prefix column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLineChange {
    pub kind: RawKind,
    pub text: String,
    pub old_line_no: Option<u32>,
    pub new_line_no: Option<u32>,
}

/// Shared tag for lines and segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Delete,
    Normal,
}

/// A run of text inside a line, tagged for word-level highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub kind: ChangeKind,
}

impl Segment {
    pub fn new(text: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A rendered diff line.
///
/// `normal` lines carry both line numbers (context lines and merged
/// modifications), `insert` only the new one, `delete` only the old one.
/// `line_no` is the number on the side the line is displayed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line_no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line_no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_no: Option<u32>,
    pub segments: Vec<Segment>,
}

impl Line {
    /// Text of the old side: normal + delete segments.
    pub fn old_text(&self) -> String {
        self.side_text(ChangeKind::Delete)
    }

    /// Text of the new side: normal + insert segments.
    pub fn new_text(&self) -> String {
        self.side_text(ChangeKind::Insert)
    }

    /// True when the line was produced by merging a delete/insert pair.
    pub fn is_merged(&self) -> bool {
        self.kind == ChangeKind::Normal
            && self.segments.iter().any(|s| s.kind != ChangeKind::Normal)
    }

    fn side_text(&self, side: ChangeKind) -> String {
        self.segments
            .iter()
            .filter(|s| s.kind == ChangeKind::Normal || s.kind == side)
            .map(|s| s.text.as_str())
            .collect()
    }
}

/// Parsed `@@ -a,b +c,d @@ trailer` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkHeader {
    pub text: String,
    pub old_start: u32,
    pub old_line_count: u32,
    pub new_start: u32,
    pub new_line_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    pub header_text: String,
    pub old_start: u32,
    pub old_line_count: u32,
    pub new_start: u32,
    pub new_line_count: u32,
    pub lines: Vec<Line>,
}

/// Collapsed run of unchanged old-file lines between two hunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipBlock {
    pub count: u32,
    pub message: String,
}

impl SkipBlock {
    pub fn new(count: u32) -> Self {
        let message = if count == 1 {
            "1 line hidden".to_string()
        } else {
            format!("{} lines hidden", count)
        };
        Self { count, message }
    }
}

/// Entry of a file's hunk list: either a real hunk or a skip marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffItem {
    Hunk(Hunk),
    Skip(SkipBlock),
}

impl DiffItem {
    pub fn as_hunk(&self) -> Option<&Hunk> {
        match self {
            DiffItem::Hunk(hunk) => Some(hunk),
            DiffItem::Skip(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileDiffKind {
    Add,
    Delete,
    Modify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    pub old_path: String,
    pub new_path: String,
    pub kind: FileDiffKind,
    pub hunks: Vec<DiffItem>,
    pub additions: usize,
    pub deletions: usize,
}

impl FileDiff {
    /// Iterate real hunks, skipping skip blocks.
    pub fn iter_hunks(&self) -> impl Iterator<Item = &Hunk> {
        self.hunks.iter().filter_map(DiffItem::as_hunk)
    }
}

/// Insert/delete line totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}
