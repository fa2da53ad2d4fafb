//! Tolerant unified diff parser.
//!
//! An explicit finite-state machine over classified input lines. Anything it
//! does not recognise falls through the default transition and is skipped, so
//! malformed input degrades to fewer (or zero) files rather than an error.

use crate::options::ParseOptions;
use crate::unified::hunk::process_hunk;
use crate::unified::model::{
    ChangeKind, FileDiff, FileDiffKind, Hunk, HunkHeader, RawKind, RawLineChange,
};
use crate::unified::skip::insert_skip_blocks;
use crate::unified::stats::count_changes;

/// Where the machine is between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Between files, or after `+++` waiting for the first hunk header.
    AwaitingOldHeader,
    /// Saw `---`; the matching `+++` should follow.
    AwaitingNewHeader,
    /// Inside a hunk body.
    InHunk,
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    OldFileMarker { path: &'a str },
    NewFileMarker { path: &'a str },
    HunkHeader(HunkHeader),
    /// `diff `, `index ` and `\ No newline at end of file` lines.
    Metadata,
    Insert(&'a str),
    Delete(&'a str),
    Context(&'a str),
    Unrecognized,
}

/// Classify one line. Checks run in priority order, so `---`/`+++` win over
/// delete/insert even inside a hunk body.
pub fn classify_line(line: &str) -> LineEvent<'_> {
    if let Some(rest) = line.strip_prefix("---") {
        return LineEvent::OldFileMarker {
            path: strip_side_prefix(rest.trim()),
        };
    }
    if let Some(rest) = line.strip_prefix("+++") {
        return LineEvent::NewFileMarker {
            path: strip_side_prefix(rest.trim()),
        };
    }
    if line.starts_with("@@") {
        return match parse_hunk_header(line) {
            Some(header) => LineEvent::HunkHeader(header),
            None => LineEvent::Unrecognized,
        };
    }
    if line.starts_with("diff ") || line.starts_with("index ") || line.starts_with('\\') {
        return LineEvent::Metadata;
    }
    if let Some(text) = line.strip_prefix('+') {
        return LineEvent::Insert(text);
    }
    if let Some(text) = line.strip_prefix('-') {
        return LineEvent::Delete(text);
    }
    if let Some(text) = line.strip_prefix(' ') {
        return LineEvent::Context(text);
    }
    if line.is_empty() {
        return LineEvent::Context("");
    }
    LineEvent::Unrecognized
}

fn strip_side_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}

/// Parse `@@ -oldStart[,oldLen] +newStart[,newLen] @@ trailer`.
///
/// A missing length defaults to 1.
pub fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let rest = line.strip_prefix("@@ ")?;
    let end = rest.find(" @@")?;
    let mut ranges = rest[..end].split_whitespace();
    let (old_start, old_line_count) = parse_range(ranges.next()?.strip_prefix('-')?)?;
    let (new_start, new_line_count) = parse_range(ranges.next()?.strip_prefix('+')?)?;
    if ranges.next().is_some() {
        return None;
    }

    Some(HunkHeader {
        text: line.to_string(),
        old_start,
        old_line_count,
        new_start,
        new_line_count,
    })
}

fn parse_range(s: &str) -> Option<(u32, u32)> {
    match s.split_once(',') {
        Some((start, len)) => Some((start.parse().ok()?, len.parse().ok()?)),
        None => Some((s.parse().ok()?, 1)),
    }
}

struct OpenHunk {
    header: HunkHeader,
    changes: Vec<RawLineChange>,
    old_line: u32,
    new_line: u32,
}

struct OpenFile {
    old_path: String,
    new_path: String,
    hunks: Vec<Hunk>,
}

struct DiffParser<'o> {
    options: &'o ParseOptions,
    state: ParserState,
    file: Option<OpenFile>,
    hunk: Option<OpenHunk>,
    files: Vec<FileDiff>,
}

impl<'o> DiffParser<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            state: ParserState::AwaitingOldHeader,
            file: None,
            hunk: None,
            files: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        match classify_line(line) {
            LineEvent::OldFileMarker { .. } => {
                self.close_hunk();
                self.state = ParserState::AwaitingNewHeader;
            }
            LineEvent::NewFileMarker { path } => {
                self.close_hunk();
                self.close_file();
                // the `+++` path names both sides
                self.file = Some(OpenFile {
                    old_path: path.to_string(),
                    new_path: path.to_string(),
                    hunks: Vec::new(),
                });
                self.state = ParserState::AwaitingOldHeader;
            }
            LineEvent::HunkHeader(header) => {
                self.close_hunk();
                if self.file.is_none() {
                    // hunk without file headers: keep it under an unnamed file
                    self.file = Some(OpenFile {
                        old_path: String::new(),
                        new_path: String::new(),
                        hunks: Vec::new(),
                    });
                }
                self.hunk = Some(OpenHunk {
                    old_line: header.old_start,
                    new_line: header.new_start,
                    header,
                    changes: Vec::new(),
                });
                self.state = ParserState::InHunk;
            }
            LineEvent::Insert(text) => self.record(RawKind::Insert, text),
            LineEvent::Delete(text) => self.record(RawKind::Delete, text),
            LineEvent::Context(text) => self.record(RawKind::Context, text),
            LineEvent::Metadata | LineEvent::Unrecognized => {}
        }
    }

    fn record(&mut self, kind: RawKind, text: &str) {
        if self.state != ParserState::InHunk {
            return;
        }
        let Some(hunk) = self.hunk.as_mut() else {
            return;
        };
        let (old_line_no, new_line_no) = match kind {
            RawKind::Insert => {
                let new = hunk.new_line;
                hunk.new_line = hunk.new_line.saturating_add(1);
                (None, Some(new))
            }
            RawKind::Delete => {
                let old = hunk.old_line;
                hunk.old_line = hunk.old_line.saturating_add(1);
                (Some(old), None)
            }
            RawKind::Context => {
                let (old, new) = (hunk.old_line, hunk.new_line);
                hunk.old_line = hunk.old_line.saturating_add(1);
                hunk.new_line = hunk.new_line.saturating_add(1);
                (Some(old), Some(new))
            }
        };
        hunk.changes.push(RawLineChange {
            kind,
            text: text.to_string(),
            old_line_no,
            new_line_no,
        });
    }

    fn close_hunk(&mut self) {
        if let Some(open) = self.hunk.take() {
            let hunk = process_hunk(open.header, &open.changes, self.options);
            if let Some(file) = self.file.as_mut() {
                file.hunks.push(hunk);
            }
        }
        if self.state == ParserState::InHunk {
            self.state = ParserState::AwaitingOldHeader;
        }
    }

    fn close_file(&mut self) {
        if let Some(open) = self.file.take() {
            self.files.push(finalize_file(open));
        }
    }

    fn finish(mut self) -> Vec<FileDiff> {
        self.close_hunk();
        self.close_file();
        self.files
    }
}

fn finalize_file(open: OpenFile) -> FileDiff {
    let kind = derive_kind(&open.hunks);
    let hunks = insert_skip_blocks(open.hunks);
    let stats = count_changes(&hunks);
    FileDiff {
        old_path: open.old_path,
        new_path: open.new_path,
        kind,
        hunks,
        additions: stats.additions,
        deletions: stats.deletions,
    }
}

/// Pure inserts ⇒ add, pure deletes ⇒ delete, anything else ⇒ modify.
fn derive_kind(hunks: &[Hunk]) -> FileDiffKind {
    let lines = hunks.iter().flat_map(|h| h.lines.iter());
    let (mut has_insert, mut has_delete) = (false, false);
    for line in lines {
        match line.kind {
            ChangeKind::Insert => has_insert = true,
            ChangeKind::Delete => has_delete = true,
            ChangeKind::Normal => {}
        }
    }
    match (has_insert, has_delete) {
        (true, false) => FileDiffKind::Add,
        (false, true) => FileDiffKind::Delete,
        _ => FileDiffKind::Modify,
    }
}

/// Parse unified diff text into per-file structured diffs.
///
/// Files and hunks keep input order. Empty or unrecognisable input yields an
/// empty list.
pub fn parse_unified_diff(text: &str, options: &ParseOptions) -> Vec<FileDiff> {
    let mut parser = DiffParser::new(options);
    for line in text.lines() {
        parser.feed(line);
    }
    let files = parser.finish();
    tracing::debug!(file_count = files.len(), "parsed unified diff");
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify_line("--- a/x.js"),
            LineEvent::OldFileMarker { path: "x.js" }
        );
        assert_eq!(
            classify_line("+++ b/src/x.js"),
            LineEvent::NewFileMarker { path: "src/x.js" }
        );
        assert_eq!(classify_line("diff --git a/x b/x"), LineEvent::Metadata);
        assert_eq!(classify_line("index 123..456 100644"), LineEvent::Metadata);
        assert_eq!(
            classify_line("\\ No newline at end of file"),
            LineEvent::Metadata
        );
        assert_eq!(classify_line("+added"), LineEvent::Insert("added"));
        assert_eq!(classify_line("-gone"), LineEvent::Delete("gone"));
        assert_eq!(classify_line(" same"), LineEvent::Context("same"));
        assert_eq!(classify_line(""), LineEvent::Context(""));
        assert_eq!(classify_line("new file mode 100644"), LineEvent::Unrecognized);
    }

    #[test]
    fn test_path_without_side_prefix_kept() {
        assert_eq!(
            classify_line("+++ package/index.js"),
            LineEvent::NewFileMarker {
                path: "package/index.js"
            }
        );
    }

    #[test]
    fn test_hunk_header_with_lengths_and_trailer() {
        let header = parse_hunk_header("@@ -10,4 +12,15 @@ function foo() {").unwrap();
        assert_eq!(header.old_start, 10);
        assert_eq!(header.old_line_count, 4);
        assert_eq!(header.new_start, 12);
        assert_eq!(header.new_line_count, 15);
        assert_eq!(header.text, "@@ -10,4 +12,15 @@ function foo() {");
    }

    #[test]
    fn test_hunk_header_default_lengths() {
        let header = parse_hunk_header("@@ -3 +4 @@").unwrap();
        assert_eq!((header.old_line_count, header.new_line_count), (1, 1));
    }

    #[test]
    fn test_malformed_hunk_headers() {
        assert!(parse_hunk_header("@@ -a,1 +1 @@").is_none());
        assert!(parse_hunk_header("@@ 1,2 3,4 @@").is_none());
        assert!(parse_hunk_header("@@ -1,2 +3,4").is_none());
        assert_eq!(classify_line("@@ garbage"), LineEvent::Unrecognized);
    }

    #[test]
    fn test_line_numbers_advance_per_side() {
        let diff = "--- a/f\n+++ b/f\n@@ -5,3 +5,3 @@\n ctx\n-old\n+brand new line here\n ctx2\n";
        let options = ParseOptions {
            merge_modified_lines: false,
            ..ParseOptions::default()
        };
        let files = parse_unified_diff(diff, &options);
        let hunk = files[0].iter_hunks().next().unwrap();
        let numbers: Vec<(Option<u32>, Option<u32>)> = hunk
            .lines
            .iter()
            .map(|l| (l.old_line_no, l.new_line_no))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (Some(5), Some(5)),
                (Some(6), None),
                (None, Some(6)),
                (Some(7), Some(7)),
            ]
        );
    }

    #[test]
    fn test_content_before_any_hunk_is_ignored() {
        let diff = "+++ b/f\n+not in a hunk\n@@ -1 +1,2 @@\n x\n+y\n";
        let files = parse_unified_diff(diff, &ParseOptions::default());
        let hunk = files[0].iter_hunks().next().unwrap();
        assert_eq!(hunk.lines.len(), 2);
    }

    #[test]
    fn test_hunk_without_file_header_gets_unnamed_file() {
        let files = parse_unified_diff("@@ -1 +1 @@\n+x\n", &ParseOptions::default());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].new_path, "");
        assert_eq!(files[0].kind, FileDiffKind::Add);
    }

    #[test]
    fn test_new_file_marker_names_both_sides() {
        let diff = "--- a/old.js\n+++ /dev/null\n@@ -1 +0,0 @@\n-gone\n";
        let files = parse_unified_diff(diff, &ParseOptions::default());
        assert_eq!(files[0].old_path, "/dev/null");
        assert_eq!(files[0].new_path, "/dev/null");
        assert_eq!(files[0].kind, FileDiffKind::Delete);

        let files = parse_unified_diff(
            "--- a/before.js\n+++ b/after.js\n@@ -1 +1 @@\n-x\n+y\n",
            &ParseOptions::default(),
        );
        assert_eq!(files[0].old_path, "after.js");
    }

    #[test]
    fn test_crlf_input() {
        let diff = "--- a/f\r\n+++ b/f\r\n@@ -1 +1 @@\r\n-a\r\n+completely different\r\n";
        let files = parse_unified_diff(diff, &ParseOptions::default());
        assert_eq!(files[0].new_path, "f");
        let hunk = files[0].iter_hunks().next().unwrap();
        assert_eq!(hunk.lines[0].segments[0].text, "a");
    }
}
