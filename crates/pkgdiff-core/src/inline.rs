//! Word-level alignment of two similar lines.
//!
//! A bounded greedy walk over whitespace-preserving tokens. It resyncs by
//! looking at most [`LOOKAHEAD_WINDOW`] tokens ahead on either side, so it
//! runs in roughly linear time on near-identical lines. It is not a minimal
//! alignment and its segment boundaries differ from an LCS-based word diff.

use crate::unified::model::{ChangeKind, Segment};

/// How many tokens past the cursor are searched for a resync point.
pub const LOOKAHEAD_WINDOW: usize = 3;

/// Split into alternating runs of whitespace and non-whitespace.
///
/// Concatenating the tokens yields the input exactly.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_ws: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match current_ws {
            Some(prev) if prev != is_ws => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current_ws = Some(is_ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

/// Align `old_text` against `new_text`.
///
/// Delete + normal segments rebuild `old_text`; insert + normal segments
/// rebuild `new_text`. Adjacent segments never share a kind.
pub fn align(old_text: &str, new_text: &str) -> Vec<Segment> {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);
    let mut segments: Vec<Segment> = Vec::new();
    let (mut i, mut j) = (0, 0);

    loop {
        if i >= old_tokens.len() {
            push(&mut segments, &new_tokens[j..], ChangeKind::Insert);
            break;
        }
        if j >= new_tokens.len() {
            push(&mut segments, &old_tokens[i..], ChangeKind::Delete);
            break;
        }

        if old_tokens[i] == new_tokens[j] {
            push(&mut segments, &old_tokens[i..=i], ChangeKind::Normal);
            i += 1;
            j += 1;
            continue;
        }

        // New side ran ahead: everything before the sync point was inserted.
        if let Some(offset) = find_ahead(&new_tokens[j..], old_tokens[i]) {
            push(&mut segments, &new_tokens[j..j + offset], ChangeKind::Insert);
            j += offset;
            continue;
        }

        if let Some(offset) = find_ahead(&old_tokens[i..], new_tokens[j]) {
            push(&mut segments, &old_tokens[i..i + offset], ChangeKind::Delete);
            i += offset;
            continue;
        }

        push(&mut segments, &old_tokens[i..=i], ChangeKind::Delete);
        push(&mut segments, &new_tokens[j..=j], ChangeKind::Insert);
        i += 1;
        j += 1;
    }

    coalesce(segments)
}

/// Offset (1..=LOOKAHEAD_WINDOW) of `needle` after the head of `tokens`.
fn find_ahead(tokens: &[&str], needle: &str) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(1)
        .take(LOOKAHEAD_WINDOW)
        .find(|(_, token)| **token == needle)
        .map(|(offset, _)| offset)
}

fn push(segments: &mut Vec<Segment>, tokens: &[&str], kind: ChangeKind) {
    if tokens.is_empty() {
        return;
    }
    segments.push(Segment::new(tokens.concat(), kind));
}

/// Merge neighbouring segments of the same kind.
fn coalesce(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match out.last_mut() {
            Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
            _ => out.push(segment),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(segments: &[Segment], kind: ChangeKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind == ChangeKind::Normal || s.kind == kind)
            .map(|s| s.text.as_str())
            .collect()
    }

    fn kinds(segments: &[Segment]) -> Vec<ChangeKind> {
        segments.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_tokenize_keeps_whitespace_runs() {
        assert_eq!(
            tokenize("  let  x =\t1;"),
            vec!["  ", "let", "  ", "x", " ", "=", "\t", "1;"]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_identical_lines_single_normal_segment() {
        let segments = align("const a = 1;", "const a = 1;");
        assert_eq!(segments, vec![Segment::new("const a = 1;", ChangeKind::Normal)]);
    }

    #[test]
    fn test_single_word_replacement() {
        let segments = align("const a = 1;", "const b = 1;");
        assert_eq!(
            segments,
            vec![
                Segment::new("const ", ChangeKind::Normal),
                Segment::new("a", ChangeKind::Delete),
                Segment::new("b", ChangeKind::Insert),
                Segment::new(" = 1;", ChangeKind::Normal),
            ]
        );
    }

    #[test]
    fn test_inserted_word_resyncs_on_new_side() {
        let segments = align("return value;", "return new value;");
        assert_eq!(
            segments,
            vec![
                Segment::new("return ", ChangeKind::Normal),
                Segment::new("new ", ChangeKind::Insert),
                Segment::new("value;", ChangeKind::Normal),
            ]
        );
    }

    #[test]
    fn test_deleted_word_resyncs_on_old_side() {
        let segments = align("return old value;", "return value;");
        assert_eq!(
            segments,
            vec![
                Segment::new("return ", ChangeKind::Normal),
                Segment::new("old ", ChangeKind::Delete),
                Segment::new("value;", ChangeKind::Normal),
            ]
        );
    }

    #[test]
    fn test_trailing_tokens_flushed() {
        let segments = align("a b", "a b c d");
        assert_eq!(
            segments,
            vec![
                Segment::new("a b", ChangeKind::Normal),
                Segment::new(" c d", ChangeKind::Insert),
            ]
        );
        let segments = align("a b c d", "a b");
        assert_eq!(kinds(&segments), vec![ChangeKind::Normal, ChangeKind::Delete]);
    }

    #[test]
    fn test_sync_point_beyond_window_is_replacement() {
        // "z" sits six tokens ahead on the new side, outside the window
        let segments = align("z", "a b c z");
        assert_eq!(side(&segments, ChangeKind::Delete), "z");
        assert_eq!(side(&segments, ChangeKind::Insert), "a b c z");
        assert_eq!(segments[0], Segment::new("z", ChangeKind::Delete));
    }

    #[test]
    fn test_sync_point_at_window_edge_resyncs() {
        // tokens " ", "a", " " precede "z": offset 3
        let segments = align("z", " a z");
        assert_eq!(
            segments,
            vec![
                Segment::new(" a ", ChangeKind::Insert),
                Segment::new("z", ChangeKind::Normal),
            ]
        );

        let segments = align(" a z", "z");
        assert_eq!(
            segments,
            vec![
                Segment::new(" a ", ChangeKind::Delete),
                Segment::new("z", ChangeKind::Normal),
            ]
        );
    }

    #[test]
    fn test_sync_point_one_past_window_is_replacement() {
        // tokens "a", " ", "b", " " precede "z": offset 4
        let segments = align("z", "a b z");
        assert_eq!(
            segments,
            vec![
                Segment::new("z", ChangeKind::Delete),
                Segment::new("a b z", ChangeKind::Insert),
            ]
        );
    }

    #[test]
    fn test_adjacent_kinds_are_coalesced() {
        let segments = align("x y", "p q");
        for pair in segments.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
        assert_eq!(side(&segments, ChangeKind::Delete), "x y");
        assert_eq!(side(&segments, ChangeKind::Insert), "p q");
    }

    #[test]
    fn test_empty_sides() {
        assert!(align("", "").is_empty());
        assert_eq!(align("", "new"), vec![Segment::new("new", ChangeKind::Insert)]);
        assert_eq!(align("old", ""), vec![Segment::new("old", ChangeKind::Delete)]);
    }
}
