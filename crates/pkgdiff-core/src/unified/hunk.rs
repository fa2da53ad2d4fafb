//! Turns the raw body of one hunk into display lines.

use crate::inline::align;
use crate::options::ParseOptions;
use crate::similarity::similar_enough;
use crate::unified::model::{
    ChangeKind, Hunk, HunkHeader, Line, RawKind, RawLineChange, Segment,
};

/// Build a [`Hunk`] from its header and raw body lines.
///
/// With `merge_modified_lines`, a delete immediately followed by a similar
/// insert collapses into one `normal` line carrying inline segments and both
/// line numbers. Everything else maps one raw change to one line.
pub fn process_hunk(
    header: HunkHeader,
    changes: &[RawLineChange],
    options: &ParseOptions,
) -> Hunk {
    let mut lines = Vec::with_capacity(changes.len());
    let mut idx = 0;

    while idx < changes.len() {
        let change = &changes[idx];
        if options.merge_modified_lines {
            if let Some(next) = changes.get(idx + 1) {
                if change.kind == RawKind::Delete
                    && next.kind == RawKind::Insert
                    && similar_enough(&change.text, &next.text, options.max_change_ratio)
                {
                    lines.push(merged_line(change, next));
                    idx += 2;
                    continue;
                }
            }
        }
        lines.push(plain_line(change));
        idx += 1;
    }

    Hunk {
        header_text: header.text,
        old_start: header.old_start,
        old_line_count: header.old_line_count,
        new_start: header.new_start,
        new_line_count: header.new_line_count,
        lines,
    }
}

fn merged_line(deleted: &RawLineChange, inserted: &RawLineChange) -> Line {
    Line {
        kind: ChangeKind::Normal,
        old_line_no: deleted.old_line_no,
        new_line_no: inserted.new_line_no,
        line_no: inserted.new_line_no,
        segments: align(&deleted.text, &inserted.text),
    }
}

fn plain_line(change: &RawLineChange) -> Line {
    let (kind, line_no) = match change.kind {
        RawKind::Insert => (ChangeKind::Insert, change.new_line_no),
        RawKind::Delete => (ChangeKind::Delete, change.old_line_no),
        RawKind::Context => (ChangeKind::Normal, change.new_line_no),
    };
    Line {
        kind,
        old_line_no: change.old_line_no,
        new_line_no: change.new_line_no,
        line_no,
        segments: vec![Segment::new(change.text.clone(), ChangeKind::Normal)],
    }
}
