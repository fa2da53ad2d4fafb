//! Gap collapsing between consecutive hunks.

use crate::unified::model::{DiffItem, Hunk, SkipBlock};

/// Interleave skip blocks for the unchanged old-file lines between hunks.
///
/// Hunks must be ordered by ascending `old_start`. The cursor starts at old
/// line 1, so a first hunk at line 50 is preceded by a 49-line skip. Nothing
/// is emitted after the last hunk since the file length is unknown here.
pub fn insert_skip_blocks(hunks: Vec<Hunk>) -> Vec<DiffItem> {
    let mut items = Vec::with_capacity(hunks.len() * 2);
    let mut cursor: u64 = 1;

    for hunk in hunks {
        let start = u64::from(hunk.old_start);
        if start > cursor {
            let gap = u32::try_from(start - cursor).unwrap_or(u32::MAX);
            items.push(DiffItem::Skip(SkipBlock::new(gap)));
        }
        cursor = cursor.max(start + u64::from(hunk.old_line_count));
        items.push(DiffItem::Hunk(hunk));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunk(old_start: u32, old_line_count: u32) -> Hunk {
        Hunk {
            header_text: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_line_count, old_start, old_line_count
            ),
            old_start,
            old_line_count,
            new_start: old_start,
            new_line_count: old_line_count,
            lines: Vec::new(),
        }
    }

    fn skip_counts(items: &[DiffItem]) -> Vec<u32> {
        items
            .iter()
            .filter_map(|item| match item {
                DiffItem::Skip(skip) => Some(skip.count),
                DiffItem::Hunk(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_leading_gap_from_line_one() {
        let items = insert_skip_blocks(vec![hunk(50, 5)]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], DiffItem::Skip(SkipBlock::new(49)));
        assert!(matches!(items[1], DiffItem::Hunk(_)));
    }

    #[test]
    fn test_hunk_at_line_one_has_no_skip() {
        let items = insert_skip_blocks(vec![hunk(1, 4)]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_gap_between_hunks() {
        // first covers 1..=4, so lines 5..=9 are hidden
        let items = insert_skip_blocks(vec![hunk(1, 4), hunk(10, 3)]);
        assert_eq!(skip_counts(&items), vec![5]);
        assert!(matches!(items[1], DiffItem::Skip(_)));
    }

    #[test]
    fn test_adjacent_and_overlapping_hunks() {
        let items = insert_skip_blocks(vec![hunk(1, 4), hunk(5, 2), hunk(6, 1)]);
        assert!(skip_counts(&items).is_empty());
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_new_file_hunk_at_zero() {
        let items = insert_skip_blocks(vec![hunk(0, 0)]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_no_trailing_skip() {
        let items = insert_skip_blocks(vec![hunk(3, 1)]);
        assert!(matches!(items.last(), Some(DiffItem::Hunk(_))));
    }
}
