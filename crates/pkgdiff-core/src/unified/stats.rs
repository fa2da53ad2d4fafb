//! Insert/delete line counting.

use crate::unified::model::{ChangeKind, DiffItem, DiffStats};

/// Count insert and delete lines across all hunks, ignoring skip blocks.
///
/// Merged modifications are `normal` lines and count as neither.
pub fn count_changes(items: &[DiffItem]) -> DiffStats {
    items
        .iter()
        .filter_map(DiffItem::as_hunk)
        .flat_map(|hunk| hunk.lines.iter())
        .fold(DiffStats::default(), |mut stats, line| {
            match line.kind {
                ChangeKind::Insert => stats.additions += 1,
                ChangeKind::Delete => stats.deletions += 1,
                ChangeKind::Normal => {}
            }
            stats
        })
}
