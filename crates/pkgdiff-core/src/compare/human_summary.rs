//! Human-readable summary renderers for comparisons and parsed diffs.

use crate::compare::model::CompareResult;
use crate::deps::{DependencyChange, DependencyChangeKind, SemverBucket};
use crate::tree::FileChange;
use crate::unified::{FileDiff, FileDiffKind};

/// Render a Markdown/text summary of a [`CompareResult`].
///
/// Informational only; the structured result is the contract.
pub fn render_compare_summary(result: &CompareResult) -> String {
    let mut out = String::new();

    out.push_str("## Package Comparison\n\n");
    out.push_str(&format!(
        "**Files**: {} → {}  \n**Changes**: {} added, {} removed, {} modified\n\n",
        result.totals.from_files,
        result.totals.to_files,
        result.added.len(),
        result.removed.len(),
        result.modified.len()
    ));

    if result.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    push_file_section(&mut out, "Added Files", &result.added);
    push_file_section(&mut out, "Removed Files", &result.removed);
    push_file_section(&mut out, "Modified Files", &result.modified);

    if !result.dependencies.is_empty() {
        out.push_str("### Dependency Changes\n\n");
        out.push_str("| Section | Name | From | To | Change |\n|---|---|---|---|---|\n");
        for change in &result.dependencies {
            out.push_str(&dependency_row(change));
        }
        out.push('\n');
    }

    if !result.meta.warnings.is_empty() {
        out.push_str("### Warnings\n\n");
        for warning in &result.meta.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
        out.push('\n');
    }

    out
}

fn push_file_section(out: &mut String, title: &str, changes: &[FileChange]) {
    if changes.is_empty() {
        return;
    }
    out.push_str(&format!("### {} ({})\n\n", title, changes.len()));
    for change in changes {
        match (change.old_size, change.new_size) {
            (Some(old), Some(new)) if old != new => {
                out.push_str(&format!("- `{}` ({} → {} bytes)\n", change.path, old, new))
            }
            (_, Some(size)) | (Some(size), None) => {
                out.push_str(&format!("- `{}` ({} bytes)\n", change.path, size))
            }
            (None, None) => out.push_str(&format!("- `{}`\n", change.path)),
        }
    }
    out.push('\n');
}

fn dependency_row(change: &DependencyChange) -> String {
    let kind = match change.kind {
        DependencyChangeKind::Added => "added".to_string(),
        DependencyChangeKind::Removed => "removed".to_string(),
        DependencyChangeKind::Updated => match change.semver_bucket {
            Some(SemverBucket::Major) => "updated (major)".to_string(),
            Some(SemverBucket::Minor) => "updated (minor)".to_string(),
            Some(SemverBucket::Patch) => "updated (patch)".to_string(),
            Some(SemverBucket::Prerelease) => "updated (prerelease)".to_string(),
            None => "updated".to_string(),
        },
    };
    format!(
        "| {} | `{}` | {} | {} | {} |\n",
        change.section.manifest_key(),
        change.name,
        change.from.as_deref().unwrap_or("-"),
        change.to.as_deref().unwrap_or("-"),
        kind
    )
}

/// Render a per-file summary of parsed diffs.
pub fn render_diff_summary(files: &[FileDiff]) -> String {
    let mut out = String::new();
    let additions: usize = files.iter().map(|f| f.additions).sum();
    let deletions: usize = files.iter().map(|f| f.deletions).sum();

    out.push_str("## Diff Summary\n\n");
    out.push_str(&format!(
        "**Files**: {}  \n**Lines**: +{} -{}\n\n",
        files.len(),
        additions,
        deletions
    ));

    if files.is_empty() {
        out.push_str("_No file changes._\n");
        return out;
    }

    for file in files {
        let label = match file.kind {
            FileDiffKind::Add => "added",
            FileDiffKind::Delete => "deleted",
            FileDiffKind::Modify => "modified",
        };
        let path = if file.old_path == file.new_path || file.old_path.is_empty() {
            file.new_path.clone()
        } else if file.new_path.is_empty() {
            file.old_path.clone()
        } else {
            format!("{} → {}", file.old_path, file.new_path)
        };
        out.push_str(&format!(
            "- `{}` {} (+{} -{}, {} hunks)\n",
            path,
            label,
            file.additions,
            file.deletions,
            file.iter_hunks().count()
        ));
    }

    out
}
