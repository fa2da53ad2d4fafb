use crate::compare::model::{
    CompareInput, CompareMeta, CompareOptions, CompareResult, CompareTotals,
};
use crate::deps::compare_dependencies;
use crate::tree::{compare_trees, count_files};
use std::time::Instant;

pub fn truncation_warning(cap: usize) -> String {
    format!(
        "File comparison truncated after {} changes; remaining differences were not reported",
        cap
    )
}

/// Compare trees and manifests of two versions into one [`CompareResult`].
pub fn build_compare_result(input: CompareInput<'_>, options: CompareOptions) -> CompareResult {
    let started = Instant::now();

    let trees = compare_trees(input.from_tree, input.to_tree, options.max_files);
    let dependencies = compare_dependencies(input.from_manifest, input.to_manifest);
    let totals = CompareTotals {
        from_files: count_files(input.from_tree),
        to_files: count_files(input.to_tree),
    };

    let mut warnings = Vec::new();
    if trees.truncated {
        warnings.push(truncation_warning(options.max_files));
    }

    CompareResult {
        added: trees.added,
        removed: trees.removed,
        modified: trees.modified,
        dependencies,
        totals,
        meta: CompareMeta {
            truncated: trees.truncated,
            warnings,
            compute_time_ms: started.elapsed().as_millis() as u64,
        },
    }
}
