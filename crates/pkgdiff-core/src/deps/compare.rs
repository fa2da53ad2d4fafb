//! Dependency comparison across manifest sections.

use crate::deps::model::{DependencyChange, DependencyChangeKind, DependencySection};
use crate::deps::semver_delta::version_delta;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Read one section as name -> version text.
///
/// A missing manifest, missing section, or a section that is not an object
/// reads as empty. Non-string values are kept as their compact JSON text.
pub fn section_versions(
    manifest: Option<&Value>,
    section: DependencySection,
) -> BTreeMap<String, String> {
    let Some(entries) = manifest
        .and_then(|m| m.get(section.manifest_key()))
        .and_then(Value::as_object)
    else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(name, version)| {
            let text = match version {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), text)
        })
        .collect()
}

/// Compare dependency sections of two manifests.
///
/// Output is grouped by section in [`DependencySection::ALL`] order and
/// sorted by package name within each section.
pub fn compare_dependencies(from: Option<&Value>, to: Option<&Value>) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for section in DependencySection::ALL {
        let old = section_versions(from, section);
        let new = section_versions(to, section);
        let names: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

        for name in names {
            let from_version = old.get(name);
            let to_version = new.get(name);
            let (kind, semver_bucket) = match (from_version, to_version) {
                (Some(a), Some(b)) if a == b => continue,
                (Some(a), Some(b)) => (DependencyChangeKind::Updated, version_delta(a, b).bucket()),
                (None, Some(_)) => (DependencyChangeKind::Added, None),
                (Some(_), None) => (DependencyChangeKind::Removed, None),
                (None, None) => continue,
            };
            changes.push(DependencyChange {
                name: name.clone(),
                section,
                from: from_version.cloned(),
                to: to_version.cloned(),
                kind,
                semver_bucket,
            });
        }
    }

    tracing::trace!(change_count = changes.len(), "dependencies compared");
    changes
}
