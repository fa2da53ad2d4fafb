//! Classification of a version bump between two manifest version strings.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Coarse bucket reported on an updated dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemverBucket {
    Major,
    Minor,
    Patch,
    Prerelease,
}

/// Fine-grained outcome of comparing two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionDelta {
    Major,
    Premajor,
    Minor,
    Preminor,
    Patch,
    Prepatch,
    Prerelease,
    /// Same precedence.
    Equal,
    /// At least one side is not a SemVer version after stripping range operators.
    Unparseable,
}

impl VersionDelta {
    pub fn bucket(self) -> Option<SemverBucket> {
        match self {
            VersionDelta::Major => Some(SemverBucket::Major),
            VersionDelta::Minor => Some(SemverBucket::Minor),
            VersionDelta::Patch => Some(SemverBucket::Patch),
            VersionDelta::Premajor
            | VersionDelta::Preminor
            | VersionDelta::Prepatch
            | VersionDelta::Prerelease => Some(SemverBucket::Prerelease),
            VersionDelta::Equal | VersionDelta::Unparseable => None,
        }
    }
}

/// Strip a leading range operator run (`^`, `~`, `>`, `<`, `=`, whitespace)
/// and then one leading `v`.
pub fn strip_range_prefix(raw: &str) -> &str {
    let trimmed = raw.trim_start_matches(|c: char| {
        matches!(c, '^' | '~' | '>' | '<' | '=') || c.is_whitespace()
    });
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    trimmed.trim_end()
}

pub fn parse_version(raw: &str) -> Option<Version> {
    Version::parse(strip_range_prefix(raw)).ok()
}

/// Build metadata does not take part in precedence.
fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

pub fn version_delta(from: &str, to: &str) -> VersionDelta {
    let (Some(a), Some(b)) = (parse_version(from), parse_version(to)) else {
        return VersionDelta::Unparseable;
    };
    delta_between(&a, &b)
}

pub fn delta_between(a: &Version, b: &Version) -> VersionDelta {
    let (high, low) = match precedence(a, b) {
        Ordering::Equal => return VersionDelta::Equal,
        Ordering::Greater => (a, b),
        Ordering::Less => (b, a),
    };
    let high_has_pre = !high.pre.is_empty();
    let low_has_pre = !low.pre.is_empty();

    if low_has_pre && !high_has_pre {
        // 1.0.0-rc.1 -> 1.0.0 is a major release, 1.2.0-rc.1 -> 1.2.0 a minor one
        if low.minor == 0 && low.patch == 0 {
            return VersionDelta::Major;
        }
        if (low.major, low.minor, low.patch) == (high.major, high.minor, high.patch) {
            if low.minor != 0 && low.patch == 0 {
                return VersionDelta::Minor;
            }
            return VersionDelta::Patch;
        }
    }

    if a.major != b.major {
        return if high_has_pre { VersionDelta::Premajor } else { VersionDelta::Major };
    }
    if a.minor != b.minor {
        return if high_has_pre { VersionDelta::Preminor } else { VersionDelta::Minor };
    }
    if a.patch != b.patch {
        return if high_has_pre { VersionDelta::Prepatch } else { VersionDelta::Patch };
    }
    VersionDelta::Prerelease
}
