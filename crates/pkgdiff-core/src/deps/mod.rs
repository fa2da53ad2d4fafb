//! Manifest dependency comparison.

pub mod compare;
pub mod model;
pub mod semver_delta;

pub use compare::{compare_dependencies, section_versions};
pub use model::{DependencyChange, DependencyChangeKind, DependencySection};
pub use semver_delta::{version_delta, SemverBucket, VersionDelta};
