//! Error helpers for pkgdiff-engine
//!
//! Wraps pkgdiff-core ExError with engine-specific constructors

use pkgdiff_core::errors::{ExError, ExErrorKind, PkgDiffError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an error for a package version missing from the store
pub fn version_missing(package: &str, version: &str) -> ExError {
    ExError::from(PkgDiffError::VersionNotFound {
        package: package.to_string(),
        version: version.to_string(),
    })
    .with_op("store_lookup")
}

/// Create an error for a package name, version or path that cannot be
/// mapped safely under the store root
pub fn invalid_location(operation: &str, what: &str, value: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(format!("Invalid {}: {:?}", what, value))
}

/// Create a config parse error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidOptions)
        .with_op("config_load")
        .with_message(reason)
}
