use thiserror::Error;

/// Result type alias using the structured [`ExError`]
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can use for
/// programmatic handling, testing, and external responses. The diff core
/// itself is infallible; these kinds describe failures at its edges
/// (option parsing, decoding trees and manifests, collaborator I/O, limits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidOptions,
    InvalidTree,
    InvalidManifest,
    InputTooLarge,
    NotFound,

    // Collaborator I/O
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            ExErrorKind::InvalidTree => "ERR_INVALID_TREE",
            ExErrorKind::InvalidManifest => "ERR_INVALID_MANIFEST",
            ExErrorKind::InputTooLarge => "ERR_INPUT_TOO_LARGE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// package/version/path context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    package: Option<String>,
    version: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            package: None,
            version: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add package name context
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Add package version context
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the package context, if any
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Get the version context, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(package) = &self.package {
            write!(f, " (package: {})", package)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised around the diff core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PkgDiffError {
    /// Requested file is absent from both compared versions
    #[error("File not found in either version: {path}")]
    FileNotFound { package: String, path: String },

    /// Package version is not available from the provider
    #[error("Version not found: {package}@{version}")]
    VersionNotFound { package: String, version: String },

    /// File content exceeds the configured byte limit
    #[error("Content of {path} is {size} bytes, limit is {limit}")]
    ContentTooLarge {
        path: String,
        size: usize,
        limit: usize,
    },

    /// Raw diff text exceeds the configured byte limit
    #[error("Diff text is {size} bytes, limit is {limit}")]
    DiffTooLarge { size: usize, limit: usize },

    /// File tree has more nodes than the configured limit
    #[error("File tree for {package}@{version} has {nodes} nodes, limit is {limit}")]
    TreeTooLarge {
        package: String,
        version: String,
        nodes: usize,
        limit: usize,
    },

    /// File tree document could not be decoded
    #[error("Invalid file tree: {reason}")]
    InvalidTree { reason: String },

    /// Package manifest could not be decoded
    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    /// Parse options are out of range or malformed
    #[error("Invalid parse options: {reason}")]
    InvalidOptions { reason: String },

    /// Requested path escapes the package root
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

/// Conversion from the domain error enum into the structured facility
impl From<PkgDiffError> for ExError {
    fn from(err: PkgDiffError) -> Self {
        let message = err.to_string();
        match err {
            PkgDiffError::FileNotFound { package, path } => ExError::new(ExErrorKind::NotFound)
                .with_package(package)
                .with_path(path)
                .with_message(message),

            PkgDiffError::VersionNotFound { package, version } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_package(package)
                    .with_version(version)
                    .with_message(message)
            }

            PkgDiffError::ContentTooLarge { path, .. } => ExError::new(ExErrorKind::InputTooLarge)
                .with_path(path)
                .with_message(message),

            PkgDiffError::DiffTooLarge { .. } => {
                ExError::new(ExErrorKind::InputTooLarge).with_message(message)
            }

            PkgDiffError::TreeTooLarge {
                package, version, ..
            } => ExError::new(ExErrorKind::InputTooLarge)
                .with_package(package)
                .with_version(version)
                .with_message(message),

            PkgDiffError::InvalidTree { .. } => {
                ExError::new(ExErrorKind::InvalidTree).with_message(message)
            }

            PkgDiffError::InvalidManifest { .. } => {
                ExError::new(ExErrorKind::InvalidManifest).with_message(message)
            }

            PkgDiffError::InvalidOptions { .. } => {
                ExError::new(ExErrorKind::InvalidOptions).with_message(message)
            }

            PkgDiffError::InvalidPath { path } => ExError::new(ExErrorKind::InvalidInput)
                .with_path(path)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::InvalidOptions, "ERR_INVALID_OPTIONS"),
            (ExErrorKind::InvalidTree, "ERR_INVALID_TREE"),
            (ExErrorKind::InvalidManifest, "ERR_INVALID_MANIFEST"),
            (ExErrorKind::InputTooLarge, "ERR_INPUT_TOO_LARGE"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Io, "ERR_IO"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_content_too_large_maps_to_input_too_large() {
        let err: ExError = PkgDiffError::ContentTooLarge {
            path: "dist/index.js".to_string(),
            size: 20,
            limit: 10,
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InputTooLarge);
        assert_eq!(err.path(), Some("dist/index.js"));
        assert!(err.message().contains("limit is 10"));
    }

    #[test]
    fn test_version_not_found_carries_package_and_version() {
        let err: ExError = PkgDiffError::VersionNotFound {
            package: "@types/node".to_string(),
            version: "99.0.0".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.package(), Some("@types/node"));
        assert_eq!(err.version(), Some("99.0.0"));
        assert_eq!(err.message(), "Version not found: @types/node@99.0.0");
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("file_diff")
            .with_package("lodash")
            .with_version("4.17.21")
            .with_message("missing");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND] in operation 'file_diff': missing"));
        assert!(rendered.contains("(package: lodash)"));
        assert!(rendered.contains("(version: 4.17.21)"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk");
        let outer = ExError::new(ExErrorKind::NotFound).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
