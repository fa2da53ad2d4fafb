//! Collaborator traits for fetching package inputs.
//!
//! The core never performs I/O. Anything that can hand over file contents,
//! file trees and manifests for a `(package, version)` pair plugs in here.

use crate::errors::Result;
use pkgdiff_core::FileTreeNode;
use serde_json::Value;

pub trait FileContentProvider {
    /// Text of one file, or `None` when the file does not exist in that version.
    fn file_content(&self, package: &str, version: &str, path: &str) -> Result<Option<String>>;
}

pub trait FileTreeProvider {
    /// Root nodes of the version's file tree.
    fn file_tree(&self, package: &str, version: &str) -> Result<Vec<FileTreeNode>>;
}

pub trait ManifestProvider {
    /// Parsed `package.json`, or `None` when the version has none.
    fn manifest(&self, package: &str, version: &str) -> Result<Option<Value>>;
}

/// Everything a comparison needs.
pub trait PackageSource: FileContentProvider + FileTreeProvider + ManifestProvider {}

impl<T> PackageSource for T where
    T: FileContentProvider + FileTreeProvider + ManifestProvider + ?Sized
{
}
