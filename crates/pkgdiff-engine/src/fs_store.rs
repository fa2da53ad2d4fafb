//! Filesystem-backed package store
//!
//! Unpacked package versions live under `<root>/<package>/<version>/`.
//! Scoped names (`@scope/name`) map to two nested directories.

#![allow(clippy::result_large_err)]

use crate::errors::{invalid_location, io_error, version_missing, Result};
use crate::providers::{FileContentProvider, FileTreeProvider, ManifestProvider};
use pkgdiff_core::errors::{ExError, ExErrorKind, PkgDiffError};
use pkgdiff_core::FileTreeNode;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// Package store rooted at a directory
pub struct FsPackageStore {
    root: PathBuf,
    max_nodes: Option<usize>,
}

/// A directory seen during the walk, before its node is assembled.
struct VisitedDir {
    rel: String,
    files: Vec<FileTreeNode>,
    subdirs: Vec<String>,
}

impl FsPackageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_nodes: None,
        }
    }

    /// Stop walking a version once it holds more than `limit` nodes.
    ///
    /// Files past the limit are never opened or hashed.
    pub fn with_max_nodes(mut self, limit: usize) -> Self {
        self.max_nodes = Some(limit);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one unpacked version.
    ///
    /// Rejects names that would escape the root.
    pub fn version_dir(&self, package: &str, version: &str) -> Result<PathBuf> {
        let mut dir = self.root.clone();
        for segment in package_segments(package)? {
            dir.push(segment);
        }
        if !is_plain_segment(version) {
            return Err(invalid_location("store_lookup", "version", version));
        }
        dir.push(version);
        Ok(dir)
    }

    /// Walk a version directory into nested nodes without recursion.
    ///
    /// Directories are read in pre-order; nodes are then assembled bottom-up
    /// by replaying the visit list in reverse, so every child directory is
    /// complete before its parent. Symlinks and other special files are skipped.
    fn walk_version(&self, package: &str, version: &str, dir: &Path) -> Result<Vec<FileTreeNode>> {
        let mut pending: Vec<(String, PathBuf)> = vec![(String::new(), dir.to_path_buf())];
        let mut visited: Vec<VisitedDir> = Vec::new();
        let mut nodes = 0usize;

        while let Some((rel, abs)) = pending.pop() {
            let mut files = Vec::new();
            let mut subdirs = Vec::new();
            for entry in fs::read_dir(&abs).map_err(|e| io_error("file_tree", e))? {
                let entry = entry.map_err(|e| io_error("file_tree", e))?;
                let file_type = entry.file_type().map_err(|e| io_error("file_tree", e))?;
                let name = entry.file_name().to_string_lossy().into_owned();
                let child_rel = if rel.is_empty() {
                    name
                } else {
                    format!("{}/{}", rel, name)
                };

                if !file_type.is_dir() && !file_type.is_file() {
                    continue;
                }
                nodes += 1;
                if let Some(limit) = self.max_nodes.filter(|&limit| nodes > limit) {
                    return Err(PkgDiffError::TreeTooLarge {
                        package: package.to_string(),
                        version: version.to_string(),
                        nodes,
                        limit,
                    }
                    .into());
                }

                if file_type.is_dir() {
                    subdirs.push(child_rel.clone());
                    pending.push((child_rel, entry.path()));
                } else {
                    files.push(file_node(child_rel, &entry.path())?);
                }
            }
            visited.push(VisitedDir {
                rel,
                files,
                subdirs,
            });
        }

        let mut built: HashMap<String, FileTreeNode> = HashMap::new();
        let mut roots = Vec::new();
        for dir in visited.into_iter().rev() {
            let mut children = dir.files;
            children.extend(dir.subdirs.iter().filter_map(|sub| built.remove(sub)));
            children.sort_by(|a, b| a.path.cmp(&b.path));
            if dir.rel.is_empty() {
                roots = children;
            } else {
                built.insert(dir.rel.clone(), FileTreeNode::directory(dir.rel, children));
            }
        }

        Ok(roots)
    }
}

impl FileContentProvider for FsPackageStore {
    fn file_content(&self, package: &str, version: &str, path: &str) -> Result<Option<String>> {
        let dir = self.version_dir(package, version)?;
        if !dir.is_dir() {
            return Err(version_missing(package, version));
        }
        let full = dir.join(relative_file_path(path)?);
        if full.is_dir() {
            return Ok(None);
        }
        let bytes = match fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("file_content", e).with_path(path)),
        };
        String::from_utf8(bytes).map(Some).map_err(|_| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("file_content")
                .with_package(package)
                .with_version(version)
                .with_path(path)
                .with_message("File is not valid UTF-8 text")
        })
    }
}

impl FileTreeProvider for FsPackageStore {
    fn file_tree(&self, package: &str, version: &str) -> Result<Vec<FileTreeNode>> {
        let dir = self.version_dir(package, version)?;
        if !dir.is_dir() {
            return Err(version_missing(package, version));
        }
        let tree = self.walk_version(package, version, &dir)?;
        tracing::debug!(package, version, roots = tree.len(), "walked version tree");
        Ok(tree)
    }
}

impl ManifestProvider for FsPackageStore {
    fn manifest(&self, package: &str, version: &str) -> Result<Option<Value>> {
        let path = self.version_dir(package, version)?.join(MANIFEST_FILE);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("manifest", e)),
        };
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            ExError::from(PkgDiffError::InvalidManifest {
                reason: e.to_string(),
            })
            .with_op("manifest")
            .with_package(package)
            .with_version(version)
        })?;
        Ok(Some(value))
    }
}

fn file_node(rel: String, abs: &Path) -> Result<FileTreeNode> {
    let mut file = fs::File::open(abs).map_err(|e| io_error("file_tree", e))?;
    let mut hasher = Sha256::new();
    let size = std::io::copy(&mut file, &mut hasher).map_err(|e| io_error("file_tree", e))?;
    let hash = hex::encode(hasher.finalize());
    Ok(FileTreeNode::file(rel, Some(size), Some(hash)))
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(|c: char| c == '/' || c == '\\' || c == '\0')
}

/// `name` or `@scope/name`.
fn package_segments(package: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = package.split('/').collect();
    let shaped = match segments.as_slice() {
        [name] => !name.starts_with('@'),
        [scope, _] => scope.len() > 1 && scope.starts_with('@'),
        _ => false,
    };
    if !shaped || !segments.iter().all(|s| is_plain_segment(s)) {
        return Err(invalid_location("store_lookup", "package name", package));
    }
    Ok(segments)
}

/// A requested file path must stay inside the version directory.
fn relative_file_path(path: &str) -> Result<PathBuf> {
    let mut rel = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::CurDir => {}
            _ => {
                return Err(ExError::from(PkgDiffError::InvalidPath {
                    path: path.to_string(),
                })
                .with_op("file_content"))
            }
        }
    }
    if rel.as_os_str().is_empty() {
        return Err(ExError::from(PkgDiffError::InvalidPath {
            path: path.to_string(),
        })
        .with_op("file_content"));
    }
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (FsPackageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FsPackageStore::new(temp_dir.path());
        (store, temp_dir)
    }

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scoped_package_layout() {
        let (store, dir) = setup_store();
        let version_dir = store.version_dir("@types/node", "20.0.0").unwrap();
        assert_eq!(version_dir, dir.path().join("@types").join("node").join("20.0.0"));
    }

    #[test]
    fn test_rejects_escaping_names() {
        let (store, _dir) = setup_store();
        assert!(store.version_dir("..", "1.0.0").is_err());
        assert!(store.version_dir("a/b", "1.0.0").is_err());
        assert!(store.version_dir("@/b", "1.0.0").is_err());
        assert!(store.version_dir("lodash", "../x").is_err());
        assert!(store.version_dir("@scope", "1.0.0").is_err());
    }

    #[test]
    fn test_rejects_traversal_in_file_path() {
        let (store, _dir) = setup_store();
        for bad in ["../secret", "/etc/passwd", "lib/../../x", ""] {
            let err = store.file_content("pkg", "1.0.0", bad).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput, "path {:?}", bad);
        }
    }

    #[test]
    fn test_file_content_missing_and_present() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/lib/a.js", b"module.exports = 1;\n");
        assert_eq!(
            store.file_content("pkg", "1.0.0", "lib/a.js").unwrap().as_deref(),
            Some("module.exports = 1;\n")
        );
        assert_eq!(store.file_content("pkg", "1.0.0", "lib/b.js").unwrap(), None);
        assert_eq!(store.file_content("pkg", "1.0.0", "lib").unwrap(), None);
    }

    #[test]
    fn test_non_utf8_content_rejected() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/bin.dat", &[0xff, 0xfe, 0x00]);
        let err = store.file_content("pkg", "1.0.0", "bin.dat").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_file_tree_nested_sorted_hashed() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/package.json", b"{}");
        write(dir.path(), "pkg/1.0.0/lib/z.js", b"z");
        write(dir.path(), "pkg/1.0.0/lib/util/a.js", b"test");
        write(dir.path(), "pkg/1.0.0/README.md", b"# hi");

        let roots = store.file_tree("pkg", "1.0.0").unwrap();
        let paths: Vec<&str> = roots.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "lib", "package.json"]);

        let lib = &roots[1];
        assert!(lib.is_directory());
        let lib_children = lib.children.as_ref().unwrap();
        let child_paths: Vec<&str> = lib_children.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(child_paths, vec!["lib/util", "lib/z.js"]);

        let util = lib_children[0].children.as_ref().unwrap();
        assert_eq!(util[0].path, "lib/util/a.js");
        assert_eq!(util[0].size, Some(4));
        assert_eq!(
            util[0].hash.as_deref(),
            Some("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")
        );
    }

    #[test]
    fn test_file_tree_missing_version() {
        let (store, _dir) = setup_store();
        let err = store.file_tree("pkg", "1.0.0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_file_content_unknown_version() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/lib/a.js", b"a\n");
        let err = store.file_content("pkg", "2.0.0", "lib/a.js").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.package(), Some("pkg"));
        assert_eq!(err.version(), Some("2.0.0"));
    }

    #[test]
    fn test_file_tree_stops_at_node_limit() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/lib/a.js", b"a");
        write(dir.path(), "pkg/1.0.0/lib/b.js", b"b");
        write(dir.path(), "pkg/1.0.0/index.js", b"i");

        // lib, lib/a.js, lib/b.js, index.js
        let store = store.with_max_nodes(3);
        let err = store.file_tree("pkg", "1.0.0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InputTooLarge);
        assert_eq!(err.package(), Some("pkg"));
        assert_eq!(err.version(), Some("1.0.0"));

        let store = FsPackageStore::new(dir.path()).with_max_nodes(4);
        assert_eq!(store.file_tree("pkg", "1.0.0").unwrap().len(), 2);
    }

    #[test]
    fn test_node_limit_reports_first_overflow() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/a.js", b"a");
        write(dir.path(), "pkg/1.0.0/b.js", b"b");
        let err = store.with_max_nodes(0).file_tree("pkg", "1.0.0").unwrap_err();
        assert!(err.message().contains("1 nodes"), "{}", err.message());
    }

    #[test]
    fn test_manifest() {
        let (store, dir) = setup_store();
        write(dir.path(), "pkg/1.0.0/package.json", br#"{"name": "pkg"}"#);
        write(dir.path(), "pkg/2.0.0/package.json", b"{ nope");
        fs::create_dir_all(dir.path().join("pkg/3.0.0")).unwrap();

        let manifest = store.manifest("pkg", "1.0.0").unwrap().unwrap();
        assert_eq!(manifest["name"], "pkg");
        let err = store.manifest("pkg", "2.0.0").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidManifest);
        assert_eq!(store.manifest("pkg", "3.0.0").unwrap(), None);
    }
}
