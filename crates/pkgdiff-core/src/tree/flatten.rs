//! Iterative tree flattening.

use crate::tree::model::FileTreeNode;
use std::collections::BTreeMap;

/// Path-indexed view of a tree.
///
/// `order` lists each distinct path once, in pre-order of first appearance.
/// When a path repeats, the later node replaces the earlier one in `nodes`
/// while keeping its original position in `order`.
#[derive(Debug, Default)]
pub struct FlatTree<'a> {
    order: Vec<&'a str>,
    nodes: BTreeMap<&'a str, &'a FileTreeNode>,
}

impl<'a> FlatTree<'a> {
    pub fn get(&self, path: &str) -> Option<&'a FileTreeNode> {
        self.nodes.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// Nodes in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a FileTreeNode)> + '_ {
        self.order
            .iter()
            .filter_map(|path| self.nodes.get(path).map(|node| (*path, *node)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of file (non-directory) entries.
    pub fn file_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_file()).count()
    }
}

/// Visit every node in pre-order using an explicit stack, so depth is
/// bounded by heap rather than call stack.
pub fn walk_preorder<'a>(
    roots: &'a [FileTreeNode],
    mut visit: impl FnMut(&'a FileTreeNode),
) {
    let mut stack: Vec<&'a FileTreeNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        visit(node);
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        }
    }
}

pub fn flatten(roots: &[FileTreeNode]) -> FlatTree<'_> {
    let mut flat = FlatTree::default();
    walk_preorder(roots, |node| {
        if flat.nodes.insert(node.path.as_str(), node).is_none() {
            flat.order.push(node.path.as_str());
        }
    });
    flat
}

/// Count file nodes, ignoring directories. Duplicate paths count once.
pub fn count_files(roots: &[FileTreeNode]) -> usize {
    flatten(roots).file_count()
}

/// Total nodes including directories and duplicates.
pub fn count_nodes(roots: &[FileTreeNode]) -> usize {
    let mut count = 0;
    walk_preorder(roots, |_| count += 1);
    count
}
