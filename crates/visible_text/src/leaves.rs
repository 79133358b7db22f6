//! Lazy document-order walk over text-bearing leaves.

use crate::tree::{NodeKind, TextTree};

/// Iterator over the text nodes under a root, in document order.
///
/// The walk is a pre-order traversal driven by `first_child`, `next_sibling`
/// and `parent`, so it holds no stack and never leaves the root's subtree.
pub struct TextLeaves<'tree, T: TextTree + ?Sized> {
    tree: &'tree T,
    root: T::Node,
    next: Option<T::Node>,
}

impl<'tree, T: TextTree + ?Sized> TextLeaves<'tree, T> {
    pub fn new(tree: &'tree T, root: T::Node) -> Self {
        Self {
            tree,
            root,
            next: Some(root),
        }
    }

    /// Pre-order successor of `node`, bounded by the root.
    fn successor(&self, node: T::Node) -> Option<T::Node> {
        if let Some(child) = self.tree.first_child(node) {
            return Some(child);
        }
        let mut current = node;
        loop {
            if current == self.root {
                return None;
            }
            if let Some(sibling) = self.tree.next_sibling(current) {
                return Some(sibling);
            }
            current = self.tree.parent(current)?;
        }
    }
}

impl<T: TextTree + ?Sized> Iterator for TextLeaves<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.next?;
            self.next = self.successor(node);
            if self.tree.kind(node) == Some(NodeKind::Text) {
                return Some(node);
            }
        }
    }
}
