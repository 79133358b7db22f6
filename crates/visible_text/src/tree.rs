//! The read-only tree shape the extractor walks.

/// Coarse classification of a node, as far as text extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    /// Carries character data directly.
    Text,
    /// Comments, doctypes, processing instructions.
    Other,
}

/// A document tree that can be traversed without mutation.
///
/// Sibling order is document order. Implementations return `None` from
/// [`TextTree::kind`] for handles that do not name a live node; every other
/// method may assume it is only called with handles that did resolve.
pub trait TextTree {
    type Node: Copy + Eq;

    /// The document node.
    fn document(&self) -> Self::Node;

    /// The `<body>` of the document, if there is one.
    fn body(&self) -> Option<Self::Node>;

    fn kind(&self, node: Self::Node) -> Option<NodeKind>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Raw character data of a text node; `None` for every other kind.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Whether `node` is connected to [`TextTree::document`].
    fn is_attached(&self, node: Self::Node) -> bool {
        let document = self.document();
        let mut current = node;
        loop {
            if current == document {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Nearest ancestor of `node` that is an element.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node> {
        let mut current = self.parent(node)?;
        while self.kind(current)? != NodeKind::Element {
            current = self.parent(current)?;
        }
        Some(current)
    }
}
