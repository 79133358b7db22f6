//! Synthetic tree for exercising the extractor without a real document.

use crate::tree::{NodeKind, TextTree};

struct MockNode {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
    text: Option<String>,
    hidden: bool,
}

pub struct MockTree {
    nodes: Vec<MockNode>,
    body: Option<usize>,
}

impl MockTree {
    pub const DOCUMENT: usize = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![MockNode {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
                text: None,
                hidden: false,
            }],
            body: None,
        }
    }

    fn push(&mut self, parent: usize, kind: NodeKind, text: Option<&str>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(MockNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            text: text.map(str::to_owned),
            hidden: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn add_element(&mut self, parent: usize) -> usize {
        self.push(parent, NodeKind::Element, None)
    }

    pub fn add_text(&mut self, parent: usize, text: &str) -> usize {
        self.push(parent, NodeKind::Text, Some(text))
    }

    pub fn add_comment(&mut self, parent: usize) -> usize {
        self.push(parent, NodeKind::Other, None)
    }

    pub fn hide(&mut self, node: usize) {
        self.nodes[node].hidden = true;
    }

    pub fn set_body(&mut self, node: usize) {
        self.body = Some(node);
    }

    pub fn detach(&mut self, node: usize) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|&child| child != node);
        }
    }

    fn is_hidden(&self, node: usize) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.nodes[id].hidden {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }
}

impl TextTree for MockTree {
    type Node = usize;

    fn document(&self) -> usize {
        Self::DOCUMENT
    }

    fn body(&self) -> Option<usize> {
        self.body
    }

    fn kind(&self, node: usize) -> Option<NodeKind> {
        self.nodes.get(node).map(|entry| entry.kind)
    }

    fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    fn first_child(&self, node: usize) -> Option<usize> {
        self.nodes[node].children.first().copied()
    }

    fn next_sibling(&self, node: usize) -> Option<usize> {
        let siblings = &self.nodes[self.nodes[node].parent?].children;
        let position = siblings.iter().position(|&sibling| sibling == node)?;
        siblings.get(position + 1).copied()
    }

    fn text(&self, node: usize) -> Option<&str> {
        self.nodes[node].text.as_deref()
    }
}

/// Mock oracle: visible unless the element or an ancestor was hidden.
pub fn unless_hidden(tree: &MockTree, element: usize) -> bool {
    !tree.is_hidden(element)
}
