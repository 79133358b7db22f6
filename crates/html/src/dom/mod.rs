//! Arena-backed document tree.

mod printing;
mod text_tree;

use anyhow::{Error, anyhow};
use indextree::{Arena, NodeId};
use smallvec::SmallVec;

/// Data stored for each DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data for an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// ASCII-lowercase local name.
    pub tag_name: String,
    /// Attributes in source order; names are ASCII-lowercase.
    pub attributes: SmallVec<[(String, String); 4]>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: SmallVec::new(),
        }
    }

    /// Value of the attribute `name`, matched ASCII case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set or replace an attribute, keeping its original position on replace.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value.to_owned();
        } else {
            self.attributes.push((name, value.to_owned()));
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }
}

/// A document: a document node plus everything created in this arena.
///
/// Nodes are never freed. A detached subtree keeps its ids and can still be
/// inspected, it just no longer hangs off the document node.
pub struct DomTree {
    arena: Arena<NodeData>,
    document: NodeId,
}

impl DomTree {
    /// Create a tree holding only a document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData::Document);
        Self { arena, document }
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Number of nodes ever created, detached ones included.
    pub fn node_count(&self) -> usize {
        self.arena.count()
    }

    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.arena
            .new_node(NodeData::Element(ElementData::new(tag_name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Text(text.to_owned()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Comment(text.to_owned()))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if either node is unknown, or if the append would make
    /// a node its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if self.node_data(parent).is_none() || self.node_data(child).is_none() {
            return Err(anyhow!("append_child called with a node outside this tree"));
        }
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|err| anyhow!("cannot append {child:?} to {parent:?}: {err}"))
    }

    /// Detach `node` (with its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if self.node_data(node).is_some() {
            node.detach(&mut self.arena);
        }
    }

    /// Get data for a node.
    pub fn node_data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(indextree::Node::get)
    }

    fn node_data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(indextree::Node::get_mut)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.node_data(node)? {
            NodeData::Element(element) => Some(element),
            NodeData::Document | NodeData::Text(_) | NodeData::Comment(_) => None,
        }
    }

    /// Set an attribute on an element.
    ///
    /// # Errors
    /// Returns an error if `node` is not an element of this tree.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), Error> {
        match self.node_data_mut(node) {
            Some(NodeData::Element(element)) => {
                element.set_attribute(name, value);
                Ok(())
            }
            _ => Err(anyhow!("{node:?} is not an element")),
        }
    }

    /// Remove an attribute from an element.
    ///
    /// # Errors
    /// Returns an error if `node` is not an element of this tree.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), Error> {
        match self.node_data_mut(node) {
            Some(NodeData::Element(element)) => {
                element.remove_attribute(name);
                Ok(())
            }
            _ => Err(anyhow!("{node:?} is not an element")),
        }
    }

    /// Replace the character data of a text or comment node.
    ///
    /// # Errors
    /// Returns an error if `node` carries no character data.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), Error> {
        match self.node_data_mut(node) {
            Some(NodeData::Text(data) | NodeData::Comment(data)) => {
                text.clone_into(data);
                Ok(())
            }
            _ => Err(anyhow!("{node:?} holds no character data")),
        }
    }

    /// Get parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.first_child()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.next_sibling()
    }

    /// Children of a node in document order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Whether `node` hangs (transitively) off the document node.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.node_data(node).is_some()
            && node
                .ancestors(&self.arena)
                .last()
                .is_some_and(|top| top == self.document)
    }

    /// The `<html>` element, if the document has one.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.document)
            .find(|&child| self.element(child).is_some())
    }

    /// The first `<body>` (or `<frameset>`) child of the document element.
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        if !self.element(html)?.is("html") {
            return None;
        }
        self.children(html).find(|&child| {
            self.element(child)
                .is_some_and(|element| element.is("body") || element.is("frameset"))
        })
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document.descendants(&self.arena).find(|&node| {
            self.element(node)
                .is_some_and(|element| element.attribute("id") == Some(id))
        })
    }

    /// Raw concatenation of all text under `node`, hidden or not.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for descendant in node.descendants(&self.arena) {
            if let Some(NodeData::Text(text)) = self.node_data(descendant) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
