use super::{DomTree, NodeData};
use indextree::NodeId;
use visible_text::{NodeKind, TextTree};

impl TextTree for DomTree {
    type Node = NodeId;

    fn document(&self) -> NodeId {
        self.document
    }

    fn body(&self) -> Option<NodeId> {
        Self::body(self)
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        Some(match self.node_data(node)? {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Other,
        })
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        Self::first_child(self, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_sibling(self, node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match self.node_data(node)? {
            NodeData::Text(text) => Some(text),
            NodeData::Document | NodeData::Element(_) | NodeData::Comment(_) => None,
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        Self::is_attached(self, node)
    }
}
