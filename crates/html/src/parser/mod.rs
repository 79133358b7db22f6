//! HTML5 loading using html5ever.
//!
//! The document is parsed into an `RcDom` and then copied into a [`DomTree`].
//! Whitespace-only text is kept so that the tree matches what a browser builds.

use crate::dom::DomTree;
use anyhow::{Context as _, Error};
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse a complete HTML document.
///
/// # Errors
/// Returns an error if the parser fails to read the input or if the parsed
/// tree cannot be copied into the arena.
pub fn parse_html(html: &str) -> Result<DomTree, Error> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .context("failed to parse HTML")?;

    let mut tree = DomTree::new();
    let document = tree.document();
    convert_children(&mut tree, &dom.document, document)?;
    debug!(
        "Parsed {} bytes of HTML into {} nodes",
        html.len(),
        tree.node_count()
    );
    Ok(tree)
}

/// Copy the children of `source` (an rcdom node) under `target`.
///
/// Uses an explicit work list so deeply nested markup cannot exhaust the stack.
fn convert_children(tree: &mut DomTree, source: &Handle, target: NodeId) -> Result<(), Error> {
    let mut pending: Vec<(Handle, NodeId)> = source
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (Handle::clone(child), target))
        .collect();

    while let Some((handle, parent)) = pending.pop() {
        let Some(node) = convert_node(tree, &handle)? else {
            continue;
        };
        tree.append_child(parent, node)?;
        pending.extend(
            handle
                .children
                .borrow()
                .iter()
                .rev()
                .map(|child| (Handle::clone(child), node)),
        );
    }
    Ok(())
}

/// Create the arena counterpart of a single rcdom node, if it has one.
fn convert_node(tree: &mut DomTree, handle: &Handle) -> Result<Option<NodeId>, Error> {
    let node = match &handle.data {
        RcNodeData::Element { name, attrs, .. } => {
            let node = tree.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                tree.set_attribute(node, &attr.name.local, &attr.value)?;
            }
            node
        }
        RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
        RcNodeData::Comment { contents } => tree.create_comment(contents),
        // The document itself is already the arena root.
        RcNodeData::Document
        | RcNodeData::Doctype { .. }
        | RcNodeData::ProcessingInstruction { .. } => return Ok(None),
    };
    Ok(Some(node))
}
