use core::fmt;

use super::{DomTree, NodeData};
use indextree::NodeEdge;

fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        formatter.write_str("  ")?;
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(character),
        }
    }
    out
}

fn fmt_line(data: &NodeData, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write_indent(formatter, depth)?;
    match data {
        NodeData::Document => writeln!(formatter, "#document"),
        NodeData::Element(element) => {
            write!(formatter, "<{}", element.tag_name)?;
            for (name, value) in &element.attributes {
                write!(formatter, " {name}=\"{}\"", escape_text(value))?;
            }
            writeln!(formatter, ">")
        }
        // Whitespace is printed escaped so that it stays visible in test output.
        NodeData::Text(text) => writeln!(formatter, "\"{}\"", escape_text(text)),
        NodeData::Comment(text) => writeln!(formatter, "<!--{}-->", escape_text(text)),
    }
}

impl fmt::Debug for DomTree {
    /// One line per node, indented two spaces per level. Walks the arena
    /// iteratively, so arbitrarily deep documents print without recursion.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0_usize;
        for edge in self.document.traverse(&self.arena) {
            match edge {
                NodeEdge::Start(id) => {
                    if let Some(node) = self.arena.get(id) {
                        fmt_line(node.get(), formatter, depth)?;
                    }
                    depth += 1;
                }
                NodeEdge::End(_) => depth = depth.saturating_sub(1),
            }
        }
        Ok(())
    }
}
