//! Visible text extraction over a read-only document tree.
//!
//! The extractor walks the text-bearing leaves under a root in document order,
//! keeps the ones whose nearest element ancestor the host reports as visible,
//! trims each survivor and joins them with a single space.
//!
//! Nothing here knows how a tree is stored or how visibility is computed. A host
//! plugs in its document through [`TextTree`] and its rendering knowledge
//! through [`VisibilityOracle`].

mod error;
mod extract;
mod leaves;
mod tree;
mod visibility;

pub use error::{ExtractError, ExtractResult, InvalidRootReason};
pub use extract::{
    FRAGMENT_SEPARATOR, VisibleTextExtractor, extract_document_text, extract_visible_text,
};
pub use leaves::TextLeaves;
pub use tree::{NodeKind, TextTree};
pub use visibility::{VisibilityOracle, VisibilityUnavailable};

#[cfg(test)]
mod test_support;
