//! Extraction error types.

use core::fmt;
use thiserror::Error;

/// Why a root handed to the extractor cannot be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRootReason {
    /// The node does not exist in the tree.
    Missing,
    /// The node exists but is not connected to the document.
    Detached,
    /// The node kind cannot have descendants (text, comment, ...).
    NotAContainer,
}

impl fmt::Display for InvalidRootReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Missing => "node is not part of the tree",
            Self::Detached => "node is not attached to the document",
            Self::NotAContainer => "node cannot have descendants",
        })
    }
}

/// Errors surfaced to callers of the extractor.
///
/// Per-element visibility failures are not represented here: they turn into an
/// exclusion of the affected text and extraction carries on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The root is missing, detached, or not a container node.
    #[error("invalid root: {0}")]
    InvalidRoot(InvalidRootReason),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
