//! Host-supplied visibility capability.

use crate::tree::TextTree;
use thiserror::Error;

/// The host could not decide whether an element is rendered.
///
/// The extractor treats this exactly like "not visible".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("visibility could not be evaluated for this element")]
pub struct VisibilityUnavailable;

/// Answers whether an element is currently rendered and perceivable.
///
/// Implementations account for explicit hiding, zero opacity and content that
/// is present but skipped by the renderer. The extractor never looks behind
/// this answer.
pub trait VisibilityOracle<T: TextTree + ?Sized> {
    fn check_visibility(
        &self,
        tree: &T,
        element: T::Node,
    ) -> Result<bool, VisibilityUnavailable>;
}

/// Plain predicates are infallible oracles.
impl<T, F> VisibilityOracle<T> for F
where
    T: TextTree + ?Sized,
    F: Fn(&T, T::Node) -> bool,
{
    fn check_visibility(
        &self,
        tree: &T,
        element: T::Node,
    ) -> Result<bool, VisibilityUnavailable> {
        Ok(self(tree, element))
    }
}
