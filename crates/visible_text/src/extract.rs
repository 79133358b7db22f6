//! Filtering, trimming and joining of text leaves.

use crate::error::{ExtractError, ExtractResult, InvalidRootReason};
use crate::leaves::TextLeaves;
use crate::tree::{NodeKind, TextTree};
use crate::visibility::VisibilityOracle;

/// Placed between consecutive fragments in the joined output.
pub const FRAGMENT_SEPARATOR: char = ' ';

/// Whitespace as ECMAScript `String.prototype.trim` sees it: Unicode
/// `White_Space` minus NEL (U+0085), plus ZERO WIDTH NO-BREAK SPACE (U+FEFF).
fn is_trimmed_whitespace(character: char) -> bool {
    match character {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        _ => character.is_whitespace(),
    }
}

fn trim_fragment(text: &str) -> &str {
    text.trim_matches(is_trimmed_whitespace)
}

/// Extracts the human-visible text under a root of a [`TextTree`].
///
/// The extractor only borrows the tree, so the tree cannot change underneath
/// an extraction.
pub struct VisibleTextExtractor<'tree, T: TextTree + ?Sized, V> {
    tree: &'tree T,
    oracle: V,
}

impl<'tree, T, V> VisibleTextExtractor<'tree, T, V>
where
    T: TextTree + ?Sized,
    V: VisibilityOracle<T>,
{
    pub const fn new(tree: &'tree T, oracle: V) -> Self {
        Self { tree, oracle }
    }

    /// Visible text under `root`, fragments joined by a single space.
    ///
    /// Returns an empty string when nothing qualifies.
    ///
    /// # Errors
    /// [`ExtractError::InvalidRoot`] when `root` is missing, detached from the
    /// document, or not a document/element node.
    pub fn extract(&self, root: T::Node) -> ExtractResult<String> {
        let mut text = String::new();
        for fragment in self.visible_fragments(root)? {
            if !text.is_empty() {
                text.push(FRAGMENT_SEPARATOR);
            }
            text.push_str(fragment);
        }
        Ok(text)
    }

    /// Visible text of the document body.
    ///
    /// # Errors
    /// [`ExtractError::InvalidRoot`] when the document has no body.
    pub fn extract_document(&self) -> ExtractResult<String> {
        let body = self
            .tree
            .body()
            .ok_or(ExtractError::InvalidRoot(InvalidRootReason::Missing))?;
        self.extract(body)
    }

    /// The trimmed fragments [`Self::extract`] would join, in document order.
    ///
    /// # Errors
    /// Same as [`Self::extract`].
    pub fn fragments(&self, root: T::Node) -> ExtractResult<Vec<&'tree str>> {
        Ok(self.visible_fragments(root)?.collect())
    }

    /// Lazily filtered fragments under `root`.
    ///
    /// The root is validated up front; after that, leaves are produced in
    /// document order, dropped when their nearest element is not visible, then
    /// trimmed and dropped when nothing is left.
    ///
    /// # Errors
    /// Same as [`Self::extract`].
    pub fn visible_fragments(
        &self,
        root: T::Node,
    ) -> ExtractResult<impl Iterator<Item = &'tree str>> {
        self.validate_root(root)?;
        let tree = self.tree;
        Ok(TextLeaves::new(tree, root)
            .filter(move |&leaf| self.is_rendered(leaf))
            .filter_map(move |leaf| tree.text(leaf))
            .map(trim_fragment)
            .filter(|fragment| !fragment.is_empty()))
    }

    fn validate_root(&self, root: T::Node) -> ExtractResult<()> {
        let reason = match self.tree.kind(root) {
            None => InvalidRootReason::Missing,
            Some(NodeKind::Text | NodeKind::Other) => InvalidRootReason::NotAContainer,
            Some(NodeKind::Document | NodeKind::Element) => {
                if self.tree.is_attached(root) {
                    return Ok(());
                }
                InvalidRootReason::Detached
            }
        };
        Err(ExtractError::InvalidRoot(reason))
    }

    /// A leaf is rendered when its nearest element is reported visible.
    /// No element ancestor, or no answer from the oracle, means hidden.
    fn is_rendered(&self, leaf: T::Node) -> bool {
        self.tree.parent_element(leaf).is_some_and(|element| {
            matches!(self.oracle.check_visibility(self.tree, element), Ok(true))
        })
    }
}

/// One-shot form of [`VisibleTextExtractor::extract`].
///
/// # Errors
/// See [`VisibleTextExtractor::extract`].
pub fn extract_visible_text<T, V>(tree: &T, oracle: V, root: T::Node) -> ExtractResult<String>
where
    T: TextTree + ?Sized,
    V: VisibilityOracle<T>,
{
    VisibleTextExtractor::new(tree, oracle).extract(root)
}

/// One-shot form of [`VisibleTextExtractor::extract_document`].
///
/// # Errors
/// See [`VisibleTextExtractor::extract_document`].
pub fn extract_document_text<T, V>(tree: &T, oracle: V) -> ExtractResult<String>
where
    T: TextTree + ?Sized,
    V: VisibilityOracle<T>,
{
    VisibleTextExtractor::new(tree, oracle).extract_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTree, unless_hidden};
    use crate::visibility::VisibilityUnavailable;

    #[test]
    fn joins_fragments_with_single_space() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "Hello");
        tree.add_text(body, "World");

        let text = extract_visible_text(&tree, unless_hidden, body).expect("valid root");
        assert_eq!(text, "Hello World");
    }

    #[test]
    fn trims_ends_but_keeps_interior_spacing() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "  hello  ");
        tree.add_text(body, "\tspaced   out\n");

        let text = extract_visible_text(&tree, unless_hidden, body).expect("valid root");
        assert_eq!(text, "hello spaced   out");
    }

    #[test]
    fn trims_the_same_characters_as_script_trim() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "a");
        tree.add_text(body, "\u{FEFF}");
        tree.add_text(body, "\u{FEFF}\u{3000}b\u{2028}");
        tree.add_text(body, "x\u{85}");

        let extractor = VisibleTextExtractor::new(&tree, unless_hidden);
        assert_eq!(extractor.fragments(body), Ok(vec!["a", "b", "x\u{85}"]));
    }

    #[test]
    fn whitespace_only_text_contributes_nothing() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "one");
        tree.add_text(body, " \n\t ");
        tree.add_text(body, "two");

        let extractor = VisibleTextExtractor::new(&tree, unless_hidden);
        assert_eq!(extractor.fragments(body), Ok(vec!["one", "two"]));
    }

    #[test]
    fn hidden_ancestor_removes_only_its_text() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "before");
        let aside = tree.add_element(body);
        let inner = tree.add_element(aside);
        tree.add_text(inner, "aside");
        tree.add_text(body, "after");

        let visible = extract_visible_text(&tree, unless_hidden, body).expect("valid root");
        assert_eq!(visible, "before aside after");

        tree.hide(aside);
        let hidden = extract_visible_text(&tree, unless_hidden, body).expect("valid root");
        assert_eq!(hidden, "before after");
    }

    #[test]
    fn only_the_nearest_element_is_consulted() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        let outer = tree.add_element(body);
        let inner = tree.add_element(outer);
        tree.add_text(inner, "inner");
        tree.add_text(outer, "outer");

        let asked_inner_only = |_: &MockTree, element: usize| element == inner;
        let text = extract_visible_text(&tree, asked_inner_only, body).expect("valid root");
        assert_eq!(text, "inner");
    }

    #[test]
    fn repeated_text_is_kept_each_time() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        for _ in 0..3 {
            let item = tree.add_element(body);
            tree.add_text(item, "again");
        }

        let text = extract_visible_text(&tree, unless_hidden, body).expect("valid root");
        assert_eq!(text, "again again again");
    }

    #[test]
    fn empty_document_is_not_an_error() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "   ");
        let hidden = tree.add_element(body);
        tree.add_text(hidden, "secret");
        tree.hide(hidden);

        assert_eq!(
            extract_visible_text(&tree, unless_hidden, body),
            Ok(String::new())
        );
    }

    #[test]
    fn unavailable_visibility_excludes_without_failing() {
        struct Flaky {
            broken: usize,
        }

        impl VisibilityOracle<MockTree> for Flaky {
            fn check_visibility(
                &self,
                _tree: &MockTree,
                element: usize,
            ) -> Result<bool, VisibilityUnavailable> {
                if element == self.broken {
                    Err(VisibilityUnavailable)
                } else {
                    Ok(true)
                }
            }
        }

        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "kept");
        let broken = tree.add_element(body);
        tree.add_text(broken, "lost");
        tree.add_text(body, "also kept");

        let text = extract_visible_text(&tree, Flaky { broken }, body).expect("valid root");
        assert_eq!(text, "kept also kept");
    }

    #[test]
    fn text_without_element_ancestor_is_excluded() {
        let mut tree = MockTree::new();
        tree.add_text(MockTree::DOCUMENT, "orphan");
        let body = tree.add_element(MockTree::DOCUMENT);
        tree.add_text(body, "owned");

        let text =
            extract_visible_text(&tree, unless_hidden, MockTree::DOCUMENT).expect("valid root");
        assert_eq!(text, "owned");
    }

    #[test]
    fn invalid_roots_are_reported() {
        let mut tree = MockTree::new();
        let body = tree.add_element(MockTree::DOCUMENT);
        let leaf = tree.add_text(body, "leaf");
        let loose = tree.add_element(body);
        tree.add_text(loose, "loose");
        tree.detach(loose);

        assert_eq!(
            extract_visible_text(&tree, unless_hidden, 999),
            Err(ExtractError::InvalidRoot(InvalidRootReason::Missing))
        );
        assert_eq!(
            extract_visible_text(&tree, unless_hidden, loose),
            Err(ExtractError::InvalidRoot(InvalidRootReason::Detached))
        );
        assert_eq!(
            extract_visible_text(&tree, unless_hidden, leaf),
            Err(ExtractError::InvalidRoot(InvalidRootReason::NotAContainer))
        );
    }

    #[test]
    fn document_wrapper_uses_the_body() {
        let mut tree = MockTree::new();
        let html = tree.add_element(MockTree::DOCUMENT);
        let head = tree.add_element(html);
        tree.add_text(head, "title");
        let body = tree.add_element(html);
        tree.add_text(body, "content");
        tree.set_body(body);

        assert_eq!(
            extract_document_text(&tree, unless_hidden),
            Ok(String::from("content"))
        );
    }

    #[test]
    fn document_wrapper_without_body_is_invalid() {
        let tree = MockTree::new();

        assert_eq!(
            extract_document_text(&tree, unless_hidden),
            Err(ExtractError::InvalidRoot(InvalidRootReason::Missing))
        );
    }
}
