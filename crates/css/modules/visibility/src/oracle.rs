//! `checkVisibility()` over inline styles.

use crate::style_attr::parse_style_attribute_into_map;
use html::{DomTree, ElementData, NodeId};
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use visible_text::{VisibilityOracle, VisibilityUnavailable};

/// Elements the UA stylesheet gives `display: none`.
///
/// Spec: <https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements>
const UA_HIDDEN_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
    "noscript", "param", "rp", "script", "style", "template", "title",
];

/// Which optional checks of `checkVisibility()` are enabled.
///
/// The defaults turn everything on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityOptions {
    /// Treat `opacity: 0` on the element or an ancestor as invisible.
    pub opacity_property: bool,
    /// Treat a computed `visibility` other than `visible` as invisible.
    pub visibility_property: bool,
    /// Treat content under a `content-visibility: auto` ancestor as skipped.
    pub content_visibility_auto: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            opacity_property: true,
            visibility_property: true,
            content_visibility_auto: true,
        }
    }
}

type Declarations = Rc<HashMap<String, String>>;

/// Visibility oracle for [`DomTree`] driven by inline styles.
///
/// Parsed `style` attributes are cached by their source text, so elements
/// sharing a style (and every leaf under the same ancestors) parse it once.
/// Keying on the text keeps the cache valid when attributes change.
#[derive(Debug, Clone, Default)]
pub struct StyleVisibility {
    options: VisibilityOptions,
    parsed: RefCell<HashMap<String, Declarations>>,
}

/// The few properties of one element that decide visibility.
struct InlineStyle {
    declarations: Option<Declarations>,
}

impl InlineStyle {
    fn keyword(&self, property: &str) -> Option<&str> {
        self.declarations
            .as_ref()?
            .get(property)
            .map(String::as_str)
    }

    fn is_keyword(&self, property: &str, keyword: &str) -> bool {
        self.keyword(property)
            .is_some_and(|value| value.eq_ignore_ascii_case(keyword))
    }

    /// `display: none`, from the style attribute, `hidden`, or the UA stylesheet.
    fn generates_no_box(&self, element: &ElementData) -> bool {
        if let Some(display) = self.keyword("display") {
            return display.eq_ignore_ascii_case("none");
        }
        let hidden = element
            .attribute("hidden")
            .is_some_and(|value| !value.eq_ignore_ascii_case("until-found"));
        hidden || UA_HIDDEN_ELEMENTS.iter().any(|tag| element.is(tag))
    }

    /// `display: contents`: the element has no box of its own, its children do.
    fn is_display_contents(&self) -> bool {
        self.is_keyword("display", "contents")
    }

    /// `content-visibility: hidden`, including `hidden="until-found"`.
    fn skips_contents(&self, element: &ElementData) -> bool {
        match self.keyword("content-visibility") {
            Some(value) => value.eq_ignore_ascii_case("hidden"),
            None => element
                .attribute("hidden")
                .is_some_and(|value| value.eq_ignore_ascii_case("until-found")),
        }
    }

    fn is_transparent(&self) -> bool {
        self.keyword("opacity")
            .and_then(parse_opacity)
            .is_some_and(|opacity| opacity <= 0.0)
    }

    /// `Some(true)` for `visible`, `Some(false)` for `hidden`/`collapse`,
    /// `None` when the value is inherited.
    fn visibility(&self) -> Option<bool> {
        let value = self.keyword("visibility")?;
        if value.eq_ignore_ascii_case("visible") {
            Some(true)
        } else if value.eq_ignore_ascii_case("hidden") || value.eq_ignore_ascii_case("collapse") {
            Some(false)
        } else {
            None
        }
    }
}

/// `<number>` or `<percentage>`; anything else is ignored.
fn parse_opacity(value: &str) -> Option<f64> {
    match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok().map(|pct| pct / 100.0),
        None => value.parse::<f64>().ok(),
    }
}

/// A closed `<details>` only renders its first `<summary>` child.
fn hidden_by_details(
    tree: &DomTree,
    details: &ElementData,
    details_id: NodeId,
    child: NodeId,
) -> bool {
    if !details.is("details") || details.has_attribute("open") {
        return false;
    }
    let summary = tree.children(details_id).find(|&node| {
        tree.element(node).is_some_and(|element| element.is("summary"))
    });
    summary != Some(child)
}

impl StyleVisibility {
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            parsed: RefCell::default(),
        }
    }

    pub const fn options(&self) -> VisibilityOptions {
        self.options
    }

    fn inline_style(&self, element: &ElementData) -> InlineStyle {
        let Some(text) = element.attribute("style") else {
            return InlineStyle { declarations: None };
        };
        let mut parsed = self.parsed.borrow_mut();
        let declarations = match parsed.get(text) {
            Some(declarations) => Rc::clone(declarations),
            None => {
                let declarations = Rc::new(parse_style_attribute_into_map(text));
                parsed.insert(text.to_owned(), Rc::clone(&declarations));
                declarations
            }
        };
        InlineStyle {
            declarations: Some(declarations),
        }
    }

    /// Whether `element` is rendered and perceivable.
    ///
    /// Detached elements have no box and are reported invisible.
    ///
    /// # Errors
    /// [`VisibilityUnavailable`] when `element` is not an element of `tree`.
    pub fn check(&self, tree: &DomTree, element: NodeId) -> Result<bool, VisibilityUnavailable> {
        if tree.element(element).is_none() {
            trace!("checkVisibility on non-element {element:?}");
            return Err(VisibilityUnavailable);
        }
        if !tree.is_attached(element) {
            return Ok(false);
        }

        let mut visibility = None;
        let mut previous: Option<NodeId> = None;
        let mut current = Some(element);
        while let Some(node) = current {
            if let Some(data) = tree.element(node) {
                let style = self.inline_style(data);
                if style.generates_no_box(data) {
                    return Ok(false);
                }
                if previous.is_none() && style.is_display_contents() {
                    return Ok(false);
                }
                if let Some(child) = previous {
                    if style.skips_contents(data) || hidden_by_details(tree, data, node, child) {
                        return Ok(false);
                    }
                    if self.options.content_visibility_auto
                        && style.is_keyword("content-visibility", "auto")
                    {
                        return Ok(false);
                    }
                }
                if self.options.opacity_property && style.is_transparent() {
                    return Ok(false);
                }
                if visibility.is_none() {
                    visibility = style.visibility();
                }
            }
            previous = Some(node);
            current = tree.parent(node);
        }

        Ok(!self.options.visibility_property || visibility.unwrap_or(true))
    }
}

impl VisibilityOracle<DomTree> for StyleVisibility {
    fn check_visibility(
        &self,
        tree: &DomTree,
        element: NodeId,
    ) -> Result<bool, VisibilityUnavailable> {
        self.check(tree, element)
    }
}
