//! Element visibility from inline styles, the way `Element.checkVisibility()` answers it.
//! Spec: <https://drafts.csswg.org/cssom-view/#dom-element-checkvisibility>
//!
//! Only what can be decided without a cascade is considered: `style="..."`
//! attributes, the `hidden` attribute, closed `<details>`, and the elements
//! the user agent stylesheet never renders.

#![forbid(unsafe_code)]

mod oracle;
mod style_attr;

pub use oracle::{StyleVisibility, VisibilityOptions};
pub use style_attr::{Declaration, parse_style_attribute, parse_style_attribute_into_map};
