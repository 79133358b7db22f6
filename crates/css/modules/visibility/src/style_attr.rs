//! CSS Style Attributes — style="..." attribute processing.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

use std::collections::HashMap;

/// A single CSS declaration parsed from a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase.
    pub property: String,
    /// Value trimmed of surrounding ASCII whitespace, `!important` removed.
    pub value: String,
    pub important: bool,
}

/// Parse the value of a `style` attribute into a list of declarations.
///
/// Splits on `;`, then on the first `:`. Items without a colon, with an empty
/// property or with an empty value are skipped. No tokenization: a `;` inside
/// a string or `url(...)` splits the item.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out = Vec::new();
    for raw_item in input.split(';') {
        let Some((raw_prop, raw_value)) = raw_item.split_once(':') else {
            continue;
        };
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let (value_text, important) =
            strip_important(raw_value.trim_matches(is_ascii_whitespace));
        if property_text.is_empty() || value_text.is_empty() {
            continue;
        }
        out.push(Declaration {
            property: property_text.to_ascii_lowercase(),
            value: value_text.to_owned(),
            important,
        });
    }
    out
}

/// Parse into a map keyed by property name.
///
/// Later declarations win, except that a normal declaration never overrides
/// an `!important` one.
pub fn parse_style_attribute_into_map(input: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, (String, bool)> = HashMap::new();
    for decl in parse_style_attribute(input) {
        let keeps_earlier = map
            .get(&decl.property)
            .is_some_and(|(_, important)| *important && !decl.important);
        if !keeps_earlier {
            map.insert(decl.property, (decl.value, decl.important));
        }
    }
    map.into_iter()
        .map(|(property, (value, _))| (property, value))
        .collect()
}

/// Split a trailing `!important` off a value.
fn strip_important(value: &str) -> (&str, bool) {
    if let Some((head, tail)) = value.rsplit_once('!') {
        if tail.trim_matches(is_ascii_whitespace).eq_ignore_ascii_case("important") {
            return (head.trim_end_matches(is_ascii_whitespace), true);
        }
    }
    (value, false)
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}
