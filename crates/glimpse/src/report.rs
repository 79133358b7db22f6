use serde::Serialize;

/// JSON record written with `--json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TextReport {
    pub source: String,
    /// `body`, or `#id` when extraction was rooted elsewhere.
    pub root: String,
    pub fragments: usize,
    pub visible_text: String,
}
