// Whitespace handling for text runs and finished Markdown.
//
// Text nodes carry the source document's indentation and line wrapping.
// Horizontal whitespace collapses to one space and spaces hugging a newline
// are dropped, but the newlines themselves survive (table cells turn them
// into `<br>`). The finished document gets blank-line runs collapsed.

use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\x0B\x0C]+").expect("valid regex"));
static SPACES_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +\n").expect("valid regex"));
static SPACES_AFTER_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n +").expect("valid regex"));
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static BLANK_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\n|\n\s*$").expect("valid regex"));

/// Normalize a raw text node.
pub(crate) fn normalize_text(raw: &str) -> String {
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(raw, " ");
    let collapsed = SPACES_BEFORE_NEWLINE.replace_all(&collapsed, "\n");
    SPACES_AFTER_NEWLINE.replace_all(&collapsed, "\n").into_owned()
}

/// Collapse every run of three or more newlines to a single blank line.
pub(crate) fn collapse_blank_lines(markdown: &str) -> String {
    BLANK_LINE_RUN.replace_all(markdown, "\n\n").into_owned()
}

/// Drop leading whitespace up to the first line that has content, and
/// trailing whitespace from the first newline after the last content.
/// Indentation of the first line is kept.
pub(crate) fn strip_blank_edges(code: &str) -> String {
    BLANK_EDGES.replace_all(code, "").into_owned()
}
