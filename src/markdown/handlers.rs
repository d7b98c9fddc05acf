// Element handlers: one function per element (or element group).
//
// Each handler takes an element and returns its Markdown fragment, calling
// back into the walker (`all`) for child content.

use std::borrow::Cow;

use super::{all, whitespace};
use crate::dom::Element;

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

pub(crate) fn heading(el: &Element, depth: usize) -> String {
    format!("{} {}\n\n", "#".repeat(depth), all(el).trim())
}

/// Paragraphs with no content emit nothing.
pub(crate) fn paragraph(el: &Element) -> String {
    let content = all(el);
    let content = content.trim();
    if content.is_empty() {
        String::new()
    } else {
        format!("{content}\n\n")
    }
}

pub(crate) fn blockquote(el: &Element) -> String {
    format!("> {}\n\n", all(el).replace('\n', "\n> "))
}

/// Fenced block around `code`, blank edge lines stripped.
pub(crate) fn fenced_code(language: &str, code: &str) -> String {
    format!(
        "```{language}\n{}\n```\n\n",
        whitespace::strip_blank_edges(code)
    )
}

// Void elements: children only appear when markup was malformed. XML5 nests
// every following sibling under an unclosed `<br>`, `<hr>` or `<img>`, so the
// marker is followed by those children instead of dropping them.

pub(crate) fn line_break(el: &Element) -> String {
    format!("  \n{}", all(el))
}

pub(crate) fn thematic_break(el: &Element) -> String {
    format!("--- \n\n{}", all(el))
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Bullet,
    Ordered,
}

/// Only direct `li` children become items; the list ends with a blank line.
pub(crate) fn list(el: &Element, kind: ListKind) -> String {
    let items: String = el
        .children_named("li")
        .enumerate()
        .map(|(index, li)| match kind {
            ListKind::Bullet => list_item(li, "*"),
            ListKind::Ordered => list_item(li, &format!("{}.", index + 1)),
        })
        .collect();
    items + "\n"
}

pub(crate) fn list_item(el: &Element, marker: &str) -> String {
    format!("{marker} {}\n", all(el).trim())
}

// ---------------------------------------------------------------------------
// Phrasing
// ---------------------------------------------------------------------------

pub(crate) fn strong(el: &Element) -> String {
    format!("**{}**", all(el))
}

pub(crate) fn emphasis(el: &Element) -> String {
    format!("*{}*", all(el))
}

/// Inline code is literal: the raw text, never converted.
pub(crate) fn inline_code(el: &Element) -> String {
    format!("`{}`", el.text_content())
}

/// Link text falls back to the href when the children render to nothing.
pub(crate) fn link(el: &Element) -> String {
    let href = el.attr("href");
    let text = all(el);
    let text = match text.trim() {
        "" => href,
        trimmed => trimmed,
    };
    format!("[{text}]({href})")
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Alt text: `alt`, then the attachment alias, then the file name in `src`.
/// Children only exist after an unclosed `<img>` and follow the image.
pub(crate) fn image(el: &Element) -> String {
    let src = el.attr("src");
    let alt = first_non_empty(&[el.attr("alt"), el.attr("data-linked-resource-default-alias")])
        .map_or_else(|| file_name_from_url(src), Cow::Borrowed);
    format!("![{alt}]({src}){}", all(el))
}

/// Last path segment of `url`, query string removed, percent-decoded.
/// Undecodable names are returned as they appear.
pub(crate) fn file_name_from_url(url: &str) -> Cow<'_, str> {
    let segment = url.rsplit('/').next().unwrap_or_default();
    let name = segment.split('?').next().unwrap_or_default();
    urlencoding::decode(name).unwrap_or(Cow::Borrowed(name))
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|value| !value.is_empty())
}
