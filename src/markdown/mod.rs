// Markup tree → Markdown.
//
// A recursive walker: text nodes are whitespace-normalized, elements are
// dispatched on their lower-cased tag name to a handler that returns a
// Markdown fragment. Fragments concatenate in document order. Unknown tags
// render their children, so no markup is ever rejected.

pub(crate) mod handlers;
pub(crate) mod macros;
pub(crate) mod table;
pub(crate) mod whitespace;

use handlers::ListKind;

use crate::dom::{Document, Element, Node};

/// Convert a whole document and collapse blank-line runs.
pub(crate) fn document(doc: &Document) -> String {
    let markdown: String = doc
        .children
        .iter()
        .filter(|node| !matches!(node, Node::Text(text) if text.trim().is_empty()))
        .map(one)
        .collect();
    whitespace::collapse_blank_lines(&markdown)
}

/// Convert the children of an element, concatenated.
pub(crate) fn all(el: &Element) -> String {
    el.children.iter().map(one).collect()
}

/// Convert a single node.
pub(crate) fn one(node: &Node) -> String {
    match node {
        Node::Text(text) => whitespace::normalize_text(text),
        Node::Element(el) => element(el),
    }
}

/// Route an element to its handler based on tag name.
fn element(el: &Element) -> String {
    let tag = el.name.to_ascii_lowercase();
    match tag.as_str() {
        "h1" => handlers::heading(el, 1),
        "h2" => handlers::heading(el, 2),
        "h3" => handlers::heading(el, 3),
        "p" => handlers::paragraph(el),
        "a" => handlers::link(el),
        "code" => handlers::inline_code(el),
        "strong" | "b" => handlers::strong(el),
        "em" | "i" => handlers::emphasis(el),
        "ul" => handlers::list(el, ListKind::Bullet),
        "ol" => handlers::list(el, ListKind::Ordered),
        "li" => handlers::list_item(el, "*"),
        "br" => handlers::line_break(el),
        "hr" => handlers::thematic_break(el),
        "blockquote" => handlers::blockquote(el),
        "img" => handlers::image(el),
        "table" => table::table(el),

        // Vendor elements
        "ac:structured-macro" => macros::structured_macro(el),
        "ac:link" => macros::link(el),
        "ac:adf-extension" => macros::adf_extension(el),

        // Pass-through: children only, no markup of their own. Underline has
        // no Markdown form; inline comments lose their comment.
        "u" | "div" | "span" | "tr" | "th" | "td" | "thead" | "tbody" | "tfoot"
        | "ac:inline-comment-marker" | "ac:parameter" | "ac:plain-text-body"
        | "ac:rich-text-body" | "ac:link-body" | "ri:page" | "ri:attachment" => all(el),

        // Unknown elements (h4-h6, pre, ac:image, ...): recurse into children
        _ => all(el),
    }
}
