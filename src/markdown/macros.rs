// Vendor macro elements: `ac:structured-macro`, `ac:link`, `ac:adf-extension`.

use super::{all, handlers};
use crate::dom::Element;

const CHILDREN_PLACEHOLDER: &str = "<!-- Children Macro Placeholder -->\n\n";
const DEFAULT_SUMMARY: &str = "Details";

/// Dispatch a structured macro on its `ac:name`.
pub(crate) fn structured_macro(el: &Element) -> String {
    let name = el.attr("ac:name");
    match name {
        "toc" | "table-of-contents" => String::new(),
        "code" => code_block(el),
        "info" | "note" | "tip" | "warning" => {
            format!("> **{}:** {}\n\n", name.to_uppercase(), all(el).trim())
        }
        "panel" => format!("> {}\n\n", all(el).trim()),
        "expand" => {
            let title = parameter(el, "title").unwrap_or_default();
            let title = if title.is_empty() { DEFAULT_SUMMARY } else { title.as_str() };
            details(title, &all(el))
        }
        "children" => CHILDREN_PLACEHOLDER.to_string(),
        "details" => details(DEFAULT_SUMMARY, &all(el)),
        _ => {
            #[cfg(feature = "tracing")]
            tracing::debug!(macro_name = name, "unsupported macro, keeping its content");
            let content = all(el);
            let content = content.trim();
            if content.is_empty() {
                String::new()
            } else {
                format!("{content}\n\n")
            }
        }
    }
}

/// Code comes verbatim from the plain-text body, never converted.
fn code_block(el: &Element) -> String {
    let language = parameter(el, "language").unwrap_or_default();
    let code = el
        .find_descendant(|e| e.is("ac:plain-text-body"))
        .map(Element::text_content)
        .unwrap_or_default();
    handlers::fenced_code(&language, &code)
}

fn details(summary: &str, body: &str) -> String {
    format!(
        "<details>\n<summary>{summary}</summary>\n\n{}\n\n</details>\n\n",
        body.trim()
    )
}

/// Raw value of the first `ac:parameter` named `name`.
fn parameter(el: &Element, name: &str) -> Option<String> {
    el.find_descendant(|e| e.is("ac:parameter") && e.attr("ac:name") == name)
        .map(Element::text_content)
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// `ac:link` renders its link body, or its own children when it has none.
pub(crate) fn link(el: &Element) -> String {
    match el.find_descendant(|e| e.is("ac:link-body")) {
        Some(body) => all(body),
        None => all(el),
    }
}

// ---------------------------------------------------------------------------
// ADF extensions
// ---------------------------------------------------------------------------

pub(crate) fn adf_extension(el: &Element) -> String {
    let decision = adf_node(el, "decision-list").and_then(|list| adf_node(list, "decision-item"));
    if let Some(item) = decision {
        let text = item
            .first_child_named("ac:adf-content")
            .map_or_else(|| item.text_content(), Element::text_content);
        return format!("**Decision:** {}\n\n", text.trim());
    }

    match el.first_child_named("ac:adf-fallback") {
        Some(fallback) => all(fallback),
        None => all(el),
    }
}

fn adf_node<'a>(el: &'a Element, node_type: &str) -> Option<&'a Element> {
    el.children_named("ac:adf-node")
        .find(|node| node.attr("type") == node_type)
}
