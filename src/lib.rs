// confluence2markdown: Confluence storage format to Markdown.
//
// Architecture:
//   storage string → XML5 parse → markup tree (dom) → recursive walker → Markdown
//
// The walker is a pure function of the tree: every element kind has one
// emission rule, unknown elements and macros fall back to their content, and
// nothing in the input is ever rejected. `batch` wires the converter to page
// exports and an output directory.

pub mod batch;
pub mod dom;
mod error;
mod markdown;
mod parse;

pub use batch::{
    convert_pages, output_file_name, read_pages, BatchReport, DirectorySink, Page, PageFailure,
    PageSink,
};
pub use dom::{Attributes, Document, Element, Node};
pub use error::ConvertError;
pub use parse::parse;

/// Convert a storage-format string to Markdown.
///
/// # Examples
///
/// ```
/// let md = confluence2markdown::convert("<h1>Hello</h1><p>World</p>");
/// assert_eq!(md, "# Hello\n\nWorld\n\n");
/// ```
pub fn convert(storage: &str) -> String {
    document_to_markdown(&parse(storage))
}

/// Convert an already parsed document.
///
/// Runs of three or more newlines in the result are collapsed to one blank line.
pub fn document_to_markdown(document: &Document) -> String {
    markdown::document(document)
}

/// Convert a single node and its subtree. `None` converts to `""`.
///
/// No blank-line collapsing is applied; the fragment is exactly what the
/// node's rule emits.
///
/// # Examples
///
/// ```
/// use confluence2markdown::{node_to_markdown, Element, Node};
///
/// let link = Node::from(Element::new("a").with_attr("href", "https://example.com"));
/// assert_eq!(node_to_markdown(Some(&link)), "[https://example.com](https://example.com)");
/// assert_eq!(node_to_markdown(None), "");
/// ```
pub fn node_to_markdown(node: Option<&Node>) -> String {
    node.map(markdown::one).unwrap_or_default()
}
