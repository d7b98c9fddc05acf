// Storage format → markup tree.
//
// Storage format is an XHTML fragment with vendor-namespaced elements
// (`ac:structured-macro`, `ri:attachment`, ...), CDATA sections and
// self-closing tags. It is parsed with the error-recovering XML5 parser and
// the resulting RcDom is lowered into the owned `dom` types.

use markup5ever::tendril::TendrilSink;
use markup5ever::QualName;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use xml5ever::driver::{parse_document, XmlParseOpts};

use crate::dom::{Attributes, Document, Element, Node};

/// Nesting depth past which subtrees are flattened to their text.
pub(crate) const MAX_DEPTH: usize = 256;

/// Synthetic root wrapped around every fragment. A fragment may have many
/// top-level elements and undeclared vendor prefixes; XML5 wants one root.
const ROOT_OPEN: &str = concat!(
    "<ac:confluence",
    " xmlns:ac=\"http://www.atlassian.com/schema/confluence/4/ac/\"",
    " xmlns:ri=\"http://www.atlassian.com/schema/confluence/4/ri/\"",
    " xmlns:at=\"http://www.atlassian.com/schema/confluence/4/at/\">",
);
const ROOT_CLOSE: &str = "</ac:confluence>";

/// Parse a storage-format string into a markup tree.
///
/// Never fails: malformed markup yields a best-effort tree.
pub fn parse(storage: &str) -> Document {
    let dom = parse_xml(storage);
    let document = dom.document.children.borrow();

    // The synthetic root is the document element; its children are ours.
    let children = match document
        .iter()
        .find(|handle| matches!(handle.data, NodeData::Element { .. }))
    {
        Some(root) => lower_children(root, 0),
        None => Vec::new(),
    };

    Document { children }
}

fn parse_xml(storage: &str) -> RcDom {
    let mut input = String::with_capacity(storage.len() + ROOT_OPEN.len() + ROOT_CLOSE.len());
    input.push_str(ROOT_OPEN);
    input.push_str(strip_xml_declaration(storage));
    input.push_str(ROOT_CLOSE);

    parse_document(RcDom::default(), XmlParseOpts::default())
        .from_utf8()
        .one(input.as_bytes())
}

/// An `<?xml ...?>` declaration is only legal at the very start of a document,
/// which it no longer is once wrapped.
fn strip_xml_declaration(storage: &str) -> &str {
    let trimmed = storage.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    storage
}

fn lower_children(handle: &Handle, depth: usize) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| lower(child, depth))
        .collect()
}

fn lower(handle: &Handle, depth: usize) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            if depth >= MAX_DEPTH {
                return Some(Node::Text(flatten_text(handle)));
            }
            let attrs: Attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (qualified_name(&attr.name), attr.value.to_string()))
                .collect();
            Some(Node::Element(Element {
                name: qualified_name(name),
                attrs,
                children: lower_children(handle, depth + 1),
            }))
        }
        // Comments, processing instructions, doctypes.
        _ => None,
    }
}

/// `prefix:local` when the name carries a prefix, else the local name.
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, name.local),
        _ => name.local.to_string(),
    }
}

/// Text of a subtree, collected without recursion.
fn flatten_text(handle: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if let NodeData::Text { contents } = &node.data {
            text.push_str(&contents.borrow());
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    text
}
