// Table assembly.
//
// Rows are collected in full before anything is emitted: header-section rows
// first, then body rows. Without a header section the first body row is
// promoted to the header. Footer sections are not rows of either kind.

use super::all;
use crate::dom::Element;

/// One source row: rendered cells plus whether any cell was a `th`.
#[derive(Debug, Default)]
struct TableRow {
    cells: Vec<String>,
    is_header: bool,
}

impl TableRow {
    fn to_markdown(&self) -> String {
        format!("| {} |", self.cells.join(" | "))
    }
}

pub(crate) fn table(el: &Element) -> String {
    let head = collect_rows(el.children_named("thead").flat_map(|section| section.children_named("tr")));
    let body = collect_rows(el.child_elements().flat_map(body_rows));

    let mut lines = Vec::with_capacity(head.len() + body.len() + 1);
    let mut body = body.into_iter();

    if let Some((first, rest)) = head.split_first() {
        let column_count = head.iter().map(|row| row.cells.len()).max().unwrap_or_default();
        lines.push(first.to_markdown());
        lines.push(separator(column_count));
        lines.extend(rest.iter().map(TableRow::to_markdown));
    } else if let Some(first) = body.next() {
        if !first.is_header {
            #[cfg(feature = "tracing")]
            tracing::debug!(cells = first.cells.len(), "promoting first table row to header");
        }
        lines.push(first.to_markdown());
        lines.push(separator(first.cells.len()));
    }

    lines.extend(body.map(|row| row.to_markdown()));

    lines.join("\n") + "\n\n"
}

/// Rows of a `tbody` section, or the element itself when it is a bare `tr`.
fn body_rows(child: &Element) -> Vec<&Element> {
    if child.is("tbody") {
        child.children_named("tr").collect()
    } else if child.is("tr") {
        vec![child]
    } else {
        Vec::new()
    }
}

/// Convert rows, dropping the ones without cells.
fn collect_rows<'a>(rows: impl Iterator<Item = &'a Element>) -> Vec<TableRow> {
    rows.map(row).filter(|row| !row.cells.is_empty()).collect()
}

fn row(tr: &Element) -> TableRow {
    tr.child_elements()
        .filter(|cell| cell.is("th") || cell.is("td"))
        .fold(TableRow::default(), |mut row, cell| {
            row.cells.push(cell_content(cell));
            row.is_header |= cell.is("th");
            row
        })
}

/// Cells are single-line: pipes escaped, newlines become `<br>`.
fn cell_content(cell: &Element) -> String {
    all(cell).trim().replace('|', "\\|").replace('\n', "<br>")
}

fn separator(column_count: usize) -> String {
    format!("| {} |", vec!["---"; column_count].join(" | "))
}
