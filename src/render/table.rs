//! Link-table and dynamic-table rendering.

use crate::model::{LinkRow, TableCell, TableColumn, TableRow, TableVariant};

use super::links::{find_urls, linkify, styled_anchor, whole_url, AnchorStyle, LinkPalette};
use super::markup::{Element, Markup};

const TABLE_CLASS: &str = "min-w-full text-sm";
const HEADER_ROW_CLASS: &str = "bg-gray-100";
const ROW_CLASS: &str = "border-b border-gray-200 last:border-b-0 hover:bg-gray-50 transition-colors";

/// Render a one-column table of labelled links.
///
/// External rows open in a new tab and carry the external icon; `.pdf`
/// links get the download treatment.
pub fn render_link_table(rows: &[LinkRow], title: &str) -> Markup {
    let header = Element::new("thead").child(
        Element::new("tr").class(HEADER_ROW_CLASS).child(
            Element::new("th")
                .class("px-4 py-2 border-b border-gray-300 text-left")
                .text(title),
        ),
    );

    let body = Element::new("tbody").children(rows.iter().map(|row| {
        let anchor = styled_anchor(&row.link, row.label.as_str(), AnchorStyle::authored(row.is_external));
        Markup::from(
            Element::new("tr")
                .class(ROW_CLASS)
                .child(Element::new("td").class("px-4 py-2").child(anchor)),
        )
    }));

    Element::new("div")
        .class("overflow-x-auto rounded-lg border border-gray-300")
        .child(Element::new("table").class(TABLE_CLASS).child(header).child(body))
        .into()
}

/// Render a column/row table.
///
/// Cells are looked up by column key; a row without a cell for a column
/// gets an empty `<td>`.
pub fn render_dynamic_table(
    columns: &[TableColumn],
    rows: &[TableRow],
    title: Option<&str>,
    variant: TableVariant,
) -> Markup {
    let mut wrapper = Element::new("div").class(format!(
        "overflow-x-auto rounded-lg {}",
        variant_classes(variant)
    ));

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        wrapper = wrapper.child(
            Element::new("div")
                .class("bg-gray-100 px-4 py-3 border-b border-gray-300")
                .child(
                    Element::new("h3")
                        .class("text-lg font-semibold text-gray-800")
                        .text(title),
                ),
        );
    }

    let header = Element::new("thead").child(
        Element::new("tr")
            .class(HEADER_ROW_CLASS)
            .children(columns.iter().map(|column| {
                let class = format!(
                    "px-4 py-2 border-b border-gray-300 text-left font-medium text-gray-700 {}",
                    column.width.as_deref().unwrap_or_default()
                );
                Markup::from(Element::new("th").class(class).text(column.label.as_str()))
            })),
    );

    let body = Element::new("tbody").children(rows.iter().enumerate().map(|(index, row)| {
        let cells = columns.iter().map(|column| {
            let td = Element::new("td").class("px-4 py-2 border-r border-gray-200 last:border-r-0");
            match row.cell(&column.key) {
                Some(cell) => Markup::from(td.children(cell_content(cell))),
                None => Markup::from(td),
            }
        });
        Markup::from(
            Element::new("tr")
                .class(row_classes(variant, index))
                .children(cells),
        )
    }));

    wrapper
        .child(Element::new("table").class(TABLE_CLASS).child(header).child(body))
        .into()
}

fn variant_classes(variant: TableVariant) -> &'static str {
    match variant {
        TableVariant::Bordered => "border-2 border-gray-400",
        TableVariant::Default | TableVariant::Striped => "border border-gray-300",
    }
}

fn row_classes(variant: TableVariant, index: usize) -> String {
    if variant == TableVariant::Striped && index % 2 == 1 {
        format!("{ROW_CLASS} bg-gray-50")
    } else {
        ROW_CLASS.to_string()
    }
}

/// Cell content, in order of precedence: explicit link, whole-cell URL,
/// text with inline URLs, plain text.
fn cell_content(cell: &TableCell) -> Vec<Markup> {
    if let Some(url) = cell.explicit_link() {
        let anchor = styled_anchor(url, cell.value.as_str(), AnchorStyle::authored(cell.is_external));
        return vec![anchor.into()];
    }

    if let Some(url) = whole_url(&cell.value) {
        let anchor = styled_anchor(url, cell.value.as_str(), AnchorStyle::detected(LinkPalette::Table));
        return vec![anchor.into()];
    }

    if !find_urls(&cell.value).is_empty() {
        let span = Element::new("span").children(linkify(&cell.value, LinkPalette::Table, None));
        return vec![span.into()];
    }

    if cell.value.is_empty() {
        Vec::new()
    } else {
        vec![Markup::text(cell.value.as_str())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<TableColumn> {
        vec![TableColumn::new("name", "Name"), TableColumn::new("doc", "Document")]
    }

    #[test]
    fn test_missing_cell_is_empty_td() {
        let rows = vec![TableRow::new(vec![TableCell::text("name", "Alice")])];
        let html = render_dynamic_table(&columns(), &rows, None, TableVariant::Default).to_html();
        assert!(html.contains(">Alice</td>"));
        assert!(html.contains("last:border-r-0\"></td>"));
    }

    #[test]
    fn test_cell_precedence() {
        let explicit = TableCell::link("doc", "Syllabus", "/files/syllabus.pdf");
        let content = cell_content(&explicit);
        let anchor = content[0].as_element().unwrap();
        assert_eq!(anchor.get_attr("href"), Some("/files/syllabus.pdf"));
        assert_eq!(anchor.get_attr("title"), Some("Download PDF"));

        let whole = TableCell::text("doc", " https://x.edu/info ");
        let anchor = cell_content(&whole)[0].as_element().cloned().unwrap();
        assert_eq!(anchor.get_attr("href"), Some("https://x.edu/info"));
        assert_eq!(anchor.get_attr("title"), Some("Open link"));

        let mixed = TableCell::text("doc", "See https://x.edu/info now");
        let span = cell_content(&mixed)[0].as_element().cloned().unwrap();
        assert_eq!(span.tag, "span");
        assert_eq!(span.children.len(), 3);

        assert_eq!(cell_content(&TableCell::text("doc", "plain")), vec![Markup::text("plain")]);
    }

    #[test]
    fn test_striped_rows() {
        let rows = vec![
            TableRow::new(vec![TableCell::text("name", "A")]),
            TableRow::new(vec![TableCell::text("name", "B")]),
        ];
        let table = render_dynamic_table(&columns(), &rows, Some("People"), TableVariant::Striped);
        let striped = table.find_all(&|el| el.tag == "tr" && el.has_class("bg-gray-50"));
        assert_eq!(striped.len(), 1);
        assert_eq!(striped[0].children[0].text_content(), "B");
        assert!(table.to_html().contains("<h3 class=\"text-lg font-semibold text-gray-800\">People</h3>"));
    }

    #[test]
    fn test_link_table() {
        let rows = vec![
            LinkRow::new("Handbook", "/files/handbook.pdf"),
            LinkRow::new("Portal", "https://portal.example").external(),
        ];
        let table = render_link_table(&rows, "Downloads");
        let anchors = table.find_all(&|el| el.tag == "a");
        assert_eq!(anchors[0].get_attr("target"), Some("_self"));
        assert!(anchors[0].has_class("text-red-600"));
        assert_eq!(anchors[1].get_attr("target"), Some("_blank"));
        assert_eq!(anchors[1].get_attr("rel"), Some("noopener noreferrer"));
        assert!(table.text_content().starts_with("Downloads"));
    }
}
