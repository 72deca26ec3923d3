//! Integration tests for table and section rendering.

use cmsrender::model::{
    ContentType, DynamicTableConfig, LinkRow, MultipleTableConfig, PageSection, TableCell,
    TableColumn, TableRow, TableVariant,
};
use cmsrender::normalize_value;
use cmsrender::render::{
    render_dynamic_table, render_link_table, render_page_with_stats, render_section,
    RenderOptions,
};
use serde_json::json;

fn columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("course", "Course"),
        TableColumn::new("link", "Syllabus"),
    ]
}

#[test]
fn test_link_table_rows() {
    let rows = vec![
        LinkRow::new("Academic calendar", "/files/calendar.pdf"),
        LinkRow::new("Alumni portal", "https://alumni.example.edu").external(),
        LinkRow::new("Library", "/library"),
    ];
    let table = render_link_table(&rows, "Quick Links");

    assert_eq!(table.find_all(&|el| el.tag == "th").len(), 1);
    assert_eq!(table.find_all(&|el| el.tag == "tr").len(), 4);

    let anchors = table.find_all(&|el| el.tag == "a");
    assert_eq!(anchors[0].get_attr("title"), Some("Download PDF"));
    assert_eq!(anchors[1].get_attr("target"), Some("_blank"));
    assert_eq!(anchors[2].get_attr("target"), Some("_self"));
    assert_eq!(anchors[2].get_attr("rel"), None);

    let has_icon = |i: usize| anchors[i].children.iter().any(|c| c.tag() == Some("svg"));
    assert!(has_icon(1));
    assert!(!has_icon(2));
}

#[test]
fn test_dynamic_table_cells() {
    let rows = vec![TableRow::new(vec![
        TableCell::text("course", "Data Structures"),
        TableCell::text("link", "https://x.edu/ds.pdf"),
    ])];
    let table = render_dynamic_table(&columns(), &rows, Some("Courses"), TableVariant::Default);
    let html = table.to_html();

    assert!(html.contains(">Data Structures</td>"));
    assert!(html.contains("href=\"https://x.edu/ds.pdf\""));
    assert!(html.contains("Download PDF"));
    assert!(html.contains("border border-gray-300"));
}

#[test]
fn test_cell_lookup_by_key_not_position() {
    let rows = vec![TableRow::new(vec![
        TableCell::text("link", "second"),
        TableCell::text("course", "first"),
    ])];
    let table = render_dynamic_table(&columns(), &rows, None, TableVariant::Default);
    let cells = table.find_all(&|el| el.tag == "td");
    assert_eq!(cells[0].text_content(), "first");
    assert_eq!(cells[1].text_content(), "second");
}

#[test]
fn test_explicit_link_cell_external() {
    let mut cell = TableCell::link("link", "Open", "https://x.edu/ds");
    cell.is_external = true;
    let rows = vec![TableRow::new(vec![cell])];
    let table = render_dynamic_table(&columns(), &rows, None, TableVariant::Default);

    let anchors = table.find_all(&|el| el.tag == "a");
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].get_attr("href"), Some("https://x.edu/ds"));
    assert_eq!(anchors[0].get_attr("target"), Some("_blank"));
    assert_eq!(anchors[0].get_attr("rel"), Some("noopener noreferrer"));
}

#[test]
fn test_link_flag_without_url_is_text() {
    let mut cell = TableCell::text("course", "Pending");
    cell.is_link = true;
    let rows = vec![TableRow::new(vec![cell])];
    let table = render_dynamic_table(&columns(), &rows, None, TableVariant::Default);
    assert!(table.find_all(&|el| el.tag == "a").is_empty());
    assert!(table.to_html().contains(">Pending</td>"));
}

#[test]
fn test_bordered_variant() {
    let table = render_dynamic_table(&columns(), &[], None, TableVariant::Bordered);
    let wrapper = table.as_element().unwrap();
    assert!(wrapper.has_class("border-2"));
    assert!(wrapper.has_class("border-gray-400"));
}

#[test]
fn test_column_width_class() {
    let mut cols = columns();
    cols[0].width = Some("w-1/3".to_string());
    let table = render_dynamic_table(&cols, &[], None, TableVariant::Default);
    let headers = table.find_all(&|el| el.tag == "th");
    assert!(headers[0].has_class("w-1/3"));
}

#[test]
fn test_mixed_multiple_tables_section() {
    let section = PageSection {
        id: "labs".to_string(),
        title: "Laboratories".to_string(),
        content_type: ContentType::MixedMultipleTables,
        is_active: true,
        multiple_tables_config: vec![
            MultipleTableConfig {
                id: "t1".to_string(),
                table_title: "Hardware".to_string(),
                columns: columns(),
                ..Default::default()
            },
            MultipleTableConfig {
                id: "t2".to_string(),
                table_title: "Software".to_string(),
                columns: columns(),
                variant: TableVariant::Striped,
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let markup = render_section(&section, &RenderOptions::default());
    let titles: Vec<String> = markup
        .find_all(&|el| el.tag == "h3")
        .iter()
        .map(|el| el.text_content())
        .collect();
    assert_eq!(titles, ["Hardware", "Software"]);
    assert_eq!(markup.find_all(&|el| el.tag == "table").len(), 2);
}

#[test]
fn test_non_authoritative_tables_ignored() {
    let section = PageSection {
        title: "Intro".to_string(),
        content_type: ContentType::RichText,
        is_active: true,
        table_data: vec![LinkRow::new("Hidden", "/hidden")],
        dynamic_table_config: Some(DynamicTableConfig::default()),
        ..Default::default()
    };
    let markup = render_section(&section, &RenderOptions::default());
    assert!(markup.find_all(&|el| el.tag == "table").is_empty());
}

#[test]
fn test_page_table_stats() {
    let page = normalize_value(
        json!({
            "heroTitle": "Fees",
            "sections": [
                {"id": "a", "title": "Links", "contentType": "table", "order": 1,
                 "tableData": [{"label": "Pay", "link": "https://pay.example.edu", "isExternal": true}]},
                {"id": "b", "title": "Amounts", "contentType": "mixedDynamic", "order": 2,
                 "content": {"root": {"children": [{"type": "paragraph", "children": [{"text": "See below"}]}]}},
                 "dynamicTableConfig": {"columns": [{"key": "p", "label": "Program"}],
                                        "rows": [{"data": {"p": "B.E."}}]}}
            ]
        }),
        "fees",
    );

    let result = render_page_with_stats(&page, &RenderOptions::default());
    assert_eq!(result.stats.table_count, 2);
    assert_eq!(result.stats.paragraph_count, 1);
    assert!(result.html.contains(">B.E.</td>"));
    assert!(result.html.contains("SECTIONS"));
}
