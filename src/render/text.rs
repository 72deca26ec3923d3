//! Plain text rendering for rich text and pages.

use crate::model::{
    DocumentNode, DynamicTableConfig, LinkRow, ListType, PageSection, RichText,
    UnifiedPageResponse,
};

use super::{CleanupPipeline, RenderOptions};

/// Convert rich text to plain text.
///
/// Blocks are separated by blank lines; list items get `-`, `1.` or
/// `[x]` markers and links keep their target in parentheses.
pub fn to_text(content: &RichText, options: &RenderOptions) -> String {
    let output = rich_text_blocks(content).join("\n\n");
    finish(output, options)
}

/// Convert a normalized page to plain text: title, then every active
/// section with its content and tables.
pub fn page_to_text(page: &UnifiedPageResponse, options: &RenderOptions) -> String {
    let mut blocks = Vec::new();
    if !page.hero_title.is_empty() {
        blocks.push(page.hero_title.clone());
    }
    if let Some(subtitle) = page.hero_subtitle.as_deref().filter(|s| !s.is_empty()) {
        blocks.push(subtitle.to_string());
    }
    for section in page.active_sections() {
        section_blocks(section, &mut blocks);
    }
    finish(blocks.join("\n\n"), options)
}

fn finish(output: String, options: &RenderOptions) -> String {
    let output = match options.cleanup {
        Some(ref cleanup_options) => CleanupPipeline::new(cleanup_options.clone()).process(&output),
        None => output,
    };
    output.trim().to_string()
}

fn section_blocks(section: &PageSection, blocks: &mut Vec<String>) {
    if !section.title.is_empty() {
        blocks.push(section.title.clone());
    }
    let content_type = section.content_type;
    if content_type.has_rich_text() {
        blocks.extend(rich_text_blocks(&section.content));
    }
    if content_type.uses_link_table() && !section.table_data.is_empty() {
        blocks.push(link_rows_text(&section.table_data));
    }
    if content_type.uses_dynamic_table() {
        if let Some(config) = &section.dynamic_table_config {
            blocks.push(dynamic_table_text(config));
        }
    }
    if content_type.uses_multiple_tables() {
        for table in &section.multiple_tables_config {
            if !table.table_title.is_empty() {
                blocks.push(table.table_title.clone());
            }
            blocks.push(dynamic_table_text(&DynamicTableConfig {
                columns: table.columns.clone(),
                rows: table.rows.clone(),
                variant: table.variant,
            }));
        }
    }
}

fn link_rows_text(rows: &[LinkRow]) -> String {
    rows.iter()
        .map(|row| format!("- {} ({})", row.label, row.link))
        .collect::<Vec<_>>()
        .join("\n")
}

fn dynamic_table_text(config: &DynamicTableConfig) -> String {
    let mut lines = Vec::with_capacity(config.rows.len() + 1);
    lines.push(
        config
            .columns
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
    );
    for row in &config.rows {
        let cells: Vec<&str> = config
            .columns
            .iter()
            .map(|c| row.cell(&c.key).map_or("", |cell| cell.value.as_str()))
            .collect();
        lines.push(cells.join(" | "));
    }
    lines.join("\n")
}

fn rich_text_blocks(content: &RichText) -> Vec<String> {
    content
        .children()
        .unwrap_or_default()
        .iter()
        .map(|node| block_text(node, 0))
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn block_text(node: &DocumentNode, depth: usize) -> String {
    match node {
        DocumentNode::List {
            list_type,
            children,
        } => list_text(*list_type, children, depth),
        DocumentNode::Quote { .. } => format!("> {}", node.plain_text()),
        DocumentNode::Root { children } => children
            .iter()
            .map(|child| block_text(child, depth))
            .collect::<Vec<_>>()
            .join("\n\n"),
        other => inline_text(other),
    }
}

fn list_text(list_type: ListType, items: &[DocumentNode], depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut lines = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let marker = match (list_type, item) {
            (ListType::Number, _) => format!("{}.", index + 1),
            (ListType::Check, DocumentNode::ListItem { checked, .. }) => {
                (if *checked == Some(true) { "[x]" } else { "[ ]" }).to_string()
            }
            (ListType::Check, _) => "[ ]".to_string(),
            (ListType::Bullet, _) => "-".to_string(),
        };

        let mut text = String::new();
        let mut nested = Vec::new();
        for child in item.children() {
            match child {
                DocumentNode::List {
                    list_type,
                    children,
                } => nested.push(list_text(*list_type, children, depth + 1)),
                other => text.push_str(&inline_text(other)),
            }
        }
        lines.push(format!("{indent}{marker} {}", text.trim()));
        lines.extend(nested);
    }
    lines.join("\n")
}

fn inline_text(node: &DocumentNode) -> String {
    match node {
        DocumentNode::Text { text, .. } => text.clone(),
        DocumentNode::LineBreak => "\n".to_string(),
        DocumentNode::Link { url, .. } => {
            let label = node.plain_text();
            match (label.is_empty(), url.is_empty()) {
                (_, true) => label,
                (true, false) => url.clone(),
                (false, false) if label == *url => label,
                (false, false) => format!("{label} ({url})"),
            }
        }
        DocumentNode::Upload { value } => match (&value.url, &value.alt) {
            (Some(_), Some(alt)) => format!("[image: {alt}]"),
            (Some(_), None) => "[image]".to_string(),
            (None, _) => String::new(),
        },
        other => other.children().iter().map(inline_text).collect(),
    }
}
