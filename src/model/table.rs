//! Table types.

use serde::{Deserialize, Serialize};

/// A row of a simple link table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRow {
    /// Display text
    pub label: String,

    /// Link target
    pub link: String,

    /// Open in a new tab
    #[serde(default)]
    pub is_external: bool,
}

impl LinkRow {
    /// Create a new link row.
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
            is_external: false,
        }
    }

    /// Mark the row as external and return self.
    pub fn external(mut self) -> Self {
        self.is_external = true;
        self
    }
}

/// A column of a dynamic table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Key matched against `TableCell::column_key`
    pub key: String,

    /// Header text
    pub label: String,

    /// Extra width class for the header cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl TableColumn {
    /// Create a new column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
        }
    }
}

/// A cell of a dynamic table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Key of the column this cell belongs to
    pub column_key: String,

    /// Cell text
    pub value: String,

    /// Whether the cell is an explicit link
    #[serde(default)]
    pub is_link: bool,

    /// Target of an explicit link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,

    /// Open the link in a new tab
    #[serde(default)]
    pub is_external: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TableCell {
    /// Create a plain text cell.
    pub fn text(column_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column_key: column_key.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create an explicit link cell.
    pub fn link(
        column_key: impl Into<String>,
        value: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            column_key: column_key.into(),
            value: value.into(),
            is_link: true,
            link_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Explicit link target, if the cell is a link with a non-empty URL.
    pub fn explicit_link(&self) -> Option<&str> {
        if !self.is_link {
            return None;
        }
        self.link_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A row of a dynamic table in cell-list shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cells, located by column key
    #[serde(default)]
    pub row_data: Vec<TableCell>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TableRow {
    /// Create a row from cells.
    pub fn new(row_data: Vec<TableCell>) -> Self {
        Self { row_data, id: None }
    }

    /// Find the cell for a column.
    pub fn cell(&self, column_key: &str) -> Option<&TableCell> {
        self.row_data.iter().find(|c| c.column_key == column_key)
    }
}

/// Visual style of a dynamic table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    #[default]
    Default,
    Bordered,
    Striped,
}

impl TableVariant {
    /// Parse a variant name; unknown names use the default style.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("bordered") => TableVariant::Bordered,
            Some("striped") => TableVariant::Striped,
            _ => TableVariant::Default,
        }
    }
}

/// Configuration of a single dynamic table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicTableConfig {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub variant: TableVariant,
}

impl DynamicTableConfig {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// One of several titled tables in a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleTableConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub table_title: String,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub variant: TableVariant,
}
