//! Table payload normalization.
//!
//! Dynamic pages store table rows as flat objects (`{ "data": { "col": 1 } }`)
//! while globals store them as cell lists (`{ "rowData": [...] }`). Rows are
//! brought into the cell-list shape one at a time, so a table may mix both.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::model::{
    DynamicTableConfig, LinkRow, MultipleTableConfig, TableCell, TableColumn, TableRow,
    TableVariant,
};

/// Turn a scalar into cell text.
///
/// Strings are kept verbatim, numbers and booleans use their JSON
/// spelling, `null` and missing values become the empty string. Arrays and
/// objects are written as compact JSON.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Like [`stringify`], but `None` for absent, null or empty values.
pub fn stringify_id(value: Option<&Value>) -> Option<String> {
    Some(stringify(value)).filter(|id| !id.is_empty())
}

/// Decode the `columns` array of a table.
pub fn columns_from(value: Option<&Value>) -> Vec<TableColumn> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| TableColumn {
            key: stringify(obj.get("key")),
            label: stringify(obj.get("label")),
            width: stringify_id(obj.get("width")),
        })
        .collect()
}

/// Decode the `rows` array of a table against its columns.
pub fn rows_from(value: Option<&Value>, columns: &[TableColumn]) -> Vec<TableRow> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(index, row)| row_from(row, index, columns))
        .collect()
}

/// Decode one row.
///
/// A row with a `data` object and no `rowData` is converted into exactly one
/// cell per column, in column order. Rows already in cell-list shape are
/// decoded as they are.
pub fn row_from(value: &Value, index: usize, columns: &[TableColumn]) -> TableRow {
    let Some(obj) = value.as_object() else {
        warn!("table row {index} is not an object, rendering it empty");
        return TableRow {
            row_data: Vec::new(),
            id: Some(format!("row_{index}")),
        };
    };

    match (obj.get("data"), obj.get("rowData")) {
        (Some(Value::Object(data)), None) => flat_row(obj, data, index, columns),
        (_, cells) => TableRow {
            row_data: cells
                .and_then(Value::as_array)
                .map(|cells| cells.iter().filter_map(cell_from).collect())
                .unwrap_or_default(),
            id: stringify_id(obj.get("id")),
        },
    }
}

fn flat_row(
    row: &Map<String, Value>,
    data: &Map<String, Value>,
    index: usize,
    columns: &[TableColumn],
) -> TableRow {
    debug!("converting flat table row {index} into {} cells", columns.len());
    let row_id = stringify_id(row.get("id"));
    let prefix = row_id.clone().unwrap_or_else(|| index.to_string());

    let row_data = columns
        .iter()
        .map(|column| TableCell {
            column_key: column.key.clone(),
            value: stringify(data.get(&column.key)),
            is_link: false,
            link_url: None,
            is_external: false,
            id: Some(format!("{prefix}_{}", column.key)),
        })
        .collect();

    TableRow {
        row_data,
        id: Some(row_id.unwrap_or_else(|| format!("row_{index}"))),
    }
}

fn cell_from(value: &Value) -> Option<TableCell> {
    let obj = value.as_object()?;
    Some(TableCell {
        column_key: stringify(obj.get("columnKey")),
        value: stringify(obj.get("value")),
        is_link: obj.get("isLink").and_then(Value::as_bool).unwrap_or(false),
        link_url: stringify_id(obj.get("linkUrl")),
        is_external: obj.get("isExternal").and_then(Value::as_bool).unwrap_or(false),
        id: stringify_id(obj.get("id")),
    })
}

fn variant_from(obj: &Map<String, Value>) -> TableVariant {
    TableVariant::parse(obj.get("variant").and_then(Value::as_str))
}

/// Decode a `dynamicTableConfig` object.
pub fn dynamic_table_from(value: &Value) -> Option<DynamicTableConfig> {
    let obj = value.as_object()?;
    let columns = columns_from(obj.get("columns"));
    let rows = rows_from(obj.get("rows"), &columns);
    Some(DynamicTableConfig {
        columns,
        rows,
        variant: variant_from(obj),
    })
}

/// Decode a `multipleTablesConfig` array.
pub fn multiple_tables_from(value: Option<&Value>) -> Vec<MultipleTableConfig> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let columns = columns_from(obj.get("columns"));
            let rows = rows_from(obj.get("rows"), &columns);
            MultipleTableConfig {
                id: stringify(obj.get("id")),
                table_title: stringify(obj.get("tableTitle")),
                columns,
                rows,
                variant: variant_from(obj),
            }
        })
        .collect()
}

/// Decode a `tableData` array of link rows. Rows without a link are dropped.
pub fn link_rows_from(value: Option<&Value>) -> Vec<LinkRow> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let link = stringify(obj.get("link"));
            if link.is_empty() {
                warn!("link table row without a link, skipping it");
                return None;
            }
            Some(LinkRow {
                label: stringify(obj.get("label")),
                link,
                is_external: obj.get("isExternal").and_then(Value::as_bool).unwrap_or(false),
            })
        })
        .collect()
}
