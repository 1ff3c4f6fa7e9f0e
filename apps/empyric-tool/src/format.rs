//! Text and JSON rendering of inspection results.

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table as TextTable};
use empyric_core::{AttrValue, Attributes, NodeEntry, NodeKind, Table, Value};
use serde_json::{json, Value as JsonValue};

use crate::OutputFormat;

/// Flat listing of every node.
pub fn structure(entries: &[NodeEntry], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => entries_json(entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                return Ok("(empty container)".to_string());
            }
            let mut table = text_table();
            table.set_header(
                ["Path", "Kind", "Shape", "Type", "Attributes"]
                    .into_iter()
                    .map(Cell::new),
            );
            for entry in entries {
                let (kind, shape, dtype) = match &entry.kind {
                    NodeKind::Group => ("group", String::new(), String::new()),
                    NodeKind::Dataset { rows, cols, dtype } => {
                        ("dataset", format!("{} x {}", rows, cols), dtype.to_string())
                    }
                };
                table.add_row(vec![
                    Cell::new(&entry.path),
                    Cell::new(kind),
                    Cell::new(shape),
                    Cell::new(dtype),
                    Cell::new(render_attrs(&entry.attrs)),
                ]);
            }
            Ok(table.to_string())
        }
    }
}

/// Indented tree, one node per line.
pub fn tree(entries: &[NodeEntry], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => entries_json(entries),
        OutputFormat::Text => {
            let mut lines = vec!["/".to_string()];
            for entry in entries {
                let indent = "  ".repeat(entry.depth + 1);
                let line = match &entry.kind {
                    NodeKind::Group => format!("{}{}/", indent, entry.name()),
                    NodeKind::Dataset { rows, cols, dtype } => {
                        format!("{}{} [{} x {}, {}]", indent, entry.name(), rows, cols, dtype)
                    }
                };
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }
    }
}

/// List of dataset paths from a search or filter.
pub fn paths(paths: &[String], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(paths)?),
        OutputFormat::Text if paths.is_empty() => Ok("No matching datasets".to_string()),
        OutputFormat::Text => Ok(paths.join("\n")),
    }
}

/// First rows of a dataset.
pub fn preview(path: &str, table: &Table, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<JsonValue> = table
                .rows()
                .map(|row| {
                    let mut obj = serde_json::Map::new();
                    for (name, value) in table.column_names().into_iter().zip(row) {
                        obj.insert(name.to_string(), value_to_json(value));
                    }
                    JsonValue::Object(obj)
                })
                .collect();
            Ok(serde_json::to_string_pretty(&json!({
                "path": path,
                "columns": table.column_names(),
                "rows": rows,
            }))?)
        }
        OutputFormat::Text => {
            let mut out = text_table();
            out.set_header(table.column_names().into_iter().map(Cell::new));
            for row in table.rows() {
                out.add_row(row.iter().map(|v| {
                    Cell::new(v.to_string()).set_alignment(CellAlignment::Right)
                }));
            }
            Ok(format!("{} ({} rows shown)\n{}", path, table.num_rows(), out))
        }
    }
}

fn text_table() -> TextTable {
    let mut table = TextTable::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn entries_json(entries: &[NodeEntry]) -> anyhow::Result<String> {
    let items: Vec<JsonValue> = entries
        .iter()
        .map(|entry| {
            let mut item = serde_json::to_value(entry)?;
            if let JsonValue::Object(map) = &mut item {
                map.insert("attributes".to_string(), attrs_to_json(&entry.attrs));
            }
            Ok(item)
        })
        .collect::<Result<_, serde_json::Error>>()?;
    Ok(serde_json::to_string_pretty(&items)?)
}

fn render_attrs(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn attrs_to_json(attrs: &Attributes) -> JsonValue {
    let map = attrs
        .iter()
        .map(|(key, value)| {
            let value = match value {
                AttrValue::Text(s) => json!(s),
                AttrValue::TextList(items) => json!(items),
                AttrValue::Int(v) => json!(v),
                AttrValue::Float(v) => JsonValue::from(*v),
            };
            (key.clone(), value)
        })
        .collect();
    JsonValue::Object(map)
}

/// Non-finite floats become `null`.
fn value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Int(v) => json!(v),
        Value::Float(v) => JsonValue::from(v),
    }
}
