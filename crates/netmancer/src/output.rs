//! Output formatting: JSON, YAML, table.
//!
//! Renders query results in the format selected by `--format`. Lists use a
//! `Tabled` row type; single records are flattened into a key/value table.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of records; `table` uses `to_row` per item.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        _ => render_structured(format, data),
    }
}

/// Render a single record; `table` shows one row per (flattened) field.
pub fn render_single<T: Serialize>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let mut rows = Vec::new();
            flatten("", &serde_json::to_value(data)?, &mut rows);
            Ok(render_table(&rows))
        }
        _ => render_structured(format, data),
    }
}

fn render_structured<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

// ── Delivery ─────────────────────────────────────────────────────────

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}

/// Write rendered output to `path`.
pub fn save_output(path: &Path, output: &str) -> Result<(), CliError> {
    std::fs::write(path, output).map_err(|source| CliError::write(path, source))
}

// ── Table helpers ────────────────────────────────────────────────────

#[derive(Debug, Tabled)]
struct Field {
    #[tabled(rename = "Field")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Nested objects become dotted keys; arrays of scalars are comma-joined.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<Field>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, value, out);
            }
        }
        Value::Array(items) if items.iter().all(|v| !v.is_object()) => out.push(Field {
            key: prefix.to_owned(),
            value: items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        }),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), item, out);
            }
        }
        other => out.push(Field {
            key: prefix.to_owned(),
            value: scalar(other),
        }),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
