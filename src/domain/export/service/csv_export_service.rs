//! CSV export of the currently displayed rows.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

/// Byte-order-mark so spreadsheet tools read the file as UTF-8.
const BOM: &str = "\u{FEFF}";

/// Render flat records as CSV text.
///
/// Returns `None` for an empty row set or when the first record is not a
/// flat object. Column headers come from the first record's key set;
/// later records are projected onto those columns, absent keys rendering
/// as empty fields. Every field is quoted and embedded quotes are
/// doubled, so delimiters and newlines inside values survive.
pub fn render_csv(rows: &[Value]) -> Option<String> {
    let headers: Vec<&str> = rows.first()?.as_object()?.keys().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| quote_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let line = headers
            .iter()
            .map(|h| quote_field(&field_text(row.get(*h))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Some(format!("{}{}", BOM, lines.join("\n")))
}

/// Write the rendered CSV under `dir`, creating it as needed.
///
/// An empty row set is a no-op reported as `Ok(None)`.
pub fn export_rows(dir: &Path, filename: &str, rows: &[Value]) -> Result<Option<PathBuf>> {
    let Some(content) = render_csv(rows) else {
        info!(filename, "Nothing to export");
        return Ok(None);
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export dir {}", dir.display()))?;

    let path = dir.join(filename);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "Exported CSV");
    Ok(Some(path))
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
