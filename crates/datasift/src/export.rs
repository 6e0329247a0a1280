//! CSV export of a dataset.
//!
//! The format is minimal: a header of the dataset's columns,
//! one line per record, and double quotes only around text that contains a
//! comma. Embedded quotes are written as-is.

use std::path::Path;
use tracing::info;

use crate::error::{Result, ResultExt};
use crate::types::{Dataset, Value, cell};

/// Render `dataset` as CSV text, lines joined with `\n`.
pub fn to_csv_string(dataset: &Dataset) -> String {
    let mut lines = Vec::with_capacity(dataset.row_count() + 1);
    lines.push(dataset.columns().join(","));

    for record in dataset.records() {
        let line = dataset
            .columns()
            .iter()
            .map(|column| csv_field(cell(record, column)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

fn csv_field(value: &Value) -> String {
    match value {
        Value::Text(s) if s.contains(',') => format!("\"{s}\""),
        other => other.to_string(),
    }
}

/// Write the CSV export of `dataset` to `path`.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_csv_string(dataset))
        .context(format!("Writing {}", path.display()))?;
    info!("Exported '{}' to {}", dataset.name(), path.display());
    Ok(())
}
