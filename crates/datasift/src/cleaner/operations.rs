//! The individual cleaning operations, applied to a working set of records.

use std::collections::HashSet;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::statistics::column_outliers;
use crate::types::{Record, Value, cell};
use crate::utils::canonical_row_key;

/// Keep the first occurrence of each row and drop every repeat.
///
/// Returns the surviving rows and how many were dropped.
pub(crate) fn remove_duplicates(records: Vec<Record>) -> Result<(Vec<Record>, usize)> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let mut kept = Vec::with_capacity(before);

    for (row, record) in records.into_iter().enumerate() {
        if seen.insert(canonical_row_key(&record, row)?) {
            kept.push(record);
        }
    }

    let removed = before - kept.len();
    debug!("Removed {} duplicate rows", removed);
    Ok((kept, removed))
}

/// Write `fill_value` into every missing cell of the known columns.
///
/// A column the record does not carry at all is added. Returns the number
/// of cells filled.
pub(crate) fn fill_missing(records: &mut [Record], columns: &[String], fill_value: &str) -> usize {
    let mut filled = 0;

    for record in records.iter_mut() {
        for column in columns {
            if cell(record, column).is_missing() {
                record.insert(column.clone(), Value::Text(fill_value.to_string()));
                filled += 1;
            }
        }
    }

    debug!("Filled {} missing cells with '{}'", filled, fill_value);
    filled
}

/// Drop rows flagged as outliers, one column at a time.
///
/// Each column's statistics are computed on the rows that survived the
/// previous columns. Returns the surviving rows and how many were dropped.
pub(crate) fn remove_outliers(
    mut records: Vec<Record>,
    columns: &[String],
    config: &AnalyzerConfig,
) -> (Vec<Record>, usize) {
    let before = records.len();

    for column in columns {
        let flagged: HashSet<usize> = column_outliers(&records, column, config)
            .into_iter()
            .map(|(row, _)| row)
            .collect();
        if flagged.is_empty() {
            continue;
        }

        debug!("Dropping {} outlier rows for column '{}'", flagged.len(), column);
        records = records
            .into_iter()
            .enumerate()
            .filter(|(row, _)| !flagged.contains(row))
            .map(|(_, record)| record)
            .collect();
    }

    let removed = before - records.len();
    (records, removed)
}
