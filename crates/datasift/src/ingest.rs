//! File ingestion: decode CSV and JSON uploads into records.
//!
//! CSV goes through polars' reader with every column read as text, and the
//! resulting frame is flattened into [`Record`]s. JSON accepts an array of
//! objects or a single object.

use indexmap::IndexMap;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde::Deserialize;
use serde_json::error::Category;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DataQualityError, Result, ResultExt};
use crate::quality::DataQualityAnalyzer;
use crate::types::{DataSource, Dataset, Record, Value};

/// Records decoded from a file, with the name and source they should be
/// analyzed under.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub name: String,
    pub source: DataSource,
}

impl LoadedRecords {
    /// Hand the loaded records to `analyzer`.
    pub fn analyze(self, analyzer: &DataQualityAnalyzer) -> Result<Dataset> {
        analyzer.analyze(self.records, self.name, self.source)
    }
}

/// Load a `.csv` or `.json` file (extension matched case-insensitively).
///
/// The dataset name is the file name without its extension.
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedRecords> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let source = match extension.as_str() {
        "csv" => DataSource::Csv,
        "json" => DataSource::Json,
        _ => return Err(DataQualityError::UnsupportedFileType(extension)),
    };

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = std::fs::read_to_string(path)
        .context(format!("Reading {}", path.display()))?;

    let records = match source {
        DataSource::Csv => parse_csv_str(&content),
        _ => parse_json_str(&content),
    }
    .context(format!("Parsing {}", path.display()))?;

    info!(
        "Loaded {} records from {} as '{}'",
        records.len(),
        path.display(),
        name
    );

    Ok(LoadedRecords {
        records,
        name,
        source,
    })
}

/// Load a CSV file into records.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .context(format!("Reading {}", path.display()))?;
    parse_csv_str(&content)
}

/// Parse CSV text with a header row into records.
///
/// Every cell is kept as text (`"02134"` stays `"02134"`); numeric meaning
/// is decided later by coercion. Blank lines outside quoted fields are
/// skipped and empty cells come back as [`Value::Absent`].
pub fn parse_csv_str(content: &str) -> Result<Vec<Record>> {
    let cleaned = strip_blank_lines(content);
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    // Strategy 1: standard loading with quote handling
    let df = match read_text_frame(&cleaned, Some(b'"')) {
        Ok(df) => df,
        Err(e) => {
            debug!("Quoted CSV loading failed: {}", e);
            // Strategy 2: without quote handling
            read_text_frame(&cleaned, None)?
        }
    };

    debug!("Read CSV frame with {} rows x {} columns", df.height(), df.width());
    dataframe_to_records(&df)
}

/// Read with schema inference disabled, so every column is `String`.
fn read_text_frame(content: &str, quote_char: Option<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
        .into_reader_with_file_handle(Cursor::new(content.to_string()))
        .finish()
}

/// Drop whitespace-only lines that are not inside a quoted field.
fn strip_blank_lines(content: &str) -> String {
    let mut in_quotes = false;
    let mut kept = Vec::new();

    for line in content.lines() {
        if in_quotes || !line.trim().is_empty() {
            kept.push(line);
        }
        // An escaped quote ("") toggles twice, so parity tracks the state.
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }

    kept.join("\n")
}

/// Flatten a frame into one record per row, columns in frame order.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Record>> {
    let mut records: Vec<Record> = (0..df.height())
        .map(|_| Record::with_capacity(df.width()))
        .collect();

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = series_values(column.as_materialized_series())?;
        for (record, value) in records.iter_mut().zip(values) {
            record.insert(name.clone(), value);
        }
    }

    Ok(records)
}

fn series_values(series: &Series) -> Result<Vec<Value>> {
    let text = series.cast(&DataType::String)?;
    Ok(text.str()?.into_iter().map(Value::from).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Rows(Vec<IndexMap<String, serde_json::Value>>),
    Single(IndexMap<String, serde_json::Value>),
}

/// Load a JSON file into records.
pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .context(format!("Reading {}", path.display()))?;
    parse_json_str(&content)
}

/// Parse a JSON array of objects, or a single object, into records.
///
/// Nested arrays and objects are kept as their JSON text.
pub fn parse_json_str(content: &str) -> Result<Vec<Record>> {
    let payload: JsonPayload = serde_json::from_str(content).map_err(|e| match e.classify() {
        Category::Data => DataQualityError::InvalidInput(
            "expected an array of objects or a single object".to_string(),
        ),
        _ => DataQualityError::Json(e),
    })?;

    let rows = match payload {
        JsonPayload::Rows(rows) => rows,
        JsonPayload::Single(row) => vec![row],
    };

    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(key, value)| (key, json_value(value)))
                .collect()
        })
        .collect())
}

fn json_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Absent,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .unwrap_or_else(|| Value::Text(n.to_string())),
        serde_json::Value::String(s) => Value::Text(s),
        nested => Value::Text(nested.to_string()),
    }
}
