use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::parse_leading_number;

/// A single cell of a record.
///
/// Rows arrive from loosely typed sources (CSV text, JSON documents, crawl
/// output), so every cell is one of a small closed set of scalars. `Absent`
/// covers both a JSON `null` and a key that is not present in the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Absent,
    Boolean(bool),
    Number(f64),
    Text(String),
}

static ABSENT: Value = Value::Absent;

impl Value {
    /// A cell counts as missing when it has no value or is empty text.
    ///
    /// Booleans and numbers (including `0` and `false`) are never missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Text(s) => s.is_empty(),
            Value::Boolean(_) | Value::Number(_) => false,
        }
    }

    /// Coerce the value to a finite number for statistics.
    ///
    /// Text is read by its leading decimal literal, so `"12kg"` yields `12`
    /// and `"N/A"` yields nothing. Booleans are not numeric.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => parse_leading_number(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

/// One row of tabular data, keyed by column name in insertion order.
pub type Record = IndexMap<String, Value>;

/// Read a cell, treating a key the record does not carry as [`Value::Absent`].
pub fn cell<'a>(record: &'a Record, column: &str) -> &'a Value {
    record.get(column).unwrap_or(&ABSENT)
}

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Uploaded CSV file.
    Csv,
    /// Uploaded JSON file.
    Json,
    /// Entered by hand.
    Manual,
    /// Pulled from an external API.
    Api,
    /// Synthesized from a web crawl.
    Web,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Csv => "csv",
            DataSource::Json => "json",
            DataSource::Manual => "manual",
            DataSource::Api => "api",
            DataSource::Web => "web",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Missing,
    Duplicate,
    Outlier,
    /// Reserved for a format rule; nothing produces it yet.
    Format,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::Duplicate => "duplicate",
            IssueKind::Outlier => "outlier",
            IssueKind::Format => "format",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected data-quality problem.
///
/// `row_index` points into the records of the [`Dataset`] that produced the
/// issue and means nothing for any other snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Issue {
    pub fn missing(row_index: usize, column: &str) -> Self {
        Self {
            kind: IssueKind::Missing,
            description: format!("Missing value in column \"{column}\""),
            row_index: Some(row_index),
            column_name: Some(column.to_string()),
            value: None,
        }
    }

    pub fn duplicate(row_index: usize) -> Self {
        Self {
            kind: IssueKind::Duplicate,
            description: "Duplicate row detected".to_string(),
            row_index: Some(row_index),
            column_name: None,
            value: None,
        }
    }

    pub fn outlier(row_index: usize, column: &str, value: f64) -> Self {
        Self {
            kind: IssueKind::Outlier,
            description: format!("Potential outlier in column \"{column}\""),
            row_index: Some(row_index),
            column_name: Some(column.to_string()),
            value: Some(Value::Number(value)),
        }
    }
}

/// An analyzed snapshot of a record collection.
///
/// Only [`crate::DataQualityAnalyzer`] builds datasets, which keeps the
/// derived counts in step with `records`, `columns` and `issues`. Cleaning
/// never edits a dataset; it produces a new one.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    id: String,
    name: String,
    source: DataSource,
    records: Vec<Record>,
    columns: Vec<String>,
    row_count: usize,
    column_count: usize,
    has_issues: bool,
    issues: Vec<Issue>,
    analyzed_at: DateTime<Utc>,
}

impl Dataset {
    pub(crate) fn new(
        id: String,
        name: String,
        source: DataSource,
        records: Vec<Record>,
        columns: Vec<String>,
        issues: Vec<Issue>,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            source,
            row_count: records.len(),
            column_count: columns.len(),
            has_issues: !issues.is_empty(),
            records,
            columns,
            issues,
            analyzed_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn has_issues(&self) -> bool {
        self.has_issues
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    /// Issues of one kind, in detection order.
    pub fn issues_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Give up the snapshot and keep its rows.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
