use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::identity::{IdGenerator, UuidGenerator};
use crate::statistics::column_outliers;
use crate::types::{DataSource, Dataset, Issue, Record, cell};
use crate::utils::canonical_row_key;

/// Turns a record collection into an analyzed [`Dataset`].
///
/// The analyzer holds no state between calls apart from its configuration
/// and identifier source, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct DataQualityAnalyzer {
    config: AnalyzerConfig,
    id_generator: Arc<dyn IdGenerator>,
}

impl Default for DataQualityAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl DataQualityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            id_generator: Arc::new(UuidGenerator),
        }
    }

    /// Replace the identifier source (e.g. with a deterministic sequence).
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `records` and wrap them in a new dataset snapshot.
    ///
    /// Columns are the keys of the first record in their original order.
    /// Issues are reported in pass order: missing values, duplicate rows,
    /// then outliers column by column.
    ///
    /// # Errors
    ///
    /// Fails only when a record holds a value that cannot be serialized for
    /// duplicate comparison (a non-finite number).
    pub fn analyze(
        &self,
        records: Vec<Record>,
        name: impl Into<String>,
        source: DataSource,
    ) -> Result<Dataset> {
        let name = name.into();
        let columns = Self::derive_columns(&records);
        let issues = self.detect_issues(&records, &columns)?;

        info!(
            "Analyzed '{}': {} rows, {} columns, {} issues",
            name,
            records.len(),
            columns.len(),
            issues.len()
        );

        Ok(Dataset::new(
            self.id_generator.next_id(),
            name,
            source,
            records,
            columns,
            issues,
            Utc::now(),
        ))
    }

    /// Column names taken from the first record; empty input has no columns.
    pub fn derive_columns(records: &[Record]) -> Vec<String> {
        records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Run all detection passes over `records`.
    pub fn detect_issues(&self, records: &[Record], columns: &[String]) -> Result<Vec<Issue>> {
        let mut issues = Self::detect_missing_values(records, columns);
        issues.extend(Self::detect_duplicates(records)?);
        issues.extend(self.detect_outliers(records, columns));
        Ok(issues)
    }

    fn detect_missing_values(records: &[Record], columns: &[String]) -> Vec<Issue> {
        let issues: Vec<Issue> = records
            .iter()
            .enumerate()
            .flat_map(|(row, record)| {
                columns
                    .iter()
                    .filter(move |column| cell(record, column).is_missing())
                    .map(move |column| Issue::missing(row, column))
            })
            .collect();

        debug!("Missing-value pass found {} cells", issues.len());
        issues
    }

    fn detect_duplicates(records: &[Record]) -> Result<Vec<Issue>> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut issues = Vec::new();

        for (row, record) in records.iter().enumerate() {
            let key = canonical_row_key(record, row)?;
            if !seen.insert(key) {
                issues.push(Issue::duplicate(row));
            }
        }

        debug!("Duplicate pass found {} repeated rows", issues.len());
        Ok(issues)
    }

    fn detect_outliers(&self, records: &[Record], columns: &[String]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for column in columns {
            let outliers = column_outliers(records, column, &self.config);
            if !outliers.is_empty() {
                debug!("Column '{}' has {} outliers", column, outliers.len());
            }
            issues.extend(
                outliers
                    .into_iter()
                    .map(|(row, value)| Issue::outlier(row, column, value)),
            );
        }

        issues
    }
}

static_assertions::assert_impl_all!(DataQualityAnalyzer: Send, Sync);
