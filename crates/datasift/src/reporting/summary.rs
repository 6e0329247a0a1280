use serde::Serialize;

use crate::types::{Dataset, Issue, IssueKind, cell};

/// Number of issues of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub missing: usize,
    pub duplicate: usize,
    pub outlier: usize,
    pub format: usize,
}

impl IssueCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.kind {
                IssueKind::Missing => counts.missing += 1,
                IssueKind::Duplicate => counts.duplicate += 1,
                IssueKind::Outlier => counts.outlier += 1,
                IssueKind::Format => counts.format += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.missing + self.duplicate + self.outlier + self.format
    }
}

/// Per-column issue counts. Duplicate issues carry no column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnIssueSummary {
    pub column: String,
    pub missing: usize,
    pub outliers: usize,
}

/// Overview of a dataset's quality, for a report view or `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub dataset_id: String,
    pub dataset_name: String,
    pub source: String,
    pub row_count: usize,
    pub column_count: usize,
    pub total_issues: usize,
    pub issue_counts: IssueCounts,
    /// Columns in dataset order.
    pub columns: Vec<ColumnIssueSummary>,
    /// Share of non-missing cells (0.0 - 1.0); 1.0 for an empty dataset.
    pub completeness: f64,
}

impl QualityReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let columns = dataset
            .columns()
            .iter()
            .map(|column| {
                let mut summary = ColumnIssueSummary {
                    column: column.clone(),
                    missing: 0,
                    outliers: 0,
                };
                for issue in dataset.issues() {
                    if issue.column_name.as_deref() != Some(column.as_str()) {
                        continue;
                    }
                    match issue.kind {
                        IssueKind::Missing => summary.missing += 1,
                        IssueKind::Outlier => summary.outliers += 1,
                        _ => {}
                    }
                }
                summary
            })
            .collect();

        Self {
            dataset_id: dataset.id().to_string(),
            dataset_name: dataset.name().to_string(),
            source: dataset.source().to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            total_issues: dataset.issues().len(),
            issue_counts: IssueCounts::from_issues(dataset.issues()),
            columns,
            completeness: completeness(dataset),
        }
    }
}

/// Share of cells (rows x known columns) that are not missing.
pub fn completeness(dataset: &Dataset) -> f64 {
    let total = dataset.row_count() * dataset.column_count();
    if total == 0 {
        return 1.0;
    }

    let missing = dataset
        .records()
        .iter()
        .flat_map(|record| {
            dataset
                .columns()
                .iter()
                .filter(move |column| cell(record, column).is_missing())
        })
        .count();

    (total - missing) as f64 / total as f64
}

/// What a cleaning run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,
    pub duplicates_removed: usize,
    pub cells_filled: usize,
    pub outliers_removed: usize,
    pub issues_before: usize,
    pub issues_after: usize,
    pub duration_ms: u64,
}

/// Human-readable location of an issue: `Row 3, Column: age, Value: 212`.
///
/// Rows are shown one-based. Issues without a row have no location.
pub fn format_issue_location(issue: &Issue) -> Option<String> {
    let row = issue.row_index?;
    let mut location = format!("Row {}", row + 1);
    if let Some(column) = &issue.column_name {
        location.push_str(&format!(", Column: {column}"));
    }
    if let Some(value) = &issue.value {
        location.push_str(&format!(", Value: {value}"));
    }
    Some(location)
}
