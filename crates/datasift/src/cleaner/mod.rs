//! Data cleaning module.
//!
//! This module provides functionality for:
//! - Removing duplicate rows
//! - Filling missing values with a fixed text
//! - Removing rows with Z-score outliers
//!
//! Cleaning never edits the input dataset. It transforms a copy of the
//! records and hands the result back to the analyzer, so the returned
//! dataset's issues always describe the cleaned rows.

mod operations;

use std::time::Instant;
use tracing::info;

use crate::config::CleaningOptions;
use crate::error::Result;
use crate::quality::DataQualityAnalyzer;
use crate::reporting::CleaningSummary;
use crate::types::Dataset;

/// Applies user-selected cleaning operations and re-analyzes the result.
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    analyzer: DataQualityAnalyzer,
}

impl DataCleaner {
    /// Create a cleaner that re-analyzes with `analyzer`.
    ///
    /// The analyzer's configuration also drives outlier removal, so removal
    /// and detection agree on what an outlier is.
    pub fn new(analyzer: DataQualityAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &DataQualityAnalyzer {
        &self.analyzer
    }

    /// Clean `dataset` and return the re-analyzed result.
    ///
    /// The result is named `"<name> (cleaned)"`, keeps the original source
    /// and gets a new identity. With no operation enabled the records pass
    /// through unchanged and are still re-analyzed.
    pub fn clean(&self, dataset: &Dataset, options: &CleaningOptions) -> Result<Dataset> {
        self.clean_with_summary(dataset, options)
            .map(|(cleaned, _)| cleaned)
    }

    /// Like [`DataCleaner::clean`], also reporting what each step changed.
    pub fn clean_with_summary(
        &self,
        dataset: &Dataset,
        options: &CleaningOptions,
    ) -> Result<(Dataset, CleaningSummary)> {
        let start = Instant::now();
        let mut summary = CleaningSummary {
            rows_before: dataset.row_count(),
            issues_before: dataset.issues().len(),
            ..CleaningSummary::default()
        };

        info!("Cleaning '{}' with {:?}", dataset.name(), options);

        let mut records = dataset.records().to_vec();

        // 1. Remove duplicate rows
        if options.remove_duplicates {
            let (kept, removed) = operations::remove_duplicates(records)?;
            records = kept;
            summary.duplicates_removed = removed;
        }

        // 2. Fill missing values
        if options.fill_missing_values {
            summary.cells_filled = operations::fill_missing(
                &mut records,
                dataset.columns(),
                options.effective_fill_value(),
            );
        }

        // 3. Remove outliers, against the statistics of the current rows
        if options.remove_outliers {
            let (kept, removed) = operations::remove_outliers(
                records,
                dataset.columns(),
                self.analyzer.config(),
            );
            records = kept;
            summary.outliers_removed = removed;
        }

        let cleaned = self.analyzer.analyze(
            records,
            format!("{} (cleaned)", dataset.name()),
            dataset.source(),
        )?;

        summary.rows_after = cleaned.row_count();
        summary.rows_removed = summary.rows_before - summary.rows_after;
        summary.issues_after = cleaned.issues().len();
        summary.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Cleaned '{}': {} rows remaining ({} removed), {} issues remaining",
            dataset.name(),
            summary.rows_after,
            summary.rows_removed,
            summary.issues_after
        );

        Ok((cleaned, summary))
    }
}

static_assertions::assert_impl_all!(DataCleaner: Send, Sync);
