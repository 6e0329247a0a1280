//! Column statistics for Z-score outlier detection.
//!
//! Population formulas throughout: the variance divides by `N`, not `N - 1`.

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::types::{Record, cell};

/// Mean and population standard deviation of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStatistics {
    /// Compute statistics over `values`, or `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = population_std_dev(values, mean);
        Some(Self {
            count: values.len(),
            mean,
            std_dev,
        })
    }

    /// Distance from the mean in standard deviations.
    ///
    /// A constant column has no spread, so every value scores `0.0`.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean).abs() / self.std_dev
        }
    }

    /// `|value - mean| > threshold * std_dev`.
    pub fn is_outlier(&self, value: f64, threshold: f64) -> bool {
        (value - self.mean).abs() > threshold * self.std_dev
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation around a precomputed mean.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coerced numeric values of a column, paired with their row index.
///
/// Rows whose value cannot be coerced are left out.
pub fn numeric_column(records: &[Record], column: &str) -> Vec<(usize, f64)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(row, record)| cell(record, column).as_numeric().map(|v| (row, v)))
        .collect()
}

/// Statistics for a column, if it has enough numeric values to be judged.
pub fn gated_statistics(
    numeric: &[(usize, f64)],
    config: &AnalyzerConfig,
) -> Option<ColumnStatistics> {
    if numeric.len() < config.min_outlier_samples {
        return None;
    }
    let values: Vec<f64> = numeric.iter().map(|(_, v)| *v).collect();
    ColumnStatistics::from_values(&values)
}

/// Rows of `column` whose coerced value lies beyond the Z-score threshold.
///
/// Returns an empty list when the column has fewer numeric values than
/// `config.min_outlier_samples`.
pub fn column_outliers(
    records: &[Record],
    column: &str,
    config: &AnalyzerConfig,
) -> Vec<(usize, f64)> {
    let numeric = numeric_column(records, column);
    let Some(stats) = gated_statistics(&numeric, config) else {
        return Vec::new();
    };

    tracing::debug!(
        column,
        count = stats.count,
        mean = stats.mean,
        std_dev = stats.std_dev,
        "Computed column statistics"
    );

    numeric
        .into_iter()
        .filter(|(_, v)| stats.is_outlier(*v, config.z_score_threshold))
        .collect()
}
