//! Data quality analysis module.
//!
//! This module turns raw records into a [`crate::Dataset`] annotated with
//! missing-value, duplicate-row and outlier issues.

mod analyzer;

pub use analyzer::DataQualityAnalyzer;
