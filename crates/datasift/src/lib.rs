//! Data Quality Analysis Library
//!
//! Detects and repairs common data-quality problems in small tabular
//! datasets held in memory.
//!
//! # Overview
//!
//! - **Analysis**: Missing values, duplicate rows and Z-score outliers,
//!   reported as positional [`Issue`]s on an immutable [`Dataset`] snapshot
//! - **Cleaning**: Duplicate removal, missing-value filling and outlier row
//!   removal, followed by a fresh analysis of the result
//! - **Ingestion**: CSV (via Polars) and JSON uploads, plus web-crawl pages
//! - **Reporting**: Per-kind and per-column issue counts, completeness and
//!   cleaning summaries ready for JSON output
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datasift::{CleaningOptions, DataCleaner, DataQualityAnalyzer, ingest};
//!
//! let analyzer = DataQualityAnalyzer::default();
//! let dataset = ingest::load_file("customers.csv")?.analyze(&analyzer)?;
//!
//! for issue in dataset.issues() {
//!     println!("{}: {}", issue.kind, issue.description);
//! }
//!
//! let options = CleaningOptions::builder()
//!     .remove_duplicates(true)
//!     .fill_missing_values(true)
//!     .fill_value("Unknown")
//!     .build();
//!
//! let cleaned = DataCleaner::new(analyzer).clean(&dataset, &options)?;
//! println!("{} rows left, {} issues", cleaned.row_count(), cleaned.issues().len());
//! ```
//!
//! # Configuration
//!
//! Use [`AnalyzerConfig`] to tune outlier detection:
//!
//! ```rust,ignore
//! use datasift::{AnalyzerConfig, DataQualityAnalyzer};
//!
//! let config = AnalyzerConfig::builder()
//!     .min_outlier_samples(20)     // Need at least 20 numeric values
//!     .z_score_threshold(2.5)      // Flag beyond 2.5 standard deviations
//!     .build()?;
//!
//! let analyzer = DataQualityAnalyzer::new(config);
//! ```

pub mod cleaner;
pub mod config;
pub mod crawl;
pub mod error;
pub mod export;
pub mod identity;
pub mod ingest;
pub mod quality;
pub mod reporting;
pub mod statistics;
pub mod types;
pub mod utils;
pub mod workspace;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{
    AnalyzerConfig, AnalyzerConfigBuilder, CleaningOptions, CleaningOptionsBuilder,
    ConfigValidationError, DEFAULT_FILL_VALUE,
};
pub use crawl::CrawledPage;
pub use error::{DataQualityError, Result, ResultExt};
pub use identity::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use ingest::LoadedRecords;
pub use quality::DataQualityAnalyzer;
pub use reporting::{CleaningSummary, ColumnIssueSummary, IssueCounts, QualityReport};
pub use statistics::ColumnStatistics;
pub use types::{DataSource, Dataset, Issue, IssueKind, Record, Value};
pub use workspace::DatasetWorkspace;
