//! Report generation module.
//!
//! Summaries derived from an analyzed [`crate::Dataset`] or a cleaning run,
//! shaped for serialization to a UI or to `--json` CLI output.
//!
//! # Example
//!
//! ```rust,ignore
//! use datasift::reporting::QualityReport;
//!
//! let report = QualityReport::from_dataset(&dataset);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod summary;

pub use summary::{
    CleaningSummary, ColumnIssueSummary, IssueCounts, QualityReport, completeness,
    format_issue_location,
};
