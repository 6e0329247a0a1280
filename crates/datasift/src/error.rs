//! Custom error types for the data-quality engine.
//!
//! This module provides the error hierarchy using `thiserror`. Analysis and
//! cleaning are pure computations, so the only engine-level failure is input
//! that cannot be interpreted at all; the remaining variants belong to the
//! outer collaborators (file loading, crawl naming, the dataset workspace).
//!
//! Errors are serializable so a UI layer can receive them as
//! `{ "code": ..., "message": ... }` and decide how to present them.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for datasift.
#[derive(Error, Debug)]
pub enum DataQualityError {
    /// A value cannot be canonically serialized for duplicate comparison.
    #[error("Row {row} has a value in column '{column}' that cannot be serialized for comparison")]
    UnserializableValue { row: usize, column: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input could be read but does not have a tabular shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file extension is not one of the supported formats.
    #[error("Unsupported file type '{0}'. Please upload CSV or JSON files.")]
    UnsupportedFileType(String),

    /// An operation needed the active dataset but none is selected.
    #[error("No active dataset")]
    NoActiveDataset,

    /// No dataset with the requested identity exists in the workspace.
    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper (CSV decoding).
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DataQualityError>,
    },
}

impl DataQualityError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DataQualityError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnserializableValue { .. } => "UNSERIALIZABLE_VALUE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::NoActiveDataset => "NO_ACTIVE_DATASET",
            Self::DatasetNotFound(_) => "DATASET_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Url(_) => "URL_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if the caller can recover by changing its input or selection.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig(_)
            | Self::UnsupportedFileType(_)
            | Self::NoActiveDataset
            | Self::DatasetNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Serialized as a struct with `code` and `message` fields.
impl Serialize for DataQualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DataQualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for datasift operations.
pub type Result<T> = std::result::Result<T, DataQualityError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DataQualityError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DataQualityError::Io(e).with_context(context))
    }
}
