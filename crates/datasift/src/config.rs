//! Configuration types for analysis and cleaning.
//!
//! Both configurations use the builder pattern and deserialize from the JSON
//! a frontend sends, falling back to defaults for omitted fields.

use serde::{Deserialize, Serialize};

/// Fill text used when none (or an empty one) is configured.
pub const DEFAULT_FILL_VALUE: &str = "N/A";

/// Tuning for the outlier pass shared by the analyzer and the cleaner.
///
/// # Example
///
/// ```rust,ignore
/// use datasift::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .min_outlier_samples(20)
///     .z_score_threshold(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum number of numeric values a column needs before outliers are
    /// looked for. Default: 11
    pub min_outlier_samples: usize,

    /// Number of population standard deviations beyond which a value is an
    /// outlier. Default: 3.0
    pub z_score_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_outlier_samples: 11,
            z_score_threshold: 3.0,
        }
    }
}

impl AnalyzerConfig {
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.min_outlier_samples < 2 {
            return Err(ConfigValidationError::InvalidMinSamples(
                self.min_outlier_samples,
            ));
        }

        if !self.z_score_threshold.is_finite() || self.z_score_threshold <= 0.0 {
            return Err(ConfigValidationError::InvalidZScoreThreshold(
                self.z_score_threshold,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid minimum outlier samples: {0} (must be at least 2)")]
    InvalidMinSamples(usize),

    #[error("Invalid Z-score threshold: {0} (must be a positive number)")]
    InvalidZScoreThreshold(f64),
}

impl From<ConfigValidationError> for crate::error::DataQualityError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::DataQualityError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    min_outlier_samples: Option<usize>,
    z_score_threshold: Option<f64>,
}

impl AnalyzerConfigBuilder {
    /// Set how many numeric values a column needs for outlier detection.
    pub fn min_outlier_samples(mut self, samples: usize) -> Self {
        self.min_outlier_samples = Some(samples);
        self
    }

    /// Set the Z-score threshold.
    pub fn z_score_threshold(mut self, threshold: f64) -> Self {
        self.z_score_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        let defaults = AnalyzerConfig::default();
        let config = AnalyzerConfig {
            min_outlier_samples: self
                .min_outlier_samples
                .unwrap_or(defaults.min_outlier_samples),
            z_score_threshold: self.z_score_threshold.unwrap_or(defaults.z_score_threshold),
        };

        config.validate()?;
        Ok(config)
    }
}

/// The cleaning operations a caller enabled, plus the fill text.
///
/// Operations always run in the same order regardless of which are enabled:
/// duplicate removal, then missing-value fill, then outlier removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Drop every repeat of an already-seen row. Default: false
    pub remove_duplicates: bool,

    /// Replace missing cells with `fill_value`. Default: false
    pub fill_missing_values: bool,

    /// Text written into missing cells. Default: "N/A"
    pub fill_value: String,

    /// Drop rows that any column flags as an outlier. Default: false
    pub remove_outliers: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_duplicates: false,
            fill_missing_values: false,
            fill_value: DEFAULT_FILL_VALUE.to_string(),
            remove_outliers: false,
        }
    }
}

impl CleaningOptions {
    pub fn builder() -> CleaningOptionsBuilder {
        CleaningOptionsBuilder::default()
    }

    /// Every operation enabled, filling with the default text.
    pub fn all() -> Self {
        Self {
            remove_duplicates: true,
            fill_missing_values: true,
            remove_outliers: true,
            ..Self::default()
        }
    }

    /// The fill text actually written; an empty `fill_value` would leave the
    /// cell missing, so it falls back to [`DEFAULT_FILL_VALUE`].
    pub fn effective_fill_value(&self) -> &str {
        if self.fill_value.is_empty() {
            DEFAULT_FILL_VALUE
        } else {
            &self.fill_value
        }
    }

    /// Whether cleaning would change anything beyond re-analysis.
    pub fn has_any_operation(&self) -> bool {
        self.remove_duplicates || self.fill_missing_values || self.remove_outliers
    }
}

/// Builder for [`CleaningOptions`].
#[derive(Debug, Default)]
pub struct CleaningOptionsBuilder {
    options: CleaningOptions,
}

impl CleaningOptionsBuilder {
    pub fn remove_duplicates(mut self, enable: bool) -> Self {
        self.options.remove_duplicates = enable;
        self
    }

    pub fn fill_missing_values(mut self, enable: bool) -> Self {
        self.options.fill_missing_values = enable;
        self
    }

    pub fn fill_value(mut self, value: impl Into<String>) -> Self {
        self.options.fill_value = value.into();
        self
    }

    pub fn remove_outliers(mut self, enable: bool) -> Self {
        self.options.remove_outliers = enable;
        self
    }

    pub fn build(self) -> CleaningOptions {
        self.options
    }
}
