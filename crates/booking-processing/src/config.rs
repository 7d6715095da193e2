//! Configuration types for the cleaning pipeline.
//!
//! Defaults reproduce the fixed hotel-booking rules; the builder exists so a
//! caller can load an unusual file layout or tune the feature buckets
//! without forking the stages.

use serde::{Deserialize, Serialize};

/// Strings read as absent values by the loader.
///
/// Mirrors the null vocabulary most CSV exports use, including the `NULL`
/// markers found in the `agent` and `company` columns and `NA` in `children`.
pub const DEFAULT_NULL_MARKERS: [&str; 17] = [
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null", "1.#IND", "1.#QNAN",
];

/// Options for reading a delimited booking file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderOptions {
    /// Field separator byte.
    /// Default: b','
    pub delimiter: u8,

    /// Whether the first line holds column names.
    /// Default: true
    pub has_header: bool,

    /// Number of rows used to infer column types. `None` scans the whole file.
    /// Default: Some(10_000)
    pub infer_schema_length: Option<usize>,

    /// Cell contents treated as absent values.
    pub null_markers: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            infer_schema_length: Some(10_000),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use booking_processing::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .long_stay_nights(10)
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How the source file is parsed.
    pub loader: LoaderOptions,

    /// Fence multiplier for the IQR outlier query.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// A stay is long when it exceeds this many nights.
    /// Default: 7
    pub long_stay_nights: i64,

    /// Upper bound (inclusive) of the `Short` lead-time bucket, in days.
    /// Default: 7
    pub short_lead_days: f64,

    /// Upper bound (inclusive) of the `Medium` lead-time bucket, in days.
    /// Default: 30
    pub medium_lead_days: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loader: LoaderOptions::default(),
            iqr_multiplier: 1.5,
            long_stay_nights: 7,
            short_lead_days: 7.0,
            medium_lead_days: 30.0,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(ConfigValidationError::InvalidMultiplier(self.iqr_multiplier));
        }

        if self.long_stay_nights < 0 {
            return Err(ConfigValidationError::NegativeStayThreshold(
                self.long_stay_nights,
            ));
        }

        if !(self.short_lead_days.is_finite() && self.medium_lead_days.is_finite())
            || self.short_lead_days > self.medium_lead_days
        {
            return Err(ConfigValidationError::InvalidLeadTimeBuckets {
                short: self.short_lead_days,
                medium: self.medium_lead_days,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid IQR multiplier: {0} (must be a positive finite number)")]
    InvalidMultiplier(f64),

    #[error("Invalid long-stay threshold: {0} (must not be negative)")]
    NegativeStayThreshold(i64),

    #[error("Invalid lead-time buckets: short ({short}) must not exceed medium ({medium})")]
    InvalidLeadTimeBuckets { short: f64, medium: f64 },
}

impl From<ConfigValidationError> for crate::error::CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    loader: Option<LoaderOptions>,
    iqr_multiplier: Option<f64>,
    long_stay_nights: Option<i64>,
    short_lead_days: Option<f64>,
    medium_lead_days: Option<f64>,
}

impl PipelineConfigBuilder {
    /// Replace the loader options wholesale.
    pub fn loader(mut self, options: LoaderOptions) -> Self {
        self.loader = Some(options);
        self
    }

    /// Set the IQR fence multiplier used by the outlier query.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the number of nights above which a stay counts as long.
    pub fn long_stay_nights(mut self, nights: i64) -> Self {
        self.long_stay_nights = Some(nights);
        self
    }

    /// Set the inclusive upper bounds of the `Short` and `Medium` lead-time buckets.
    pub fn lead_time_buckets(mut self, short: f64, medium: f64) -> Self {
        self.short_lead_days = Some(short);
        self.medium_lead_days = Some(medium);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            loader: self.loader.unwrap_or(defaults.loader),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            long_stay_nights: self.long_stay_nights.unwrap_or(defaults.long_stay_nights),
            short_lead_days: self.short_lead_days.unwrap_or(defaults.short_lead_days),
            medium_lead_days: self.medium_lead_days.unwrap_or(defaults.medium_lead_days),
        };

        config.validate()?;
        Ok(config)
    }
}
