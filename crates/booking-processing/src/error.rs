//! Error types for the booking cleaning pipeline.
//!
//! Stage-level problems (a missing or mistyped column) abort the run and are
//! reported through [`CleaningError`]. Per-row problems such as an impossible
//! arrival date never become errors; they degrade to absent values inside the
//! stage that found them.
//!
//! Errors serialize to a `{ code, message }` struct so a caller can forward
//! them to a report or UI without matching on every variant.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The source file could not be read or parsed.
    #[error("Failed to load dataset from '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A column a stage depends on is not present in the dataset.
    #[error("Stage '{stage}' requires column '{column}', which is missing")]
    Schema { stage: &'static str, column: String },

    /// A column is present but does not hold the kind of values a stage needs.
    #[error("Column '{column}' must be {expected} for stage '{stage}', found {found}")]
    WrongColumnType {
        stage: &'static str,
        column: String,
        expected: &'static str,
        found: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Build a [`CleaningError::Schema`] for a missing column.
    pub fn missing_column(stage: &'static str, column: impl Into<String>) -> Self {
        Self::Schema {
            stage,
            column: column.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for callers that dispatch on the kind of failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::WrongColumnType { .. } => "WRONG_COLUMN_TYPE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the dataset itself is structurally unfit for a stage.
    pub fn is_schema_error(&self) -> bool {
        match self {
            Self::Schema { .. } | Self::WrongColumnType { .. } => true,
            Self::WithContext { source, .. } => source.is_schema_error(),
            _ => false,
        }
    }

    /// Check if this error is recoverable by the caller, e.g. by loading a
    /// different file or fixing the configuration and invoking again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Load { .. } | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

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
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::missing_column("features", "adr").error_code(),
            "SCHEMA_ERROR"
        );
        assert_eq!(
            CleaningError::InvalidConfig("bad".to_string()).error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_is_recoverable() {
        let load = CleaningError::Load {
            path: PathBuf::from("missing.csv"),
            reason: "not found".to_string(),
        };
        assert!(load.is_recoverable());
        assert!(!CleaningError::missing_column("validation", "adr").is_recoverable());
    }

    #[test]
    fn test_schema_error_through_context() {
        let error = CleaningError::missing_column("missing_values", "country")
            .with_context("While imputing");
        assert!(error.is_schema_error());
        assert_eq!(error.error_code(), "SCHEMA_ERROR");
        assert!(error.to_string().contains("While imputing"));
        assert!(error.to_string().contains("country"));
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::missing_column("features", "lead_time");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("SCHEMA_ERROR"));
        assert!(json.contains("lead_time"));
    }

    #[test]
    fn test_load_error_message_names_path() {
        let error = CleaningError::Load {
            path: PathBuf::from("data/hotel_bookings.csv"),
            reason: "No such file".to_string(),
        };
        assert!(error.to_string().contains("data/hotel_bookings.csv"));
    }
}
