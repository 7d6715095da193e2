//! Hotel Booking Cleaning Library
//!
//! Turns a raw hotel-booking export into an analysis-ready Polars
//! [`DataFrame`](polars::prelude::DataFrame).
//!
//! # Overview
//!
//! - **Loading**: delimited files with the common CSV null vocabulary
//! - **Missing values**: zero fill for `children`, `agent`, `company`; mode fill for `country`
//! - **Inconsistencies**: `"Undefined"` placeholders, guest totals, arrival dates
//! - **Duplicates**: exact duplicate rows dropped, first occurrence kept
//! - **Features**: calendar, stay, revenue, lead-time and loyalty columns
//! - **Validation**: advisory checks, reported but never enforced
//! - **Outliers**: IQR query on any numeric column
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use booking_processing::{Pipeline, init_logging};
//!
//! init_logging("info", false);
//!
//! let pipeline = Pipeline::builder().build()?;
//! let result = pipeline.run("data/hotel_bookings.csv")?;
//!
//! println!("{} rows after cleaning", result.data.height());
//! for finding in &result.summary.validation.findings {
//!     println!("{}", finding);
//! }
//!
//! let expensive = pipeline.detect_outliers(&result.data, "adr")?;
//! println!("{} adr outliers", expensive.count());
//! ```
//!
//! Each step is also available as a plain function, e.g.
//! [`clean_dataset`] or [`detect_outliers`].

pub mod cleaner;
pub mod config;
pub mod error;
pub mod features;
pub mod imputers;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod quality;
pub mod schema;
pub mod stages;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DuplicateRemover, InconsistencyFixer, InconsistencyReport};
pub use config::{ConfigValidationError, LoaderOptions, PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use features::{CalendarFeatures, FeatureEngineer};
pub use imputers::{MissingValueHandler, StatisticalImputer};
pub use loader::Loader;
pub use logging::init_logging;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate,
};
pub use quality::{IqrFence, OutlierDetector, OutlierReport, Validator};
pub use stages::{
    clean_dataset, detect_outliers, engineer_features, fix_inconsistencies,
    handle_missing_values, load_data, remove_duplicates, validate_data,
};
pub use types::{
    CleaningSummary, ColumnFill, FindingKind, LeadTimeCategory, PipelineResult, Season, Severity,
    ValidationFinding, ValidationReport,
};
