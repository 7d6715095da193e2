//! Progress reporting for the cleaning pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use booking_processing::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .process(df)?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the source file
    Loading,
    /// Filling absent values
    MissingValues,
    /// Placeholder normalization, guest totals and arrival dates
    Inconsistencies,
    /// Dropping exact duplicate rows
    Duplicates,
    /// Appending derived columns
    FeatureEngineering,
    /// Advisory checks
    Validation,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::MissingValues => "Handling Missing Values",
            Self::Inconsistencies => "Fixing Inconsistencies",
            Self::Duplicates => "Removing Duplicates",
            Self::FeatureEngineering => "Engineering Features",
            Self::Validation => "Validating Data",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the whole run this stage accounts for (0.0 - 1.0).
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.10,
            Self::MissingValues => 0.15,
            Self::Inconsistencies => 0.25,
            Self::Duplicates => 0.15,
            Self::FeatureEngineering => 0.25,
            Self::Validation => 0.10,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::MissingValues => 0.10,
            Self::Inconsistencies => 0.25,
            Self::Duplicates => 0.50,
            Self::FeatureEngineering => 0.65,
            Self::Validation => 0.90,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    pub message: String,

    /// Rows in the dataset when the update was emitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

impl ProgressUpdate {
    pub fn new(stage: CleaningStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            rows: None,
        }
    }

    /// Attach the current row count.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
            rows: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
            rows: None,
        }
    }
}

/// Receives progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so a pipeline can be moved to a
/// worker thread while the reporter forwards updates elsewhere.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WORKING_STAGES: [CleaningStage; 6] = [
        CleaningStage::Loading,
        CleaningStage::MissingValues,
        CleaningStage::Inconsistencies,
        CleaningStage::Duplicates,
        CleaningStage::FeatureEngineering,
        CleaningStage::Validation,
    ];

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(CleaningStage::Duplicates, 0.5, "Deduplicating");
        assert_eq!(update.stage, CleaningStage::Duplicates);
        assert_eq!(update.stage_progress, 0.5);
        assert!((update.progress - 0.575).abs() < 1e-6);
        assert!(update.rows.is_none());
    }

    #[test]
    fn test_progress_update_clamps() {
        let update = ProgressUpdate::new(CleaningStage::Validation, 4.0, "overshoot");
        assert_eq!(update.stage_progress, 1.0);
        assert!(update.progress <= 1.0);
    }

    #[test]
    fn test_stage_weights_sum() {
        let total_weight: f32 = WORKING_STAGES.iter().map(|s| s.weight()).sum();
        assert!((total_weight - 1.0).abs() < 0.01, "Weights should sum to ~1.0");
    }

    #[test]
    fn test_base_progress_follows_weights() {
        for pair in WORKING_STAGES.windows(2) {
            let expected = pair[0].base_progress() + pair[0].weight();
            assert!(
                (pair[1].base_progress() - expected).abs() < 1e-6,
                "{:?} should start where {:?} ends",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(CleaningStage::Loading, 0.5, "Test"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_progress_update_json() {
        let update = ProgressUpdate::new(CleaningStage::FeatureEngineering, 1.0, "Features added")
            .with_rows(42);
        let json = serde_json::to_string(&update).unwrap();

        assert!(json.contains("\"stage\":\"feature_engineering\""));
        assert!(json.contains("\"rows\":42"));

        let without_rows = serde_json::to_string(&ProgressUpdate::failed("boom")).unwrap();
        assert!(!without_rows.contains("rows"));
    }
}
