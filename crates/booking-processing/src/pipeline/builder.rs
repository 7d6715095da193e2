//! The cleaning pipeline and its builder.

use crate::cleaner::{DuplicateRemover, InconsistencyFixer};
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::error::Result;
use crate::features::FeatureEngineer;
use crate::imputers::MissingValueHandler;
use crate::loader::Loader;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::quality::{OutlierDetector, OutlierReport, Validator};
use crate::types::{CleaningSummary, PipelineResult};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The booking cleaning pipeline.
///
/// Stages always run in the same order: missing values, inconsistencies,
/// duplicates, feature engineering, validation. Use [`Pipeline::builder()`]
/// to create one.
///
/// # Example
///
/// ```rust,ignore
/// use booking_processing::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().long_stay_nights(10).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run("data/hotel_bookings.csv")?;
///
/// println!("{}", serde_json::to_string_pretty(&result.summary)?);
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    loader: Loader,
    features: FeatureEngineer,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a booking file with the configured loader options.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        self.loader.load(path)
    }

    /// Load a booking file and run it through every stage.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        let path = path.as_ref();
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            0.0,
            format!("Loading {}", path.display()),
        ));

        let df = match self.load(path) {
            Ok(df) => df,
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Error loading data: {}", e);
                return Err(e);
            }
        };
        info!("Data loaded successfully from {}", path.display());
        self.report_progress(
            ProgressUpdate::new(CleaningStage::Loading, 1.0, "Data loaded").with_rows(df.height()),
        );

        self.process(df)
    }

    /// Run a loaded dataset through every stage.
    ///
    /// # Errors
    ///
    /// Fails with a schema error when a stage's required columns are
    /// missing. Validation findings never fail the run; they are returned
    /// in the summary.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Rows of `column` outside the IQR fence, using the configured
    /// multiplier. The dataset is not changed.
    pub fn detect_outliers(&self, df: &DataFrame, column: &str) -> Result<OutlierReport> {
        OutlierDetector::with_multiplier(self.config.iqr_multiplier)?.detect(df, column)
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage_started(&self, stage: CleaningStage, rows: usize) {
        self.report_progress(
            ProgressUpdate::new(stage, 0.0, format!("{}...", stage.display_name())).with_rows(rows),
        );
    }

    fn stage_finished(&self, stage: CleaningStage, message: impl Into<String>, rows: usize) {
        self.report_progress(ProgressUpdate::new(stage, 1.0, message).with_rows(rows));
    }

    fn process_internal(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting cleaning pipeline...");

        let mut summary = CleaningSummary::new();
        summary.rows_before = df.height();
        summary.columns_before = df.width();

        // Step 1: Missing values
        self.stage_started(CleaningStage::MissingValues, df.height());
        let (df, fills) = MissingValueHandler::handle(df)?;
        let filled: usize = fills.iter().map(|f| f.filled).sum();
        let message = format!("Filled {} missing values", filled);
        self.stage_finished(CleaningStage::MissingValues, message.clone(), df.height());
        summary.add_step(message);
        summary.fills = fills;

        // Step 2: Inconsistencies
        self.stage_started(CleaningStage::Inconsistencies, df.height());
        let (df, report) = InconsistencyFixer::fix(df)?;
        summary.placeholders_replaced = report.placeholders_replaced;
        summary.zero_guest_rows_dropped = report.zero_guest_rows_dropped;
        summary.unparseable_dates = report.unparseable_dates;
        summary.add_step(format!(
            "Replaced {} 'Undefined' values with 'Other'",
            report.placeholders_replaced
        ));
        let message = format!(
            "Dropped {} bookings without guests",
            report.zero_guest_rows_dropped
        );
        self.stage_finished(CleaningStage::Inconsistencies, message.clone(), df.height());
        summary.add_step(message);
        if report.unparseable_dates > 0 {
            summary.add_step(format!(
                "{} arrival dates could not be built",
                report.unparseable_dates
            ));
        }

        // Step 3: Duplicates
        self.stage_started(CleaningStage::Duplicates, df.height());
        let (df, removed) = DuplicateRemover::remove(df)?;
        summary.duplicates_removed = removed;
        let message = format!("Removed {} duplicate rows", removed);
        self.stage_finished(CleaningStage::Duplicates, message.clone(), df.height());
        summary.add_step(message);

        // Step 4: Features
        self.stage_started(CleaningStage::FeatureEngineering, df.height());
        let columns_before_features = df.width();
        let df = self.features.engineer(df)?;
        let message = format!(
            "Added {} feature columns",
            df.width().saturating_sub(columns_before_features)
        );
        self.stage_finished(CleaningStage::FeatureEngineering, message.clone(), df.height());
        summary.add_step(message);

        // Step 5: Validation
        self.stage_started(CleaningStage::Validation, df.height());
        let (df, validation) = Validator::validate(df)?;
        let message = if validation.passed() {
            "Validation passed".to_string()
        } else {
            format!("Validation found {} errors", validation.error_count())
        };
        self.stage_finished(CleaningStage::Validation, message.clone(), df.height());
        summary.add_step(message);
        summary.validation = validation;

        summary.rows_after = df.height();
        summary.columns_after = df.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete: {} -> {} rows, {} -> {} columns in {} ms",
            summary.rows_before,
            summary.rows_after,
            summary.columns_before,
            summary.columns_after,
            summary.duration_ms
        );

        Ok(PipelineResult { data: df, summary })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            loader: Loader::new(config.loader.clone()),
            features: FeatureEngineer::from_config(&config),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
