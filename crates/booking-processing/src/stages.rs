//! One function per cleaning step, with default settings.
//!
//! These are thin wrappers over the stage types for callers that do not need
//! a configured [`Pipeline`](crate::Pipeline) or a summary.

use crate::cleaner::{DuplicateRemover, InconsistencyFixer};
use crate::error::Result;
use crate::features::FeatureEngineer;
use crate::imputers::MissingValueHandler;
use crate::loader::Loader;
use crate::pipeline::Pipeline;
use crate::quality::{OutlierDetector, Validator};
use polars::prelude::*;
use std::path::Path;

/// Load a booking file. Failure is logged and reported as `None`.
pub fn load_data(path: impl AsRef<Path>) -> Option<DataFrame> {
    Loader::default().try_load(path)
}

pub fn handle_missing_values(df: DataFrame) -> Result<DataFrame> {
    MissingValueHandler::handle(df).map(|(df, _)| df)
}

pub fn fix_inconsistencies(df: DataFrame) -> Result<DataFrame> {
    InconsistencyFixer::fix(df).map(|(df, _)| df)
}

pub fn remove_duplicates(df: DataFrame) -> Result<DataFrame> {
    DuplicateRemover::remove(df).map(|(df, _)| df)
}

/// Rows of `column` outside the 1.5 x IQR fence.
pub fn detect_outliers(df: &DataFrame, column: &str) -> Result<DataFrame> {
    OutlierDetector::new().detect(df, column).map(|report| report.rows)
}

pub fn engineer_features(df: DataFrame) -> Result<DataFrame> {
    FeatureEngineer::new().engineer(df)
}

/// Log validation findings and return the dataset unchanged.
pub fn validate_data(df: DataFrame) -> Result<DataFrame> {
    Validator::validate(df).map(|(df, _)| df)
}

/// Run every cleaning stage in order with default settings.
pub fn clean_dataset(df: DataFrame) -> Result<DataFrame> {
    let pipeline = Pipeline::builder().build()?;
    pipeline.process(df).map(|result| result.data)
}
