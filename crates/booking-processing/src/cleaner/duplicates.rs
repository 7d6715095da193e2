//! Exact duplicate removal.

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use tracing::info;

/// Collapses rows that are identical across every column.
pub struct DuplicateRemover;

impl DuplicateRemover {
    /// Drop exact duplicates, keeping the first occurrence and the original
    /// row order. Returns the deduplicated dataset and the number of rows
    /// removed.
    ///
    /// All columns present at call time take part in the comparison; absent
    /// values compare equal to each other.
    pub fn remove(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()
            .context("Failed to drop duplicate rows")?;
        let removed = before - df.height();

        info!("Removed {} duplicate rows.", removed);
        Ok((df, removed))
    }
}
