//! Missing-value stage.
//!
//! `children`, `agent` and `company` default to `0`; `country` takes the
//! column mode. Every other column is passed through untouched.

mod statistical;

pub use statistical::StatisticalImputer;

use crate::error::Result;
use crate::schema::{AGENT, CHILDREN, COMPANY, COUNTRY, MISSING_VALUE_COLUMNS};
use crate::types::ColumnFill;
use crate::utils::require_columns;
use polars::prelude::*;
use tracing::{debug, info};

const STAGE: &str = "missing_values";

/// Fills absent values in the booking columns that have a domain default.
pub struct MissingValueHandler;

impl MissingValueHandler {
    /// Fill absent values and return the new dataset with the fills performed.
    ///
    /// # Errors
    ///
    /// Returns a schema error if any of `children`, `country`, `agent` or
    /// `company` is missing.
    pub fn handle(df: DataFrame) -> Result<(DataFrame, Vec<ColumnFill>)> {
        require_columns(&df, STAGE, &MISSING_VALUE_COLUMNS)?;

        let mut df = df;
        let mut fills = Vec::new();

        for col_name in [CHILDREN, AGENT, COMPANY] {
            if let Some(fill) = StatisticalImputer::fill_zero(&mut df, col_name)? {
                debug!("Filled {} missing '{}' values with 0", fill.filled, col_name);
                fills.push(fill);
            }
        }

        if let Some(fill) = StatisticalImputer::fill_mode(&mut df, COUNTRY)? {
            debug!(
                "Filled {} missing '{}' values with mode '{}'",
                fill.filled, COUNTRY, fill.value
            );
            fills.push(fill);
        }

        let total: usize = fills.iter().map(|f| f.filled).sum();
        info!(
            "Filled {} missing values across {} columns",
            total,
            fills.len()
        );

        Ok((df, fills))
    }
}
