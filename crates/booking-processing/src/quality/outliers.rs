//! IQR outlier query.
//!
//! A diagnostic that never changes the dataset: it returns the rows that fall
//! outside the interquartile fence of one numeric column.

use crate::error::{CleaningError, Result};
use crate::utils::{f64_values, linear_quantile};
use polars::prelude::*;
use tracing::{debug, info};

const STAGE: &str = "outliers";

/// Interquartile fence of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFence {
    /// Compute the fence from present values. Returns `None` when there are
    /// no finite values to take quartiles of.
    pub fn from_values(values: &[Option<f64>], multiplier: f64) -> Option<Self> {
        let mut sorted: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = linear_quantile(&sorted, 0.25)?;
        let q3 = linear_quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// Strictly outside `[lower, upper]`.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Result of an outlier query on one column.
#[derive(Debug, Clone)]
pub struct OutlierReport {
    pub column: String,
    /// `None` when the column had no present values.
    pub fence: Option<IqrFence>,
    /// The outlying rows, with every column of the input.
    pub rows: DataFrame,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.rows.height()
    }
}

/// Flags rows outside the IQR fence of a numeric column.
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

impl OutlierDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different fence multiplier than the usual 1.5.
    pub fn with_multiplier(multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(CleaningError::InvalidConfig(format!(
                "IQR multiplier must be a positive finite number, got {}",
                multiplier
            )));
        }
        Ok(Self { multiplier })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Return the rows whose `column` value lies strictly outside the fence.
    ///
    /// Absent values are never outliers. The input is not modified.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column is missing or not numeric.
    pub fn detect(&self, df: &DataFrame, column: &str) -> Result<OutlierReport> {
        let values = f64_values(df, STAGE, column)?;
        let fence = IqrFence::from_values(&values, self.multiplier);

        let mask_values: Vec<bool> = match fence {
            Some(fence) => values
                .iter()
                .map(|v| v.is_some_and(|val| fence.is_outlier(val)))
                .collect(),
            None => vec![false; values.len()],
        };

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        let rows = df.filter(&mask)?;

        if let Some(fence) = fence {
            debug!(
                "{}: Q1={:.2}, Q3={:.2}, fence=[{:.2}, {:.2}]",
                column, fence.q1, fence.q3, fence.lower, fence.upper
            );
        }
        info!("{}: {} outliers detected.", column, rows.height());

        Ok(OutlierReport {
            column: column.to_string(),
            fence,
            rows,
        })
    }
}
