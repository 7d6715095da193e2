//! Column fill primitives: constant zero and mode.

use crate::error::Result;
use crate::types::ColumnFill;
use crate::utils::{is_numeric_dtype, string_mode};
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical fills for absent values in a single column.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Replace absent values with `0`.
    ///
    /// Numeric columns keep their dtype. Any other column is first cast to
    /// `Float64`; text that does not parse as a number becomes absent and is
    /// then filled too.
    pub fn fill_zero(df: &mut DataFrame, col_name: &str) -> Result<Option<ColumnFill>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let series = column.as_materialized_series();

        let numeric = if is_numeric_dtype(series.dtype()) {
            series.clone()
        } else {
            debug!(
                "Casting '{}' from {} to Float64 before zero fill",
                col_name,
                series.dtype()
            );
            series.cast(&DataType::Float64)?
        };

        let missing = numeric.null_count();
        let filled = numeric.fill_null(FillNullStrategy::Zero)?;
        df.replace(col_name, filled)?;

        Ok((missing > 0).then(|| ColumnFill {
            column: col_name.to_string(),
            filled: missing,
            value: "0".to_string(),
        }))
    }

    /// Replace absent values with the column's most frequent value.
    ///
    /// Ties go to the lexicographically smallest value. The column keeps its
    /// dtype. A column with no present values is left untouched.
    pub fn fill_mode(df: &mut DataFrame, col_name: &str) -> Result<Option<ColumnFill>> {
        let Ok(column) = df.column(col_name) else {
            return Ok(None);
        };
        let series = column.as_materialized_series();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }

        let Some(mode_val) = string_mode(series) else {
            warn!(
                "Column '{}' has no present values; cannot take its mode",
                col_name
            );
            return Ok(None);
        };

        let str_series = series.cast(&DataType::String)?;
        let values: Vec<Option<String>> = str_series
            .str()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(mode_val.as_str()).to_string()))
            .collect();
        let filled = Series::new(series.name().clone(), values).cast(series.dtype())?;
        df.replace(col_name, filled)?;

        Ok(Some(ColumnFill {
            column: col_name.to_string(),
            filled: missing,
            value: mode_val,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_zero_keeps_integer_dtype() {
        let mut df = df![
            "agent" => [Some(9i64), None, Some(240)],
        ]
        .unwrap();

        let fill = StatisticalImputer::fill_zero(&mut df, "agent").unwrap().unwrap();
        assert_eq!(fill.filled, 1);

        let agent = df.column("agent").unwrap();
        assert_eq!(agent.dtype(), &DataType::Int64);
        assert_eq!(agent.null_count(), 0);
        assert_eq!(agent.get(1).unwrap().try_extract::<i64>().unwrap(), 0);
    }

    #[test]
    fn test_fill_zero_casts_text() {
        let mut df = df![
            "company" => [Some("40"), None, Some("n/a")],
        ]
        .unwrap();

        StatisticalImputer::fill_zero(&mut df, "company").unwrap();

        let company = df.column("company").unwrap();
        assert_eq!(company.dtype(), &DataType::Float64);
        assert_eq!(company.null_count(), 0);
        assert_eq!(company.get(0).unwrap().try_extract::<f64>().unwrap(), 40.0);
        assert_eq!(company.get(2).unwrap().try_extract::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn test_fill_zero_no_nulls_reports_nothing() {
        let mut df = df!["children" => [0i64, 1, 2]].unwrap();
        assert!(StatisticalImputer::fill_zero(&mut df, "children")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_fill_mode_uses_most_frequent() {
        let mut df = df![
            "country" => [Some("PRT"), None, Some("GBR"), Some("PRT"), None],
        ]
        .unwrap();

        let fill = StatisticalImputer::fill_mode(&mut df, "country")
            .unwrap()
            .unwrap();
        assert_eq!(fill.value, "PRT");
        assert_eq!(fill.filled, 2);

        let country = df.column("country").unwrap();
        assert_eq!(country.null_count(), 0);
        assert_eq!(country.as_materialized_series().str().unwrap().get(1), Some("PRT"));
        assert_eq!(country.as_materialized_series().str().unwrap().get(2), Some("GBR"));
    }

    #[test]
    fn test_fill_mode_keeps_numeric_dtype() {
        let mut df = df![
            "country" => [Some(351i64), None, Some(44), Some(351)],
        ]
        .unwrap();

        let fill = StatisticalImputer::fill_mode(&mut df, "country")
            .unwrap()
            .unwrap();
        assert_eq!(fill.value, "351");

        let country = df.column("country").unwrap();
        assert_eq!(country.dtype(), &DataType::Int64);
        assert_eq!(country.get(1).unwrap().try_extract::<i64>().unwrap(), 351);
        assert_eq!(country.get(2).unwrap().try_extract::<i64>().unwrap(), 44);
    }

    #[test]
    fn test_fill_mode_all_null_is_left_alone() {
        let mut df = df![
            "country" => [None::<&str>, None],
        ]
        .unwrap();

        assert!(StatisticalImputer::fill_mode(&mut df, "country")
            .unwrap()
            .is_none());
        assert_eq!(df.column("country").unwrap().null_count(), 2);
    }
}
