//! Shared column helpers for the cleaning stages.
//!
//! Stages read typed values out of a [`DataFrame`] through these helpers so
//! that a missing or mistyped column is always reported the same way.

use crate::error::{CleaningError, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

// =============================================================================
// Column Access
// =============================================================================

/// Fail with a schema error unless every column in `names` is present.
pub fn require_columns(df: &DataFrame, stage: &'static str, names: &[&str]) -> Result<()> {
    for name in names {
        if df.column(name).is_err() {
            return Err(CleaningError::missing_column(stage, *name));
        }
    }
    Ok(())
}

/// Fetch a column as a materialized series, or report it missing.
pub fn require_series(df: &DataFrame, stage: &'static str, name: &str) -> Result<Series> {
    df.column(name)
        .map(|col| col.as_materialized_series().clone())
        .map_err(|_| CleaningError::missing_column(stage, name))
}

/// Read a numeric column as `f64` values.
///
/// Booleans are accepted and read as `0.0` / `1.0`.
pub fn f64_values(df: &DataFrame, stage: &'static str, name: &str) -> Result<Vec<Option<f64>>> {
    let series = require_series(df, stage, name)?;
    if !(is_numeric_dtype(series.dtype()) || series.dtype() == &DataType::Boolean) {
        return Err(wrong_type(stage, name, "numeric", series.dtype()));
    }
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

/// Read a numeric column as `i64` values.
///
/// Integer columns are read exactly. Float values that are fractional or
/// outside the `i64` range read as absent.
pub fn i64_values(df: &DataFrame, stage: &'static str, name: &str) -> Result<Vec<Option<i64>>> {
    let series = require_series(df, stage, name)?;
    if !is_float_dtype(series.dtype()) {
        if !(is_numeric_dtype(series.dtype()) || series.dtype() == &DataType::Boolean) {
            return Err(wrong_type(stage, name, "numeric", series.dtype()));
        }
        let int_series = series.cast(&DataType::Int64)?;
        return Ok(int_series.i64()?.into_iter().collect());
    }

    Ok(f64_values(df, stage, name)?
        .into_iter()
        .map(|v| {
            v.filter(|x| x.fract() == 0.0 && *x >= i64::MIN as f64 && *x < i64::MAX as f64)
                .map(|x| x as i64)
        })
        .collect())
}

/// Row-wise sum of numeric columns, absent when any operand is absent.
///
/// Integer sources sum to an `Int64` series where an overflowing sum is
/// absent. If any source is a float column the sum is `Float64`.
pub fn row_sum(
    df: &DataFrame,
    stage: &'static str,
    name: &str,
    columns: &[&str],
) -> Result<Series> {
    let mut any_float = false;
    for col_name in columns {
        let series = require_series(df, stage, col_name)?;
        if !(is_numeric_dtype(series.dtype()) || series.dtype() == &DataType::Boolean) {
            return Err(wrong_type(stage, col_name, "numeric", series.dtype()));
        }
        any_float |= is_float_dtype(series.dtype());
    }

    if any_float {
        let mut sums: Vec<Option<f64>> = vec![Some(0.0); df.height()];
        for col_name in columns {
            for (sum, value) in sums.iter_mut().zip(f64_values(df, stage, col_name)?) {
                *sum = sum
                    .zip(value)
                    .map(|(s, v)| s + v)
                    .filter(|s| s.is_finite());
            }
        }
        return Ok(Series::new(name.into(), sums));
    }

    let mut sums: Vec<Option<i64>> = vec![Some(0); df.height()];
    for col_name in columns {
        for (sum, value) in sums.iter_mut().zip(i64_values(df, stage, col_name)?) {
            *sum = sum.zip(value).and_then(|(s, v)| s.checked_add(v));
        }
    }
    Ok(Series::new(name.into(), sums))
}

/// Read any column as text. Non-string values are rendered with their
/// display representation.
pub fn string_values(
    df: &DataFrame,
    stage: &'static str,
    name: &str,
) -> Result<Vec<Option<String>>> {
    let series = require_series(df, stage, name)?;
    let str_series = series.cast(&DataType::String)?;
    Ok(str_series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Read a `Date` column as calendar dates.
pub fn date_values(
    df: &DataFrame,
    stage: &'static str,
    name: &str,
) -> Result<Vec<Option<NaiveDate>>> {
    let series = require_series(df, stage, name)?;
    if series.dtype() != &DataType::Date {
        return Err(wrong_type(stage, name, "a date", series.dtype()));
    }
    let days = series.cast(&DataType::Int32)?;
    Ok(days
        .i32()?
        .into_iter()
        .map(|v| v.and_then(days_to_date))
        .collect())
}

fn wrong_type(stage: &'static str, name: &str, expected: &'static str, found: &DataType) -> CleaningError {
    CleaningError::WrongColumnType {
        stage,
        column: name.to_string(),
        expected,
        found: found.to_string(),
    }
}

// =============================================================================
// Dates
// =============================================================================

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Polars stores dates as days since the Unix epoch.
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Inverse of [`date_to_days`].
pub fn days_to_date(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Build a `Date` series from optional calendar dates.
pub fn date_series(name: &str, dates: &[Option<NaiveDate>]) -> PolarsResult<Series> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(date_to_days)).collect();
    Series::new(name.into(), days).cast(&DataType::Date)
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse an English month name into its number (1-12).
///
/// Accepts full names and three-letter abbreviations in any case, as well as
/// the numbers `1` to `12`.
pub fn parse_month(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Most frequent non-null value of a column, rendered as text.
///
/// Ties are broken by picking the lexicographically smallest value, so the
/// result does not depend on row order or hash iteration order.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: HashMap<&str, usize> = HashMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val).or_insert(0) += 1;
    }

    value_counts
        .into_iter()
        .max_by(|(a_val, a_count), (b_val, b_count)| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(val, _)| val.to_string())
}

/// Quantile with linear interpolation between closest ranks.
///
/// `sorted` must be ascending and free of NaN. Returns `None` when empty.
pub fn linear_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
        assert!(is_float_dtype(&DataType::Float32));
        assert!(!is_float_dtype(&DataType::Int64));
    }

    #[test]
    fn test_require_columns_reports_first_missing() {
        let df = df!["adr" => [1.0, 2.0]].unwrap();
        let err = require_columns(&df, "features", &["adr", "lead_time"]).unwrap_err();
        assert!(matches!(
            err,
            CleaningError::Schema { stage: "features", ref column } if column == "lead_time"
        ));
    }

    #[test]
    fn test_f64_values_rejects_text() {
        let df = df!["adr" => ["cheap", "pricey"]].unwrap();
        let err = f64_values(&df, "validation", "adr").unwrap_err();
        assert_eq!(err.error_code(), "WRONG_COLUMN_TYPE");
    }

    #[test]
    fn test_i64_values_from_floats() {
        let df = df!["children" => [Some(1.0), None, Some(2.0)]].unwrap();
        let values = i64_values(&df, "test", "children").unwrap();
        assert_eq!(values, vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn test_i64_values_rejects_fractions_and_huge_floats() {
        let df = df!["children" => [0.5, 1e19, -3.0, f64::NAN]].unwrap();
        let values = i64_values(&df, "test", "children").unwrap();
        assert_eq!(values, vec![None, None, Some(-3), None]);
    }

    #[test]
    fn test_row_sum_integers_stay_integer() {
        let df = df![
            "week" => [Some(3i64), None, Some(i64::MAX)],
            "weekend" => [1i32, 2, 1],
        ]
        .unwrap();
        let sum = row_sum(&df, "test", "nights", &["week", "weekend"]).unwrap();

        assert_eq!(sum.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = sum.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(4), None, None]);
    }

    #[test]
    fn test_row_sum_with_float_column() {
        let df = df!["adults" => [0i64, 2], "children" => [0.5, 0.0]].unwrap();
        let sum = row_sum(&df, "test", "guests", &["adults", "children"]).unwrap();

        assert_eq!(sum.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = sum.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(0.5), Some(2.0)]);
    }

    #[test]
    fn test_row_sum_rejects_text() {
        let df = df!["adults" => [1i64], "children" => ["one"]].unwrap();
        let err = row_sum(&df, "test", "guests", &["adults", "children"]).unwrap_err();
        assert_eq!(err.error_code(), "WRONG_COLUMN_TYPE");
    }

    #[test]
    fn test_date_round_trip_through_series() {
        let dates = vec![NaiveDate::from_ymd_opt(2024, 7, 15), None];
        let series = date_series("arrival_date", &dates).unwrap();
        assert_eq!(series.dtype(), &DataType::Date);

        let df = DataFrame::new(vec![series.into()]).unwrap();
        let read_back = date_values(&df, "test", "arrival_date").unwrap();
        assert_eq!(read_back, dates);
    }

    #[test]
    fn test_epoch_is_day_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_days(epoch), 0);
        assert_eq!(days_to_date(0), Some(epoch));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("July"), Some(7));
        assert_eq!(parse_month("  december "), Some(12));
        assert_eq!(parse_month("SEP"), Some(9));
        assert_eq!(parse_month("3"), Some(3));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("Ju"), None);
        assert_eq!(parse_month("Juluary"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("test".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaks_lexicographically() {
        let series = Series::new("country".into(), &["PRT", "GBR", "PRT", "GBR", "ESP"]);
        assert_eq!(string_mode(&series), Some("GBR".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("country".into(), &[None::<&str>, None]);
        assert_eq!(string_mode(&series), None);
    }

    #[test]
    fn test_linear_quantile() {
        let sorted = [50.0, 55.0, 60.0, 65.0, 70.0, 500.0];
        assert_eq!(linear_quantile(&sorted, 0.25), Some(56.25));
        assert_eq!(linear_quantile(&sorted, 0.75), Some(68.75));
        assert_eq!(linear_quantile(&[4.0], 0.75), Some(4.0));
        assert_eq!(linear_quantile(&[], 0.5), None);
    }
}
