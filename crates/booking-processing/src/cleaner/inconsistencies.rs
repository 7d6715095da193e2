//! Placeholder normalization, guest-count filtering and arrival date parsing.

use crate::error::Result;
use crate::schema::{
    ADULTS, ARRIVAL_DATE, ARRIVAL_DATE_DAY_OF_MONTH, ARRIVAL_DATE_MONTH, ARRIVAL_DATE_YEAR,
    BABIES, CHILDREN, INCONSISTENCY_COLUMNS, PLACEHOLDER_COLUMNS, TOTAL_GUESTS,
};
use crate::utils::{
    date_series, i64_values, parse_month, require_columns, row_sum, string_values,
};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

const STAGE: &str = "inconsistencies";

const PLACEHOLDER: &str = "Undefined";
const PLACEHOLDER_REPLACEMENT: &str = "Other";

/// Counts of what the inconsistency stage changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InconsistencyReport {
    /// `"Undefined"` values rewritten to `"Other"`.
    pub placeholders_replaced: usize,
    /// Rows dropped because `total_guests <= 0`.
    pub zero_guest_rows_dropped: usize,
    /// Surviving rows whose arrival date is absent.
    pub unparseable_dates: usize,
}

/// Fixes logical inconsistencies in raw booking rows.
pub struct InconsistencyFixer;

impl InconsistencyFixer {
    /// Normalize placeholders, add `total_guests` and `arrival_date`, and drop
    /// bookings without guests.
    ///
    /// Arrival dates that do not form a real calendar day (e.g. February 30)
    /// become absent rather than failing the stage.
    pub fn fix(df: DataFrame) -> Result<(DataFrame, InconsistencyReport)> {
        require_columns(&df, STAGE, &INCONSISTENCY_COLUMNS)?;

        let mut df = df;
        let mut report = InconsistencyReport::default();

        for col_name in PLACEHOLDER_COLUMNS {
            report.placeholders_replaced += replace_placeholder(&mut df, col_name)?;
        }

        let total_guests = row_sum(&df, STAGE, TOTAL_GUESTS, &[ADULTS, CHILDREN, BABIES])?;
        let arrival_dates = arrival_dates(&df)?;

        let keep: Vec<bool> = total_guests
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|total| total.is_some_and(|t| t > 0.0))
            .collect();

        df.with_column(total_guests)?;
        df.with_column(date_series(ARRIVAL_DATE, &arrival_dates)?)?;

        let before = df.height();
        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        let df = df.filter(&mask)?;
        report.zero_guest_rows_dropped = before - df.height();

        report.unparseable_dates = df.column(ARRIVAL_DATE)?.null_count();

        info!(
            "Replaced {} placeholder values, dropped {} rows without guests",
            report.placeholders_replaced, report.zero_guest_rows_dropped
        );
        if report.unparseable_dates > 0 {
            debug!(
                "{} rows have no valid arrival date",
                report.unparseable_dates
            );
        }

        Ok((df, report))
    }
}

/// Rewrite `"Undefined"` to `"Other"` in one column; returns the count.
fn replace_placeholder(df: &mut DataFrame, col_name: &str) -> Result<usize> {
    let values = string_values(df, STAGE, col_name)?;
    let replaced = values
        .iter()
        .filter(|v| v.as_deref() == Some(PLACEHOLDER))
        .count();
    if replaced == 0 {
        return Ok(0);
    }

    let normalized: Vec<Option<String>> = values
        .into_iter()
        .map(|v| match v.as_deref() {
            Some(PLACEHOLDER) => Some(PLACEHOLDER_REPLACEMENT.to_string()),
            _ => v,
        })
        .collect();

    df.replace(col_name, Series::new(col_name.into(), normalized))?;
    debug!("Replaced {} '{}' values in '{}'", replaced, PLACEHOLDER, col_name);
    Ok(replaced)
}

fn arrival_dates(df: &DataFrame) -> Result<Vec<Option<NaiveDate>>> {
    let years = i64_values(df, STAGE, ARRIVAL_DATE_YEAR)?;
    let months = string_values(df, STAGE, ARRIVAL_DATE_MONTH)?;
    let days = i64_values(df, STAGE, ARRIVAL_DATE_DAY_OF_MONTH)?;

    Ok(years
        .into_iter()
        .zip(months)
        .zip(days)
        .map(|((year, month), day)| build_date(year?, month.as_deref()?, day?))
        .collect())
}

/// Assemble a calendar date from year, month name and day of month.
pub fn build_date(year: i64, month: &str, day: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let day = u32::try_from(day).ok()?;
    NaiveDate::from_ymd_opt(year, parse_month(month)?, day)
}
