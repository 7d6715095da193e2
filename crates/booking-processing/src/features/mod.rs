//! Derived booking features.
//!
//! Appends calendar, stay, revenue and bucket columns. Source columns are
//! left as they are. Flags computed from an absent operand are `false`;
//! arithmetic columns and buckets stay absent.

mod calendar;

pub use calendar::CalendarFeatures;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::schema::{
    ADR, ARRIVAL_DATE, ARRIVAL_DAYOFWEEK, ARRIVAL_MONTH, BOOKING_CHANGES, FEATURE_COLUMNS,
    HAS_SPECIAL_REQUESTS, IS_LONG_STAY, IS_REPEATED_GUEST, IS_WEEKEND_ARRIVAL, LEAD_TIME,
    LEAD_TIME_CATEGORY, LOYAL_AND_STABLE, SEASON, STAY_LENGTH, STAYS_IN_WEEK_NIGHTS,
    STAYS_IN_WEEKEND_NIGHTS, TOTAL_OF_SPECIAL_REQUESTS, TOTAL_REVENUE,
};
use crate::types::LeadTimeCategory;
use crate::utils::{date_values, f64_values, require_columns, row_sum};
use polars::prelude::*;
use tracing::{debug, info};

const STAGE: &str = "feature_engineering";

/// Derives analysis columns from cleaned booking rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureEngineer {
    long_stay_nights: i64,
    short_lead_days: f64,
    medium_lead_days: f64,
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl FeatureEngineer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            long_stay_nights: config.long_stay_nights,
            short_lead_days: config.short_lead_days,
            medium_lead_days: config.medium_lead_days,
        }
    }

    /// Append the derived feature columns.
    ///
    /// # Errors
    ///
    /// Returns a schema error when a source column is missing or when
    /// `arrival_date` is not a date column.
    pub fn engineer(&self, df: DataFrame) -> Result<DataFrame> {
        require_columns(&df, STAGE, &FEATURE_COLUMNS)?;
        let mut df = df;

        let calendar_cols = self.calendar_columns(&df)?;
        let stay_cols = self.stay_columns(&df)?;
        let guest_cols = self.guest_columns(&df)?;

        let added = calendar_cols.len() + stay_cols.len() + guest_cols.len();
        for series in calendar_cols.into_iter().chain(stay_cols).chain(guest_cols) {
            debug!("Adding feature column '{}'", series.name());
            df.with_column(series)?;
        }

        info!("Engineered {} feature columns", added);
        Ok(df)
    }

    fn calendar_columns(&self, df: &DataFrame) -> Result<Vec<Series>> {
        let calendar: Vec<Option<CalendarFeatures>> = date_values(df, STAGE, ARRIVAL_DATE)?
            .into_iter()
            .map(|date| date.map(CalendarFeatures::from_date))
            .collect();

        let months: Vec<Option<i32>> = calendar
            .iter()
            .map(|c| c.map(|c| c.month as i32))
            .collect();
        let weekdays: Vec<Option<i32>> = calendar
            .iter()
            .map(|c| c.map(|c| c.dayofweek as i32))
            .collect();
        let weekend: Vec<bool> = calendar
            .iter()
            .map(|c| c.is_some_and(|c| c.is_weekend()))
            .collect();
        let seasons: Vec<Option<&str>> = calendar
            .iter()
            .map(|c| c.map(|c| c.season.as_str()))
            .collect();

        Ok(vec![
            Series::new(ARRIVAL_MONTH.into(), months),
            Series::new(ARRIVAL_DAYOFWEEK.into(), weekdays),
            Series::new(IS_WEEKEND_ARRIVAL.into(), weekend),
            Series::new(SEASON.into(), seasons),
        ])
    }

    fn stay_columns(&self, df: &DataFrame) -> Result<Vec<Series>> {
        let stay_length = row_sum(
            df,
            STAGE,
            STAY_LENGTH,
            &[STAYS_IN_WEEK_NIGHTS, STAYS_IN_WEEKEND_NIGHTS],
        )?;
        let nights: Vec<Option<f64>> = stay_length
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect();
        let adr = f64_values(df, STAGE, ADR)?;

        let long_stay: Vec<bool> = nights
            .iter()
            .map(|n| n.is_some_and(|n| n > self.long_stay_nights as f64))
            .collect();
        let revenue: Vec<Option<f64>> = adr
            .into_iter()
            .zip(&nights)
            .map(|(rate, n)| Some(rate? * (*n)?))
            .collect();

        Ok(vec![
            stay_length,
            Series::new(IS_LONG_STAY.into(), long_stay),
            Series::new(TOTAL_REVENUE.into(), revenue),
        ])
    }

    fn guest_columns(&self, df: &DataFrame) -> Result<Vec<Series>> {
        let requests = f64_values(df, STAGE, TOTAL_OF_SPECIAL_REQUESTS)?;
        let lead_time = f64_values(df, STAGE, LEAD_TIME)?;
        let repeated = f64_values(df, STAGE, IS_REPEATED_GUEST)?;
        let changes = f64_values(df, STAGE, BOOKING_CHANGES)?;

        let has_requests: Vec<bool> = requests
            .iter()
            .map(|r| r.is_some_and(|n| n > 0.0))
            .collect();
        let categories: Vec<Option<&str>> = lead_time
            .iter()
            .map(|lead| {
                lead.filter(|days| !days.is_nan()).map(|days| {
                    LeadTimeCategory::with_bounds(days, self.short_lead_days, self.medium_lead_days)
                        .as_str()
                })
            })
            .collect();
        let loyal: Vec<bool> = repeated
            .iter()
            .zip(&changes)
            .map(|(r, c)| *r == Some(1.0) && *c == Some(0.0))
            .collect();

        Ok(vec![
            Series::new(HAS_SPECIAL_REQUESTS.into(), has_requests),
            Series::new(LEAD_TIME_CATEGORY.into(), categories),
            Series::new(LOYAL_AND_STABLE.into(), loyal),
        ])
    }
}
