use crate::error::Result;
use crate::schema::{ADR, ARRIVAL_DATE, TOTAL_GUESTS, VALIDATION_COLUMNS};
use crate::types::{FindingKind, Severity, ValidationFinding, ValidationReport};
use crate::utils::{f64_values, require_columns, require_series};
use polars::prelude::*;
use tracing::{error, info, warn};

const STAGE: &str = "validation";

/// Advisory checks on a cleaned dataset. Never modifies or blocks.
pub struct Validator;

impl Validator {
    /// Run every check and collect the findings.
    ///
    /// # Errors
    ///
    /// Returns a schema error if `total_guests`, `adr` or `arrival_date` is
    /// missing.
    pub fn check(df: &DataFrame) -> Result<ValidationReport> {
        require_columns(df, STAGE, &VALIDATION_COLUMNS)?;

        let mut report = ValidationReport::default();

        let zero_guests = f64_values(df, STAGE, TOTAL_GUESTS)?
            .iter()
            .filter(|v| v.is_some_and(|total| total <= 0.0))
            .count();
        if zero_guests > 0 {
            report.findings.push(ValidationFinding::new(
                FindingKind::NonPositiveGuests,
                zero_guests,
            ));
        }

        let negative_adr = f64_values(df, STAGE, ADR)?
            .iter()
            .filter(|v| v.is_some_and(|rate| rate < 0.0))
            .count();
        if negative_adr > 0 {
            report
                .findings
                .push(ValidationFinding::new(FindingKind::NegativeAdr, negative_adr));
        }

        let missing_dates = require_series(df, STAGE, ARRIVAL_DATE)?.null_count();
        if missing_dates > 0 {
            report.findings.push(ValidationFinding::new(
                FindingKind::MissingArrivalDate,
                missing_dates,
            ));
        }

        for finding in &report.findings {
            match finding.severity {
                Severity::Error => error!("{}", finding),
                Severity::Warning => warn!("{}", finding),
            }
        }
        if report.passed() {
            info!("Data validation passed.");
        }

        Ok(report)
    }

    /// Check the dataset and hand it back unchanged with the report.
    pub fn validate(df: DataFrame) -> Result<(DataFrame, ValidationReport)> {
        let report = Self::check(&df)?;
        Ok((df, report))
    }
}
