use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Categorical Features
// ============================================================================

/// Meteorological season of an arrival month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season for a month number (1-12). Returns `None` outside that range.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Self::Winter),
            3..=5 => Some(Self::Spring),
            6..=8 => Some(Self::Summer),
            9..=11 => Some(Self::Autumn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far ahead of arrival a booking was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadTimeCategory {
    Short,
    Medium,
    Long,
}

impl LeadTimeCategory {
    /// Bucket a lead time with the standard bounds: up to 7 days is `Short`,
    /// up to 30 days is `Medium`, anything longer is `Long`.
    pub fn from_days(lead_time: f64) -> Self {
        Self::with_bounds(lead_time, 7.0, 30.0)
    }

    /// Bucket a lead time with explicit inclusive upper bounds.
    pub fn with_bounds(lead_time: f64, short_max: f64, medium_max: f64) -> Self {
        if lead_time <= short_max {
            Self::Short
        } else if lead_time <= medium_max {
            Self::Medium
        } else {
            Self::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl fmt::Display for LeadTimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// What a validation check looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A booking with no adults, children or babies.
    NonPositiveGuests,
    /// A negative average daily rate.
    NegativeAdr,
    /// An arrival date that could not be reconstructed.
    MissingArrivalDate,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NonPositiveGuests | Self::NegativeAdr => Severity::Error,
            Self::MissingArrivalDate => Severity::Warning,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NonPositiveGuests => "Found 0-guest bookings",
            Self::NegativeAdr => "Found negative ADR values",
            Self::MissingArrivalDate => "Missing arrival_date values",
        }
    }
}

/// One advisory result of the validator. Findings never block the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// Number of rows that triggered the finding.
    pub row_count: usize,
}

impl ValidationFinding {
    pub fn new(kind: FindingKind, row_count: usize) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            row_count,
        }
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} rows)", self.kind.description(), self.row_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Validation passes when there are no error-level findings.
    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }

    pub fn has(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|f| f.kind == kind)
    }
}

// ============================================================================
// Cleaning Summary
// ============================================================================

/// Values filled in a single column by the missing-value stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    pub filled: usize,
    /// Rendered fill value (`"0"` or the country mode).
    pub value: String,
}

/// Human-readable summary of one pipeline run.
///
/// Serializable so a caller can hand it to a report or dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,

    /// Fills performed by the missing-value stage.
    pub fills: Vec<ColumnFill>,
    /// `"Undefined"` placeholders rewritten to `"Other"`.
    pub placeholders_replaced: usize,
    /// Rows dropped because they had no guests.
    pub zero_guest_rows_dropped: usize,
    /// Rows whose arrival date could not be built.
    pub unparseable_dates: usize,
    pub duplicates_removed: usize,

    pub validation: ValidationReport,

    /// Ordered log of what each stage did.
    pub steps: Vec<String>,
}

impl CleaningSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Number of columns the pipeline appended.
    pub fn columns_added(&self) -> usize {
        self.columns_after.saturating_sub(self.columns_before)
    }
}

/// Cleaned dataset together with the summary of how it was produced.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}
