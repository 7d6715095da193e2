//! Column names of the hotel booking schema.
//!
//! Source columns come from the booking export; derived columns are added by
//! the pipeline stages. Each stage lists the columns it reads so that a
//! missing one is reported before any work starts.

pub const CHILDREN: &str = "children";
pub const COUNTRY: &str = "country";
pub const AGENT: &str = "agent";
pub const COMPANY: &str = "company";
pub const MEAL: &str = "meal";
pub const DISTRIBUTION_CHANNEL: &str = "distribution_channel";
pub const ADULTS: &str = "adults";
pub const BABIES: &str = "babies";
pub const ARRIVAL_DATE_YEAR: &str = "arrival_date_year";
pub const ARRIVAL_DATE_MONTH: &str = "arrival_date_month";
pub const ARRIVAL_DATE_DAY_OF_MONTH: &str = "arrival_date_day_of_month";
pub const STAYS_IN_WEEK_NIGHTS: &str = "stays_in_week_nights";
pub const STAYS_IN_WEEKEND_NIGHTS: &str = "stays_in_weekend_nights";
pub const ADR: &str = "adr";
pub const TOTAL_OF_SPECIAL_REQUESTS: &str = "total_of_special_requests";
pub const LEAD_TIME: &str = "lead_time";
pub const IS_REPEATED_GUEST: &str = "is_repeated_guest";
pub const BOOKING_CHANGES: &str = "booking_changes";

// Derived
pub const TOTAL_GUESTS: &str = "total_guests";
pub const ARRIVAL_DATE: &str = "arrival_date";
pub const ARRIVAL_MONTH: &str = "arrival_month";
pub const ARRIVAL_DAYOFWEEK: &str = "arrival_dayofweek";
pub const IS_WEEKEND_ARRIVAL: &str = "is_weekend_arrival";
pub const SEASON: &str = "season";
pub const STAY_LENGTH: &str = "stay_length";
pub const IS_LONG_STAY: &str = "is_long_stay";
pub const TOTAL_REVENUE: &str = "total_revenue";
pub const HAS_SPECIAL_REQUESTS: &str = "has_special_requests";
pub const LEAD_TIME_CATEGORY: &str = "lead_time_category";
pub const LOYAL_AND_STABLE: &str = "loyal_and_stable";

/// Minimum set of columns a booking file must provide.
pub const REQUIRED_SOURCE_COLUMNS: [&str; 18] = [
    CHILDREN,
    COUNTRY,
    AGENT,
    COMPANY,
    MEAL,
    DISTRIBUTION_CHANNEL,
    ADULTS,
    BABIES,
    ARRIVAL_DATE_YEAR,
    ARRIVAL_DATE_MONTH,
    ARRIVAL_DATE_DAY_OF_MONTH,
    STAYS_IN_WEEK_NIGHTS,
    STAYS_IN_WEEKEND_NIGHTS,
    ADR,
    TOTAL_OF_SPECIAL_REQUESTS,
    LEAD_TIME,
    IS_REPEATED_GUEST,
    BOOKING_CHANGES,
];

/// Columns appended by the pipeline, in the order they are added.
pub const DERIVED_COLUMNS: [&str; 12] = [
    TOTAL_GUESTS,
    ARRIVAL_DATE,
    ARRIVAL_MONTH,
    ARRIVAL_DAYOFWEEK,
    IS_WEEKEND_ARRIVAL,
    SEASON,
    STAY_LENGTH,
    IS_LONG_STAY,
    TOTAL_REVENUE,
    HAS_SPECIAL_REQUESTS,
    LEAD_TIME_CATEGORY,
    LOYAL_AND_STABLE,
];

pub(crate) const MISSING_VALUE_COLUMNS: [&str; 4] = [CHILDREN, COUNTRY, AGENT, COMPANY];

/// Categorical columns whose `"Undefined"` placeholder is folded into `"Other"`.
pub(crate) const PLACEHOLDER_COLUMNS: [&str; 2] = [MEAL, DISTRIBUTION_CHANNEL];

pub(crate) const INCONSISTENCY_COLUMNS: [&str; 8] = [
    MEAL,
    DISTRIBUTION_CHANNEL,
    ADULTS,
    CHILDREN,
    BABIES,
    ARRIVAL_DATE_YEAR,
    ARRIVAL_DATE_MONTH,
    ARRIVAL_DATE_DAY_OF_MONTH,
];

pub(crate) const FEATURE_COLUMNS: [&str; 8] = [
    ARRIVAL_DATE,
    STAYS_IN_WEEK_NIGHTS,
    STAYS_IN_WEEKEND_NIGHTS,
    ADR,
    TOTAL_OF_SPECIAL_REQUESTS,
    LEAD_TIME,
    IS_REPEATED_GUEST,
    BOOKING_CHANGES,
];

pub(crate) const VALIDATION_COLUMNS: [&str; 3] = [TOTAL_GUESTS, ADR, ARRIVAL_DATE];
