use crate::types::Season;
use chrono::{Datelike, NaiveDate};

/// Calendar attributes of one arrival date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// 1-12.
    pub month: u32,
    /// Monday = 0 ... Sunday = 6.
    pub dayofweek: u32,
    pub season: Season,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month();
        Self {
            month,
            dayofweek: date.weekday().num_days_from_monday(),
            // chrono months are always 1-12
            season: Season::from_month(month).unwrap_or(Season::Winter),
        }
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.dayofweek >= 5
    }
}
