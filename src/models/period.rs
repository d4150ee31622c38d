//! Reporting periods for handicap averages.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar window relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// Same calendar month as today
    Month,
    /// Same calendar quarter as today
    Quarter,
    /// Same calendar year as today
    Year,
    /// Every round ever played
    Total,
}

impl StatsPeriod {
    pub const ALL: [StatsPeriod; 4] = [
        StatsPeriod::Total,
        StatsPeriod::Year,
        StatsPeriod::Quarter,
        StatsPeriod::Month,
    ];

    /// Check if a date falls within this period.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            StatsPeriod::Total => true,
            StatsPeriod::Year => date.year() == today.year(),
            StatsPeriod::Quarter => {
                date.year() == today.year() && quarter_of(date) == quarter_of(today)
            }
            StatsPeriod::Month => date.year() == today.year() && date.month() == today.month(),
        }
    }
}

/// Calendar quarter (1..=4).
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

impl std::fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsPeriod::Month => write!(f, "month"),
            StatsPeriod::Quarter => write!(f, "quarter"),
            StatsPeriod::Year => write!(f, "year"),
            StatsPeriod::Total => write!(f, "total"),
        }
    }
}
