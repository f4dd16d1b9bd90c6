//! Backtest look-back windows.

use chrono::{Local, Months, NaiveDate};
use insight::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported look-back window, ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BacktestPeriod {
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
}

impl BacktestPeriod {
    pub const ALL: [BacktestPeriod; 3] = [
        BacktestPeriod::OneYear,
        BacktestPeriod::FiveYears,
        BacktestPeriod::TenYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BacktestPeriod::OneYear => "1Y",
            BacktestPeriod::FiveYears => "5Y",
            BacktestPeriod::TenYears => "10Y",
        }
    }

    pub fn years(&self) -> u32 {
        match self {
            BacktestPeriod::OneYear => 1,
            BacktestPeriod::FiveYears => 5,
            BacktestPeriod::TenYears => 10,
        }
    }

    /// `(start, end)` where `start` is `end` minus whole calendar years.
    ///
    /// A Feb 29 end date maps to Feb 28 in a non-leap start year.
    pub fn date_range_ending(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = end
            .checked_sub_months(Months::new(12 * self.years()))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }

    /// `(start, end)` ending on today's local date.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        self.date_range_ending(Local::now().date_naive())
    }
}

impl fmt::Display for BacktestPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BacktestPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1Y" => Ok(BacktestPeriod::OneYear),
            "5Y" => Ok(BacktestPeriod::FiveYears),
            "10Y" => Ok(BacktestPeriod::TenYears),
            other => Err(EngineError::UnsupportedPeriod(other.to_string())),
        }
    }
}

/// Maps a period label (`"1Y"`, `"5Y"`, `"10Y"`) to a date range ending today.
pub fn period_range(period: &str) -> Result<(NaiveDate, NaiveDate), EngineError> {
    Ok(period.parse::<BacktestPeriod>()?.date_range())
}
