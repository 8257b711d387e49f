//! Calendar-month keys and per-month cashflow buckets

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Year-month key. Orders chronologically (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short chart label, e.g. "Jan 2025"
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    /// Parse the "YYYY-MM" form produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month key: {s}"))?;
        let year: i32 = y.parse().map_err(|_| format!("invalid year in month key: {s}"))?;
        let month: u32 = m.parse().map_err(|_| format!("invalid month in month key: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in month key: {s}"));
        }
        Ok(Self { year, month })
    }
}

/// Income/expense totals and closing balance for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub key: MonthKey,
    /// Sum of income amounts
    pub income: f64,
    /// Sum of absolute expense amounts
    pub expenses: f64,
    /// Balance on the last transaction of the month
    pub end_balance: f64,
}

impl MonthlyBucket {
    pub fn empty(key: MonthKey) -> Self {
        Self {
            key,
            income: 0.0,
            expenses: 0.0,
            end_balance: 0.0,
        }
    }
}
