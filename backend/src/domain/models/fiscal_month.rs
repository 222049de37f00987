//! Domain model for a fiscal month ("YYYY-MM") and the calendar range it covers.
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FiscalMonthError {
    #[error("Invalid fiscal month '{0}': expected format YYYY-MM")]
    InvalidFormat(String),
    #[error("Invalid fiscal month '{0}': month must be between 01 and 12")]
    MonthOutOfRange(String),
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A calendar month. Its bounds are resolved once, on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalMonth {
    start: NaiveDate,
    end: NaiveDate,
}

impl FiscalMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, FiscalMonthError> {
        let label = || format!("{:04}-{:02}", year, month);
        if !(1..=12).contains(&month) {
            return Err(FiscalMonthError::MonthOutOfRange(label()));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| FiscalMonthError::InvalidFormat(label()))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(|| FiscalMonthError::InvalidFormat(label()))?;

        Ok(Self { start, end })
    }

    /// First calendar day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day of the month
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

impl FromStr for FiscalMonth {
    type Err = FiscalMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year_part, month_part) = trimmed
            .split_once('-')
            .ok_or_else(|| FiscalMonthError::InvalidFormat(s.to_string()))?;

        if year_part.len() != 4
            || month_part.len() != 2
            || !year_part.chars().all(|c| c.is_ascii_digit())
            || !month_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(FiscalMonthError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| FiscalMonthError::InvalidFormat(s.to_string()))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| FiscalMonthError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.start.year(), self.start.month())
    }
}
