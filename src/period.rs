use std::{fmt, str::FromStr};

use thiserror::Error;
use time::Month;

/// A month of a given year, written `2004/6` or `2004/06` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Expected YEAR/MONTH, got `{0}`")]
    MissingSeparator(String),
    #[error("Bad year: `{0}`")]
    BadYear(String),
    #[error("Bad month: `{0}`. Expecting a number between 1 and 12")]
    BadMonth(String),
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('/')
            .ok_or_else(|| PeriodError::MissingSeparator(s.to_string()))?;

        let year = year
            .parse()
            .map_err(|_| PeriodError::BadYear(year.to_string()))?;

        let bad_month = || PeriodError::BadMonth(month.to_string());
        if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad_month());
        }
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .ok_or_else(bad_month)?;

        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_abbreviation(self.month), self.year)
    }
}

/// Three letters name of a month, as it appears in the name of the files.
pub fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
