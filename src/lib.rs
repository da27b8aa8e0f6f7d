//! Yearly extremes, monthly averages and daily bar charts out of monthly
//! weather exports.

use std::path::{Path, PathBuf};

mod aggregate;
mod error;
mod files;
pub mod logger;
mod period;
mod reading;
mod report;

pub use aggregate::{aggregate, merge_all, AggregateResult, Averages, Extreme, Extremes};
pub use error::Error;
pub use files::{load, resolve, Layout};
pub use period::{month_abbreviation, PeriodError, YearMonth};
pub use reading::{
    split_fields, Column, Field, FieldKind, Humidity, Reading, RecordError, Schema, Temperature,
};
pub use report::{BarChart, ChartStyle, MonthlyReport, YearlyReport};

/// Highest and lowest temperature and most humid day across every file of
/// `year`. When two files share an extreme the first one in calendar order
/// keeps it.
pub fn yearly_extremes(dir: &Path, year: i32, layout: Layout) -> Result<Extremes, Error> {
    let year = year.to_string();
    let files = resolve(dir, &[year.as_str()])?;

    let results = files
        .iter()
        .map(|file| aggregate(&load(file, layout)?))
        .collect::<Result<Vec<_>, _>>()?;

    merge_all(results)
        .map(|result| result.extremes)
        .ok_or_else(|| Error::NoMatchingFile {
            dir: dir.to_path_buf(),
            pattern: format!("*{year}*"),
        })
}

/// Averages of the file of a single month.
pub fn monthly_averages(dir: &Path, period: YearMonth, layout: Layout) -> Result<Averages, Error> {
    let readings = daily_readings(dir, period, layout)?;
    Ok(aggregate(&readings)?.averages)
}

/// Every reading of the file of a single month, in file order.
pub fn daily_readings(
    dir: &Path,
    period: YearMonth,
    layout: Layout,
) -> Result<Vec<Reading>, Error> {
    load(&month_file(dir, period)?, layout)
}

fn month_file(dir: &Path, period: YearMonth) -> Result<PathBuf, Error> {
    let year = period.year.to_string();
    let files = resolve(dir, &[year.as_str(), month_abbreviation(period.month)])?;
    if files.len() > 1 {
        log::warn!(
            "{} files match {period}, only using {}",
            files.len(),
            files[0].display()
        );
    }
    // resolve never returns an empty list
    files.into_iter().next().ok_or_else(|| Error::NoMatchingFile {
        dir: dir.to_path_buf(),
        pattern: format!("*{period}*"),
    })
}
