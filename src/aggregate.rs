use log::trace;
use time::Date;

use crate::{Error, Reading};

/// A value selected across a sequence of readings, together with the day it
/// was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extreme {
    pub value: i32,
    pub date: Date,
}

impl Extreme {
    pub fn new(value: i32, date: Date) -> Self {
        Self { value, date }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes {
    pub highest_temperature: Extreme,
    pub lowest_temperature: Extreme,
    pub max_humidity: Extreme,
}

impl Extremes {
    fn of(reading: &Reading) -> Self {
        Self {
            highest_temperature: Extreme::new(reading.temperature.max, reading.date),
            lowest_temperature: Extreme::new(reading.temperature.min, reading.date),
            max_humidity: Extreme::new(reading.humidity.max, reading.date),
        }
    }

    /// Keep the most extreme of each field. Only a strictly better candidate
    /// replaces a value, so on ties `self` keeps its date.
    pub fn merge(self, candidate: Self) -> Self {
        let mut merged = self;

        if candidate.highest_temperature.value > self.highest_temperature.value {
            trace!(
                "highest temperature {} on {} replaces {} on {}",
                candidate.highest_temperature.value,
                candidate.highest_temperature.date,
                self.highest_temperature.value,
                self.highest_temperature.date
            );
            merged.highest_temperature = candidate.highest_temperature;
        }
        if candidate.lowest_temperature.value < self.lowest_temperature.value {
            trace!(
                "lowest temperature {} on {} replaces {} on {}",
                candidate.lowest_temperature.value,
                candidate.lowest_temperature.date,
                self.lowest_temperature.value,
                self.lowest_temperature.date
            );
            merged.lowest_temperature = candidate.lowest_temperature;
        }
        if candidate.max_humidity.value > self.max_humidity.value {
            trace!(
                "max humidity {} on {} replaces {} on {}",
                candidate.max_humidity.value,
                candidate.max_humidity.date,
                self.max_humidity.value,
                self.max_humidity.date
            );
            merged.max_humidity = candidate.max_humidity;
        }

        merged
    }
}

/// Floored means of the daily values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
    pub avg_highest_temperature: i32,
    pub avg_lowest_temperature: i32,
    pub avg_mean_humidity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateResult {
    pub extremes: Extremes,
    pub averages: Averages,
}

impl AggregateResult {
    /// Merge the extremes of another result into this one. The averages of
    /// `self` are kept as is, they don't mean anything across files.
    pub fn merge(self, candidate: Self) -> Self {
        Self {
            extremes: self.extremes.merge(candidate.extremes),
            averages: self.averages,
        }
    }
}

/// Reduce the readings of a file to their extremes and averages.
///
/// On ties the first reading wins.
pub fn aggregate(readings: &[Reading]) -> Result<AggregateResult, Error> {
    let (first, rest) = readings.split_first().ok_or(Error::EmptyInput)?;

    let extremes = rest
        .iter()
        .fold(Extremes::of(first), |acc, reading| {
            acc.merge(Extremes::of(reading))
        });

    let count = readings.len() as i64;
    let mut sum_highest = 0i64;
    let mut sum_lowest = 0i64;
    let mut sum_humidity = 0i64;
    for reading in readings {
        sum_highest += i64::from(reading.temperature.max);
        sum_lowest += i64::from(reading.temperature.min);
        sum_humidity += i64::from(reading.humidity.mean);
    }

    // The floored mean of i32 values always fits back in an i32
    let floor_mean = |sum: i64| sum.div_euclid(count) as i32;

    Ok(AggregateResult {
        extremes,
        averages: Averages {
            avg_highest_temperature: floor_mean(sum_highest),
            avg_lowest_temperature: floor_mean(sum_lowest),
            avg_mean_humidity: floor_mean(sum_humidity),
        },
    })
}

/// Fold per-file results in order. `None` if there is nothing to merge.
pub fn merge_all(results: impl IntoIterator<Item = AggregateResult>) -> Option<AggregateResult> {
    results.into_iter().reduce(AggregateResult::merge)
}
