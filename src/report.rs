use std::fmt;

use time::Date;

use crate::{Averages, Extremes, Reading};

/// `January 05`
fn month_day(date: Date) -> String {
    format!("{} {:02}", date.month(), date.day())
}

/// Highest and lowest temperature and most humid day of a year.
pub struct YearlyReport<'a>(pub &'a Extremes);

impl fmt::Display for YearlyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Extremes {
            highest_temperature,
            lowest_temperature,
            max_humidity,
        } = self.0;

        writeln!(
            f,
            "Highest: {}C on {}",
            highest_temperature.value,
            month_day(highest_temperature.date)
        )?;
        writeln!(
            f,
            "Lowest: {}C on {}",
            lowest_temperature.value,
            month_day(lowest_temperature.date)
        )?;
        writeln!(
            f,
            "Humidity: {}% on {}",
            max_humidity.value,
            month_day(max_humidity.date)
        )
    }
}

pub struct MonthlyReport<'a>(pub &'a Averages);

impl fmt::Display for MonthlyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Highest Average: {}C", self.0.avg_highest_temperature)?;
        writeln!(f, "Lowest Average: {}C", self.0.avg_lowest_temperature)?;
        writeln!(f, "Average Mean Humidity: {}%", self.0.avg_mean_humidity)
    }
}

/// What a single degree of the bar chart looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub low: &'static str,
    pub high: &'static str,
}

impl ChartStyle {
    /// Blue for the lowest temperature, red for the highest.
    pub const ANSI: Self = Self {
        low: "\x1b[34m+\x1b[0m",
        high: "\x1b[31m+\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        low: "-",
        high: "+",
    };
}

/// One line per day with a bar as long as the lowest temperature followed by
/// a bar as long as the highest one.
pub struct BarChart<'a> {
    pub readings: &'a [Reading],
    pub style: ChartStyle,
}

impl<'a> BarChart<'a> {
    pub fn new(readings: &'a [Reading], style: ChartStyle) -> Self {
        Self { readings, style }
    }
}

// Below zero degrees there is nothing to draw
fn bar_length(temperature: i32) -> usize {
    usize::try_from(temperature).unwrap_or(0)
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, reading) in self.readings.iter().enumerate() {
            let temperature = reading.temperature;

            write!(f, "{}", index + 1)?;
            f.write_str(&self.style.low.repeat(bar_length(temperature.min)))?;
            f.write_str(&self.style.high.repeat(bar_length(temperature.max)))?;
            writeln!(f, " {}C - {}C", temperature.min, temperature.max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::Month;

    use super::*;
    use crate::{Extreme, Humidity, Temperature};

    fn date(month: Month, day: u8) -> Date {
        Date::from_calendar_date(2020, month, day).unwrap()
    }

    fn reading(day: u8, min: i32, max: i32) -> Reading {
        Reading {
            date: date(Month::March, day),
            temperature: Temperature { max, min },
            humidity: Humidity { max: 50, mean: 40 },
        }
    }

    #[test]
    fn yearly() {
        let extremes = Extremes {
            highest_temperature: Extreme::new(35, date(Month::February, 1)),
            lowest_temperature: Extreme::new(-4, date(Month::December, 24)),
            max_humidity: Extreme::new(95, date(Month::January, 5)),
        };

        assert_eq!(
            YearlyReport(&extremes).to_string(),
            "Highest: 35C on February 01\nLowest: -4C on December 24\nHumidity: 95% on January 05\n"
        );
    }

    #[test]
    fn monthly() {
        let averages = Averages {
            avg_highest_temperature: 32,
            avg_lowest_temperature: 19,
            avg_mean_humidity: 65,
        };

        assert_eq!(
            MonthlyReport(&averages).to_string(),
            "Highest Average: 32C\nLowest Average: 19C\nAverage Mean Humidity: 65%\n"
        );
    }

    #[test]
    fn bar_lengths_match_the_temperatures() {
        let readings = [reading(1, 5, 10)];
        let chart = BarChart::new(&readings, ChartStyle::ANSI).to_string();

        assert_eq!(chart.matches("\x1b[34m+\x1b[0m").count(), 5);
        assert_eq!(chart.matches("\x1b[31m+\x1b[0m").count(), 10);
        assert!(chart.starts_with("1\x1b[34m"));
        assert!(chart.ends_with(" 5C - 10C\n"));
    }

    #[test]
    fn days_are_numbered_by_position() {
        // The calendar days are not contiguous, the index is
        let readings = [reading(4, 1, 2), reading(9, 0, 3)];
        let chart = BarChart::new(&readings, ChartStyle::PLAIN).to_string();

        assert_eq!(chart, "1-++ 1C - 2C\n2+++ 0C - 3C\n");
    }

    #[test]
    fn negative_temperatures_draw_nothing() {
        let readings = [reading(1, -3, 2), reading(2, -6, -1)];
        let chart = BarChart::new(&readings, ChartStyle::PLAIN).to_string();

        assert_eq!(chart, "1++ -3C - 2C\n2 -6C - -1C\n");
    }
}
