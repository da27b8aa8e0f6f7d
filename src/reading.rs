use std::fmt;

use logos::Logos;
use thiserror::Error;
use time::{Date, Month};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")] // Whitespace around and inside a field is not significant
enum Token {
    #[token(",")]
    Comma,

    #[regex(r"[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}", priority = 4)]
    Date,
    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,
    // Anything else, e.g. `Rain-Thunderstorm` or the trailing `<br />` of some exports
    #[regex(r"[^,\s]+", priority = 1)]
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Empty,
    Date,
    Number,
    Text,
}

/// One comma separated cell of a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub kind: FieldKind,
    pub text: &'a str,
}

/// Split a record line into its fields.
///
/// A field made of several tokens (`Max TemperatureC`, `<br />`) is a single
/// [`FieldKind::Text`] spanning from its first to its last token.
pub fn split_fields(line: &str) -> Result<Vec<Field<'_>>, RecordError> {
    let mut lexer = Token::lexer(line);
    let mut fields = Vec::new();

    let mut kind = FieldKind::Empty;
    let mut span: Option<(usize, usize)> = None;

    while let Some(token) = lexer.next() {
        let token = match token {
            Ok(token) => token,
            Err(()) => return Err(RecordError::Unreadable(fields.len())),
        };

        if token == Token::Comma {
            fields.push(field(line, kind, span));
            kind = FieldKind::Empty;
            span = None;
            continue;
        }

        let current = lexer.span();
        span = match span {
            None => {
                kind = match token {
                    Token::Date => FieldKind::Date,
                    Token::Number => FieldKind::Number,
                    _ => FieldKind::Text,
                };
                Some((current.start, current.end))
            }
            Some((start, _)) => {
                kind = FieldKind::Text;
                Some((start, current.end))
            }
        };
    }
    fields.push(field(line, kind, span));

    Ok(fields)
}

fn field(line: &str, kind: FieldKind, span: Option<(usize, usize)>) -> Field<'_> {
    match span {
        Some((start, end)) => Field {
            kind,
            text: &line[start..end],
        },
        None => Field {
            kind: FieldKind::Empty,
            text: "",
        },
    }
}

/// The values a [`Reading`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    MaxTemperature,
    MinTemperature,
    MaxHumidity,
    MeanHumidity,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Date,
        Column::MaxTemperature,
        Column::MinTemperature,
        Column::MaxHumidity,
        Column::MeanHumidity,
    ];

    /// Lowercased header name of the column in the weatherman exports.
    /// The date column is named after the station timezone (`PKT`, `PKST`...)
    /// so it has no fixed name.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            Column::Date => None,
            Column::MaxTemperature => Some("max temperaturec"),
            Column::MinTemperature => Some("min temperaturec"),
            Column::MaxHumidity => Some("max humidity"),
            Column::MeanHumidity => Some("mean humidity"),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Date => "date",
            Column::MaxTemperature => "max temperature",
            Column::MinTemperature => "min temperature",
            Column::MaxHumidity => "max humidity",
            Column::MeanHumidity => "mean humidity",
        };
        f.write_str(name)
    }
}

/// Position of every [`Column`] inside a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub date: usize,
    pub max_temperature: usize,
    pub min_temperature: usize,
    pub max_humidity: usize,
    pub mean_humidity: usize,
}

impl Schema {
    /// `PKT,Max TemperatureC,Mean TemperatureC,Min TemperatureC,Dew PointC,MeanDew PointC,Min DewpointC,Max Humidity, Mean Humidity,...`
    pub const WEATHERMAN: Self = Self {
        date: 0,
        max_temperature: 1,
        min_temperature: 3,
        max_humidity: 7,
        mean_humidity: 8,
    };

    /// `date,max temperature,min temperature,max humidity,mean humidity`
    pub const COMPACT: Self = Self {
        date: 0,
        max_temperature: 1,
        min_temperature: 2,
        max_humidity: 3,
        mean_humidity: 4,
    };

    /// Locate the columns by name in a header line. The date is always the
    /// first column.
    pub fn from_header(header: &str) -> Result<Self, RecordError> {
        let names: Vec<String> = split_fields(header)?
            .iter()
            .map(|field| field.text.to_lowercase())
            .collect();

        let find = |column: Column| -> Result<usize, RecordError> {
            let Some(header) = column.header() else {
                return Ok(0);
            };
            names
                .iter()
                .position(|name| name == header)
                .ok_or(RecordError::MissingColumn(column))
        };

        Ok(Self {
            date: find(Column::Date)?,
            max_temperature: find(Column::MaxTemperature)?,
            min_temperature: find(Column::MinTemperature)?,
            max_humidity: find(Column::MaxHumidity)?,
            mean_humidity: find(Column::MeanHumidity)?,
        })
    }

    pub fn index(&self, column: Column) -> usize {
        match column {
            Column::Date => self.date,
            Column::MaxTemperature => self.max_temperature,
            Column::MinTemperature => self.min_temperature,
            Column::MaxHumidity => self.max_humidity,
            Column::MeanHumidity => self.mean_humidity,
        }
    }

    /// Minimum number of fields a line needs to hold every column.
    pub fn width(&self) -> usize {
        Column::ALL
            .iter()
            .map(|column| self.index(*column) + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    pub max: i32,
    pub min: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Humidity {
    pub max: i32,
    pub mean: i32,
}

/// The weather of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub date: Date,
    pub temperature: Temperature,
    pub humidity: Humidity,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("Missing value for {0}")]
    MissingValue(Column),
    #[error("Bad {column}: `{value}` is not an integer")]
    NotAnInteger { column: Column, value: String },
    #[error("Bad date: `{0}`")]
    BadDate(String),
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] time::error::ComponentRange),
    #[error("Header has no `{0}` column")]
    MissingColumn(Column),
    #[error("Unreadable field at position {0}")]
    Unreadable(usize),
}

impl Reading {
    pub fn parse(schema: &Schema, line: &str) -> Result<Self, RecordError> {
        let fields = split_fields(line)?;
        if fields.len() < schema.width() {
            return Err(RecordError::TooFewFields {
                expected: schema.width(),
                found: fields.len(),
            });
        }

        let date = parse_date(fields[schema.date])?;

        let integer = |column: Column| -> Result<i32, RecordError> {
            let field = fields[schema.index(column)];
            match field.kind {
                FieldKind::Empty => Err(RecordError::MissingValue(column)),
                FieldKind::Number => field.text.parse().map_err(|_| RecordError::NotAnInteger {
                    column,
                    value: field.text.to_string(),
                }),
                FieldKind::Date | FieldKind::Text => Err(RecordError::NotAnInteger {
                    column,
                    value: field.text.to_string(),
                }),
            }
        };

        Ok(Self {
            date,
            temperature: Temperature {
                max: integer(Column::MaxTemperature)?,
                min: integer(Column::MinTemperature)?,
            },
            humidity: Humidity {
                max: integer(Column::MaxHumidity)?,
                mean: integer(Column::MeanHumidity)?,
            },
        })
    }
}

/// `2004-8-1` or `2004-08-01`
fn parse_date(field: Field) -> Result<Date, RecordError> {
    let bad_date = || RecordError::BadDate(field.text.to_string());
    if field.kind != FieldKind::Date {
        return Err(bad_date());
    }

    let mut parts = field.text.split('-');
    let year: i32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(bad_date)?;
    let month: u8 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(bad_date)?;
    let day: u8 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(bad_date)?;

    let month = Month::try_from(month)?;
    Ok(Date::from_calendar_date(year, month, day)?)
}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &str = "PKT,Max TemperatureC,Mean TemperatureC,Min TemperatureC,Dew PointC,MeanDew PointC,Min DewpointC,Max Humidity, Mean Humidity, Min Humidity, Max Sea Level PressurehPa, Mean Sea Level PressurehPa, Min Sea Level PressurehPa, Max VisibilityKm, Mean VisibilityKm, Min VisibilitykM, Max Wind SpeedKm/h, Mean Wind SpeedKm/h, Max Gust SpeedKm/h,Precipitationmm, CloudCover, Events,WindDirDegrees";
    const LINE: &str = "2004-8-1,22,19,16,17,14,11,94,82,60,1012,1010,1008,10.0,6.2,2.0,13,5,,0.0,6,Rain-Thunderstorm,137<br />";

    #[test]
    fn split_a_weatherman_line() {
        let fields = split_fields(LINE).unwrap();
        assert_eq!(fields.len(), 23);
        assert_eq!(
            fields[0],
            Field {
                kind: FieldKind::Date,
                text: "2004-8-1"
            }
        );
        assert_eq!(fields[13].kind, FieldKind::Number);
        assert_eq!(fields[18].kind, FieldKind::Empty);
        assert_eq!(fields[21].kind, FieldKind::Text);
        assert_eq!(fields[22].text, "137<br />");
        assert_eq!(fields[22].kind, FieldKind::Text);
    }

    #[test]
    fn trailing_comma_is_an_empty_field() {
        let fields = split_fields("1, 2,").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].text, "2");
        assert_eq!(fields[2].kind, FieldKind::Empty);
    }

    #[test]
    fn non_breaking_spaces_are_whitespace() {
        let fields = split_fields("2011-01-05,\u{a0}3,Partly\u{a0}Cloudy\u{a0}").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields[1],
            Field {
                kind: FieldKind::Number,
                text: "3"
            }
        );
        assert_eq!(
            fields[2],
            Field {
                kind: FieldKind::Text,
                text: "Partly\u{a0}Cloudy"
            }
        );

        let reading =
            Reading::parse(&Schema::COMPACT, "2011-01-05,\u{a0}3,\u{a0}-4\u{a0},70,55").unwrap();
        assert_eq!(reading.temperature, Temperature { max: 3, min: -4 });
    }

    #[test]
    fn schema_from_weatherman_header() {
        assert_eq!(Schema::from_header(HEADER).unwrap(), Schema::WEATHERMAN);
        assert_eq!(Schema::WEATHERMAN.width(), 9);
        assert_eq!(Schema::COMPACT.width(), 5);
    }

    #[test]
    fn schema_from_incomplete_header() {
        let err = Schema::from_header("PKT,Max TemperatureC,Min TemperatureC").unwrap_err();
        assert!(matches!(
            err,
            RecordError::MissingColumn(Column::MaxHumidity)
        ));
    }

    #[test]
    fn parse_weatherman_line() {
        let reading = Reading::parse(&Schema::WEATHERMAN, LINE).unwrap();
        assert_eq!(
            reading.date,
            Date::from_calendar_date(2004, Month::August, 1).unwrap()
        );
        assert_eq!(reading.temperature, Temperature { max: 22, min: 16 });
        assert_eq!(reading.humidity, Humidity { max: 94, mean: 82 });
    }

    #[test]
    fn parse_compact_line_with_negative_temperature() {
        let reading = Reading::parse(&Schema::COMPACT, "2011-01-05, 3, -4, 70, 55").unwrap();
        assert_eq!(
            reading.date,
            Date::from_calendar_date(2011, Month::January, 5).unwrap()
        );
        assert_eq!(reading.temperature, Temperature { max: 3, min: -4 });
        assert_eq!(reading.humidity, Humidity { max: 70, mean: 55 });
    }

    #[test]
    fn reject_malformed_lines() {
        let schema = Schema::COMPACT;
        assert!(matches!(
            Reading::parse(&schema, "2011-01-05,3,-4,70"),
            Err(RecordError::TooFewFields {
                expected: 5,
                found: 4
            })
        ));
        assert!(matches!(
            Reading::parse(&schema, "2011-01-05,3,,70,55"),
            Err(RecordError::MissingValue(Column::MinTemperature))
        ));
        assert!(matches!(
            Reading::parse(&schema, "2011-01-05,3.5,1,70,55"),
            Err(RecordError::NotAnInteger {
                column: Column::MaxTemperature,
                ..
            })
        ));
        assert!(matches!(
            Reading::parse(&schema, "2011-01-05,3,1,high,55"),
            Err(RecordError::NotAnInteger {
                column: Column::MaxHumidity,
                ..
            })
        ));
        assert!(matches!(
            Reading::parse(&schema, "yesterday,3,1,70,55"),
            Err(RecordError::BadDate(_))
        ));
        assert!(matches!(
            Reading::parse(&schema, "2011-02-30,3,1,70,55"),
            Err(RecordError::InvalidDate(_))
        ));
        assert!(matches!(
            Reading::parse(&schema, "2011-13-01,3,1,70,55"),
            Err(RecordError::InvalidDate(_))
        ));
    }
}
