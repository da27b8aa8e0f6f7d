use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use time::Month;

use crate::{month_abbreviation, Error, Reading, Schema};

/// How the columns of a file are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Layout {
    /// Look the columns up by name in the header of every file
    #[default]
    Header,
    /// Fixed positions of the weatherman exports
    Weatherman,
    /// date, max temperature, min temperature, max humidity, mean humidity
    Compact,
}

/// Every file directly inside `dir` with all the `tokens` among the parts of
/// its name, ordered by the month they're named after.
pub fn resolve(dir: &Path, tokens: &[&str]) -> Result<Vec<PathBuf>, Error> {
    let io_error = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().map_err(io_error)?.is_file() {
            continue;
        }

        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if tokens
            .iter()
            .all(|token| name_parts(name).any(|part| part == *token))
        {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(Error::NoMatchingFile {
            dir: dir.to_path_buf(),
            pattern: format!("*{}*", tokens.join("*")),
        });
    }

    files.sort_by_cached_key(|path| (month_of(path), path.clone()));
    debug!("{} matches {:?}: {:?}", dir.display(), tokens, files);

    Ok(files)
}

/// `Murree_weather_2004_Aug.txt` is made of `Murree`, `weather`, `2004`, `Aug`
/// and `txt`.
fn name_parts(name: &str) -> impl Iterator<Item = &str> {
    name.split(['_', '-', '.', ' ']).filter(|part| !part.is_empty())
}

fn month_named(part: &str) -> Option<Month> {
    let mut month = Month::January;
    for _ in 0..12 {
        if part == month_abbreviation(month) {
            return Some(month);
        }
        month = month.next();
    }
    None
}

// The station comes first, so the last month looking part is the one that counts
fn month_of(path: &Path) -> Option<u8> {
    let name = path.file_name()?.to_str()?;
    name_parts(name).filter_map(month_named).last().map(u8::from)
}

/// Parse every reading of a file. The first line that isn't blank is the
/// header.
pub fn load(path: &Path, layout: Layout) -> Result<Vec<Reading>, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let malformed = |line, source| Error::MalformedRecord {
        path: path.to_path_buf(),
        line,
        source,
    };

    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(number, line)| {
            let line = line.trim();
            // Some exports end with a `<!-- 0.262:1 -->` comment
            let skip = line.is_empty() || line.starts_with("<!--");
            if skip {
                trace!("skipping line {number} of {}", path.display());
            }
            !skip
        });

    let (number, header) = lines.next().ok_or_else(|| Error::MissingHeader {
        path: path.to_path_buf(),
    })?;
    let schema = match layout {
        Layout::Header => Schema::from_header(header).map_err(|e| malformed(number, e))?,
        Layout::Weatherman => Schema::WEATHERMAN,
        Layout::Compact => Schema::COMPACT,
    };

    let readings = lines
        .map(|(number, line)| Reading::parse(&schema, line).map_err(|e| malformed(number, e)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("{} readings in {}", readings.len(), path.display());

    Ok(readings)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn month_of_file_name() {
        assert_eq!(
            month_of(Path::new("data/Murree_weather_2004_Aug.txt")),
            Some(8)
        );
        assert_eq!(month_of(Path::new("Dubai_weather_2010_Jan.txt")), Some(1));
        assert_eq!(month_of(Path::new("readme.txt")), None);
    }

    #[test]
    fn station_names_are_not_months() {
        assert_eq!(
            month_of(Path::new("Marseille_weather_2004_Aug.txt")),
            Some(8)
        );
        assert_eq!(month_of(Path::new("Mayport_weather_2004_Jan.txt")), Some(1));
        assert_eq!(month_of(Path::new("Decatur_weather.txt")), None);
        assert_eq!(month_of(Path::new("Jun_2004_Oct.txt")), Some(10));
    }

    #[test]
    fn name_parts_split_on_separators() {
        let parts: Vec<_> = name_parts("Lahore_weather-2010 Dec.txt").collect();
        assert_eq!(parts, ["Lahore", "weather", "2010", "Dec", "txt"]);
    }
}
