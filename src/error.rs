use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::RecordError;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Cannot aggregate zero readings")]
    #[diagnostic(
        code(weatherman::empty_input),
        help("the file has a header but no reading")
    )]
    EmptyInput,

    #[error("Malformed record in {}:{line}", path.display())]
    #[diagnostic(code(weatherman::malformed_record))]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("No file in {} matches `{pattern}`", dir.display())]
    #[diagnostic(code(weatherman::no_matching_file))]
    NoMatchingFile { dir: PathBuf, pattern: String },

    #[error("{} has no header", path.display())]
    #[diagnostic(code(weatherman::missing_header))]
    MissingHeader { path: PathBuf },

    #[error("Could not read {}", path.display())]
    #[diagnostic(code(weatherman::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
