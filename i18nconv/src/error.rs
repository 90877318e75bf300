//! All error types for the i18nconv crate.
//!
//! These are returned from every fallible operation (reading, parsing, expanding, collapsing, writing).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no input files or directory specified")]
    NoInputs,

    #[error("no JSON files found in directory: {}", .0.display())]
    NoJsonFiles(PathBuf),

    #[error("CSV file is empty")]
    EmptyInput,

    #[error("no data rows found in CSV file")]
    NoDataRows,

    #[error("could not detect languages from header row, provide an explicit language list")]
    NoLanguages,

    #[error("no translation keys found in JSON files")]
    NoKeys,

    #[error("invalid JSON file {}: {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("cannot infer language from filename: {0}")]
    LanguageInference(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("collation error: {0}")]
    Collation(String),
}

impl Error {
    /// Wraps a parse failure with the path of the offending document.
    pub fn invalid_document(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::InvalidDocument {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
