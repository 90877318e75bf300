//! Language codes: inference from file names and parsing of comma-separated lists.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

lazy_static! {
    static ref JSON_EXTENSION_REGEX: Regex = Regex::new(r"(?i)\.json$").unwrap();
}

/// Extension of the per-language documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Infers the language code from a file name by stripping a trailing `.json`,
/// case-insensitively: `en.json` → `en`, `pt-BR.JSON` → `pt-BR`.
///
/// Codes that are not valid BCP 47 identifiers are still accepted, with a warning.
pub fn infer_language_from_filename<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file_name = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let language = JSON_EXTENSION_REGEX.replace(&file_name, "").into_owned();
    if language.is_empty() {
        return Err(Error::LanguageInference(file_name));
    }

    if language.parse::<LanguageIdentifier>().is_err() {
        warn!(
            language = %language,
            file = %path.as_ref().display(),
            "language code is not a valid BCP 47 identifier"
        );
    }

    Ok(language)
}

/// Whether a directory entry name should be picked up as a language document.
///
/// Matches the `.json` suffix exactly; upper-case extensions are only accepted when a file
/// is named explicitly.
pub fn is_document_file_name(name: &str) -> bool {
    name.ends_with(".json")
}

/// Splits a comma-separated language list, trimming each code.
pub fn parse_language_list(list: &str) -> Vec<String> {
    list.split(',').map(|code| code.trim().to_string()).collect()
}
