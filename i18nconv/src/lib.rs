#![forbid(unsafe_code)]
//! Convert translations between a multi-language CSV table and nested per-language JSON files.
//!
//! Translators edit one spreadsheet with a key column and a column per language; applications
//! load one nested JSON document per language. This crate converts in both directions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18nconv::{CollapseOptions, ExpandOptions, collapse_files, expand_file};
//!
//! // CSV → one JSON document per language
//! expand_file("translations.csv", "locales", &ExpandOptions::new(), |path| {
//!     println!("wrote {}", path.display());
//! })?;
//!
//! // JSON documents → CSV
//! collapse_files(&["locales"], "translations.csv", &CollapseOptions::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Conversion rules
//!
//! - **Expand**: keys such as `menu.file.open` are split on `.` into nested objects. A missing
//!   or empty value falls back to the fallback language, then to an empty string.
//! - **Collapse**: nested objects are joined back with a configurable separator; arrays and
//!   scalars are leaves. Language columns are sorted by code point, keys by Unicode collation.

pub mod collapse;
pub mod error;
pub mod expand;
pub mod flatten;
pub mod formats;
pub mod language;
pub mod nest;
pub mod table;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    collapse::{CollapseOptions, CollapseSummary, LanguageFile, collapse_documents, collapse_files},
    error::Error,
    expand::{ExpandOptions, Expansion, expand_file, expand_rows},
    flatten::flatten,
    language::infer_language_from_filename,
    nest::{build_nested, resolve_value},
    table::{LocaleCollator, merge, ordinal_compare, tabulate, tabulate_with},
    types::{Corpus, FlatEntry, Node, Table, Translations},
};
