//! The CSV → JSON direction: one table in, one nested document per language out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::Error,
    language::DOCUMENT_EXTENSION,
    nest::build_nested,
    table::KEY_HEADER,
    traits::Parser,
    types::{Corpus, FlatEntry, Node, Table},
};

/// Options for reading a multi-language table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Explicit language order of the value columns. When unset, languages are read from
    /// the header row.
    pub languages: Option<Vec<String>>,
    /// Language whose value replaces a missing or empty one. Defaults to the first language.
    pub fallback: Option<String>,
    /// Zero-based index of the key column. Value columns follow it.
    pub key_column: usize,
    /// Whether the first row is a header to skip when languages are given explicitly.
    /// Ignored when languages are detected, since the header is then required.
    pub skip_header: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            languages: None,
            fallback: None,
            key_column: 0,
            skip_header: true,
        }
    }
}

impl ExpandOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit language list; codes are trimmed.
    pub fn with_languages(mut self, languages: Option<Vec<String>>) -> Self {
        self.languages =
            languages.map(|list| list.into_iter().map(|code| code.trim().to_string()).collect());
        self
    }

    /// Sets the fallback language; an empty code means no fallback override.
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback.filter(|code| !code.is_empty());
        self
    }

    pub fn with_key_column(mut self, key_column: usize) -> Self {
        self.key_column = key_column;
        self
    }

    pub fn with_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }
}

/// Result of expanding a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Languages in column order.
    pub languages: Vec<String>,
    /// The fallback language actually used.
    pub fallback: String,
    /// Every key with its per-language values.
    pub corpus: Corpus,
    /// One document per language, in `languages` order.
    pub documents: Vec<(String, Node)>,
}

/// Reads language codes from the header row.
///
/// Cells after the key column that are non-empty and not `key` (in any case) are trimmed
/// and kept in order. Value columns are still read by position, so a skipped header cell
/// shifts the languages after it onto earlier columns.
pub fn detect_languages(header: &[String], key_column: usize) -> Vec<String> {
    header
        .iter()
        .skip(key_column + 1)
        .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case(KEY_HEADER))
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Builds the corpus from data rows.
///
/// Rows with a missing or empty key cell are skipped. A repeated key replaces the values
/// of the earlier row but keeps its position.
pub fn collect_corpus(rows: &[Vec<String>], languages: &[String], key_column: usize) -> Corpus {
    let mut corpus = Corpus::new(languages.to_vec());

    for row in rows {
        let Some(key) = row.get(key_column).filter(|key| !key.is_empty()) else {
            continue;
        };

        let entry = languages
            .iter()
            .enumerate()
            .fold(FlatEntry::new(key.clone()), |entry, (index, lang)| {
                let value = row
                    .get(key_column + 1 + index)
                    .cloned()
                    .unwrap_or_default();
                entry.with_translation(lang.clone(), value)
            });

        if corpus.insert(entry) {
            warn!(key = %key, "duplicate key, the later row wins");
        }
    }

    corpus
}

/// Expands a parsed table into one document per language.
pub fn expand_rows(table: &Table, options: &ExpandOptions) -> Result<Expansion, Error> {
    let Some(header) = table.header() else {
        return Err(Error::EmptyInput);
    };

    let (languages, data_rows) = match &options.languages {
        Some(languages) => {
            let data_rows = if options.skip_header {
                table.data_rows()
            } else {
                table.rows.as_slice()
            };
            (languages.clone(), data_rows)
        }
        None => {
            let detected = detect_languages(header, options.key_column);
            if detected.is_empty() {
                return Err(Error::NoLanguages);
            }
            (detected, table.data_rows())
        }
    };

    if data_rows.is_empty() {
        return Err(Error::NoDataRows);
    }

    let fallback = options
        .fallback
        .clone()
        .or_else(|| languages.first().cloned())
        .unwrap_or_default();

    let corpus = collect_corpus(data_rows, &languages, options.key_column);
    debug!(
        languages = ?languages,
        fallback = %fallback,
        keys = corpus.len(),
        "collected corpus from table"
    );

    let documents = languages
        .iter()
        .map(|lang| (lang.clone(), build_nested(&corpus, lang, &fallback)))
        .collect();

    Ok(Expansion {
        languages,
        fallback,
        corpus,
        documents,
    })
}

/// Path of the document written for `language`.
pub fn document_path(output_dir: &Path, language: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", language, DOCUMENT_EXTENSION))
}

/// Writes every document of an expansion into `output_dir`, creating it if needed.
///
/// `on_written` is called after each file is fully written. When a write fails, files
/// already written stay on disk.
pub fn write_documents<F>(
    expansion: &Expansion,
    output_dir: &Path,
    mut on_written: F,
) -> Result<Vec<PathBuf>, Error>
where
    F: FnMut(&Path),
{
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(expansion.documents.len());
    for (language, document) in &expansion.documents {
        let path = document_path(output_dir, language);
        document.write_to(&path)?;
        info!(path = %path.display(), leaves = document.leaf_count(), "wrote document");
        on_written(&path);
        written.push(path);
    }
    Ok(written)
}

/// Reads a CSV file and writes one JSON document per language into `output_dir`.
pub fn expand_file<P, Q, F>(
    input: P,
    output_dir: Q,
    options: &ExpandOptions,
    on_written: F,
) -> Result<Vec<PathBuf>, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Path),
{
    let input = input.as_ref();
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }

    let table = Table::read_from(input)?;
    debug!(path = %input.display(), rows = table.len(), "read CSV table");

    let expansion = expand_rows(&table, options)?;
    write_documents(&expansion, output_dir.as_ref(), on_written)
}
