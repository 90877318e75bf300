//! The JSON → CSV direction: nested documents in, one multi-language table out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::Error,
    flatten::flatten,
    language::{infer_language_from_filename, is_document_file_name},
    table::{merge, tabulate},
    traits::Parser,
    types::{Node, Table},
};

/// Default separator joining nested keys.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Options for collapsing documents into a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseOptions {
    /// Separator joining the segments of nested keys.
    pub separator: String,
}

impl Default for CollapseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl CollapseOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key separator; an empty separator falls back to the default.
    pub fn with_separator(mut self, separator: Option<String>) -> Self {
        self.separator = separator
            .filter(|sep| !sep.is_empty())
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());
        self
    }
}

/// A document file and the language inferred from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    pub path: PathBuf,
    pub language: String,
}

impl LanguageFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let language = infer_language_from_filename(&path)?;
        Ok(Self { path, language })
    }
}

/// What a collapse wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseSummary {
    pub output: PathBuf,
    /// Number of input documents, one language each.
    pub languages: usize,
    /// Number of data rows in the table.
    pub keys: usize,
}

/// Resolves the inputs of a collapse into document files.
///
/// A single directory input expands to its `.json` entries sorted by name; a single file is
/// taken as is. With several inputs each one must be an existing file.
pub fn resolve_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<LanguageFile>, Error> {
    match inputs {
        [] => Err(Error::NoInputs),
        [input] => {
            let input = input.as_ref();
            if !input.exists() {
                return Err(Error::InputNotFound(input.to_path_buf()));
            }
            if input.is_dir() {
                let files = scan_directory(input)?;
                if files.is_empty() {
                    return Err(Error::NoJsonFiles(input.to_path_buf()));
                }
                files.into_iter().map(LanguageFile::from_path).collect()
            } else {
                Ok(vec![LanguageFile::from_path(input)?])
            }
        }
        inputs => inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                if !input.exists() {
                    return Err(Error::InputNotFound(input.to_path_buf()));
                }
                LanguageFile::from_path(input)
            })
            .collect(),
    }
}

fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();
        // `Path::is_file` follows symlinks.
        if is_document_file_name(&name.to_string_lossy()) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), files = files.len(), "scanned directory");
    Ok(files)
}

/// Reads one document, reporting parse failures with the file path.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Node, Error> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::invalid_document(path, e.into()))?;
    let content = String::from_utf8_lossy(&bytes);
    Node::from_str(&content).map_err(|e| Error::invalid_document(path, e))
}

/// Flattens, merges and tabulates documents already in memory.
pub fn collapse_documents(
    documents: Vec<(String, Node)>,
    options: &CollapseOptions,
) -> Result<Table, Error> {
    let flattened = documents
        .into_iter()
        .map(|(language, document)| {
            let flat = flatten(&document, &options.separator);
            (language, flat)
        })
        .collect::<Vec<_>>();

    tabulate(&merge(flattened))
}

/// Reads every input document and writes the merged table to `output`.
///
/// Missing parent directories of `output` are created.
pub fn collapse_files<P, Q>(
    inputs: &[P],
    output: Q,
    options: &CollapseOptions,
) -> Result<CollapseSummary, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let files = resolve_inputs(inputs)?;

    let documents = files
        .iter()
        .map(|file| {
            let document = read_document(&file.path)?;
            debug!(
                path = %file.path.display(),
                language = %file.language,
                leaves = document.leaf_count(),
                "read document"
            );
            Ok((file.language.clone(), document))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let table = collapse_documents(documents, options)?;

    let output = output.as_ref();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    table.write_to(output)?;
    info!(path = %output.display(), rows = table.len(), "wrote table");

    Ok(CollapseSummary {
        output: output.to_path_buf(),
        languages: files.len(),
        keys: table.data_rows().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_collapse_documents_scenario() {
        let documents = vec![
            ("en".to_string(), Node::from_json(json!({"a": {"b": "hi"}}))),
            ("fr".to_string(), Node::from_json(json!({"a": {"b": "salut"}}))),
        ];

        let table = collapse_documents(documents, &CollapseOptions::new()).unwrap();
        assert_eq!(
            table.rows,
            vec![vec!["key", "en", "fr"], vec!["a.b", "hi", "salut"]]
        );
    }

    #[test]
    fn test_collapse_documents_custom_separator() {
        let documents = vec![(
            "en".to_string(),
            Node::from_json(json!({"x": "1", "y": {"z": "2"}})),
        )];
        let options = CollapseOptions::new().with_separator(Some("_".to_string()));

        let table = collapse_documents(documents, &options).unwrap();
        assert_eq!(
            table.rows,
            vec![vec!["key", "en"], vec!["x", "1"], vec!["y_z", "2"]]
        );
    }

    #[test]
    fn test_collapse_documents_without_keys_fails() {
        let documents = vec![("en".to_string(), Node::new())];
        let err = collapse_documents(documents, &CollapseOptions::new()).unwrap_err();
        assert!(matches!(err, Error::NoKeys));
    }

    #[test]
    fn test_with_separator_empty_uses_default() {
        let options = CollapseOptions::new().with_separator(Some(String::new()));
        assert_eq!(options.separator, ".");
    }

    #[test]
    fn test_resolve_inputs_none() {
        let inputs: Vec<PathBuf> = Vec::new();
        assert!(matches!(resolve_inputs(&inputs), Err(Error::NoInputs)));
    }

    #[test]
    fn test_resolve_inputs_directory_sorted_json_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("fr.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("en.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(temp_dir.path().join("de.JSON"), "{}").unwrap();

        let files = resolve_inputs(&[temp_dir.path()]).unwrap();
        let languages: Vec<_> = files.iter().map(|f| f.language.as_str()).collect();
        assert_eq!(languages, vec!["en", "fr"]);
    }

    #[test]
    fn test_resolve_inputs_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = resolve_inputs(&[temp_dir.path()]).unwrap_err();
        assert!(matches!(err, Error::NoJsonFiles(_)));
    }

    #[test]
    fn test_resolve_inputs_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("en.json");
        fs::write(&existing, "{}").unwrap();
        let missing = temp_dir.path().join("fr.json");

        let err = resolve_inputs(&[existing, missing.clone()]).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(path) if path == missing));
    }

    #[test]
    fn test_read_document_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let broken = temp_dir.path().join("fr.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = read_document(&broken).unwrap_err();
        assert!(matches!(&err, Error::InvalidDocument { path, .. } if path == &broken));
        assert!(err.to_string().contains("fr.json"));
    }

    #[test]
    fn test_read_document_replaces_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");
        fs::write(&path, b"{\"a\": \"caf\xe9\"}").unwrap();

        let document = read_document(&path).unwrap();
        assert_eq!(document.leaf_at("a"), Some("caf\u{FFFD}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_inputs_follows_symlinked_documents() {
        let temp_dir = TempDir::new().unwrap();
        let shared = temp_dir.path().join("shared");
        let locales = temp_dir.path().join("locales");
        fs::create_dir(&shared).unwrap();
        fs::create_dir(&locales).unwrap();
        fs::write(shared.join("de.json"), r#"{"k": "y"}"#).unwrap();
        fs::write(locales.join("en.json"), r#"{"k": "x"}"#).unwrap();
        std::os::unix::fs::symlink(shared.join("de.json"), locales.join("de.json")).unwrap();

        let files = resolve_inputs(&[&locales]).unwrap();
        let languages: Vec<_> = files.iter().map(|f| f.language.as_str()).collect();
        assert_eq!(languages, vec!["de", "en"]);
    }
}
