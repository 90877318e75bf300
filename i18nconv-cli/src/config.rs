//! Optional TOML configuration supplying defaults for both subcommands.
//!
//! ```toml
//! [csv_to_json]
//! output_dir = "locales"
//! fallback = "en"
//! key_column = 0
//! languages = ["en", "fr"]
//! header = true
//!
//! [json_to_csv]
//! output = "translations.csv"
//! separator = "."
//! ```
//!
//! Command-line flags override these values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "i18nconv.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub csv_to_json: CsvToJsonConfig,
    #[serde(default)]
    pub json_to_csv: JsonToCsvConfig,
}

/// Defaults for `csv-to-json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsvToJsonConfig {
    /// Directory receiving one JSON file per language
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Language used when a value is missing or empty
    #[serde(default)]
    pub fallback: Option<String>,
    /// Zero-based key column
    #[serde(default)]
    pub key_column: Option<usize>,
    /// Explicit language order of the value columns
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    /// Whether the first row is a header when languages are explicit
    #[serde(default)]
    pub header: Option<bool>,
}

/// Defaults for `json-to-csv`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonToCsvConfig {
    /// Output CSV file
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Separator joining nested keys
    #[serde(default)]
    pub separator: Option<String>,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads the configuration file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in the working
    /// directory is used when present, otherwise every value stays unset.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(format!("Config file not found: {}", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Error reading config {}: {}", path.display(), e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| format!("{} ({})", e, path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [csv_to_json]
            output_dir = "locales"
            fallback = "en"
            key_column = 1
            languages = ["en", "fr"]
            header = false

            [json_to_csv]
            output = "out/translations.csv"
            separator = "_"
            "#,
        )
        .unwrap();

        assert_eq!(config.csv_to_json.output_dir, Some(PathBuf::from("locales")));
        assert_eq!(config.csv_to_json.fallback.as_deref(), Some("en"));
        assert_eq!(config.csv_to_json.key_column, Some(1));
        assert_eq!(
            config.csv_to_json.languages,
            Some(vec!["en".to_string(), "fr".to_string()])
        );
        assert_eq!(config.csv_to_json.header, Some(false));
        assert_eq!(config.json_to_csv.separator.as_deref(), Some("_"));
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_toml("[json_to_csv]\nseperator = \"_\"\n").unwrap_err();
        assert!(err.contains("Invalid configuration"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("i18nconv.toml");
        fs::write(&path, "[csv_to_json]\nfallback = \"hr\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.csv_to_json.fallback.as_deref(), Some("hr"));
        assert_eq!(config.json_to_csv, JsonToCsvConfig::default());
    }
}
