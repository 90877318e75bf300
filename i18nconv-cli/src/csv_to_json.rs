use std::path::PathBuf;

use i18nconv::{ExpandOptions, expand_file};

use crate::config::CsvToJsonConfig;

/// Default directory receiving the generated JSON files.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Flags given to `csv-to-json`; unset values come from the config file.
#[derive(Debug, Clone, Default)]
pub struct CsvToJsonArgs {
    pub input: PathBuf,
    pub languages: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub fallback: Option<String>,
    pub key_column: Option<usize>,
    pub no_header: bool,
}

/// Resolves flags over config values over built-in defaults.
///
/// Treating the first row as data needs an explicit language list, from either source.
pub fn resolve_options(
    args: &CsvToJsonArgs,
    config: &CsvToJsonConfig,
) -> Result<(PathBuf, ExpandOptions), String> {
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let skip_header = if args.no_header {
        false
    } else {
        config.header.unwrap_or(true)
    };

    let languages = args.languages.clone().or_else(|| config.languages.clone());
    if !skip_header && languages.is_none() {
        return Err(
            "Treating the first row as data requires an explicit language list (--languages or `languages` in the config)"
                .to_string(),
        );
    }

    let options = ExpandOptions::new()
        .with_languages(languages)
        .with_fallback(args.fallback.clone().or_else(|| config.fallback.clone()))
        .with_key_column(args.key_column.or(config.key_column).unwrap_or(0))
        .with_skip_header(skip_header);

    Ok((output_dir, options))
}

/// Run the csv-to-json command: write one nested JSON file per language.
pub fn run_csv_to_json_command(args: CsvToJsonArgs, config: &CsvToJsonConfig) -> Result<(), String> {
    let (output_dir, options) = resolve_options(&args, config)?;

    expand_file(&args.input, &output_dir, &options, |path| {
        println!("✓ Generated {}", path.display());
    })
    .map_err(|e| e.to_string())?;

    Ok(())
}
