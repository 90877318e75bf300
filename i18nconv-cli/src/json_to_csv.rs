use std::path::PathBuf;

use i18nconv::{CollapseOptions, collapse_files};

use crate::config::JsonToCsvConfig;
use crate::path_glob::expand_input_globs;

/// Default CSV file written by `json-to-csv`.
pub const DEFAULT_OUTPUT: &str = "./output.csv";

/// Flags given to `json-to-csv`; unset values come from the config file.
#[derive(Debug, Clone, Default)]
pub struct JsonToCsvArgs {
    pub inputs: Vec<String>,
    pub output: Option<PathBuf>,
    pub separator: Option<String>,
}

/// Resolves flags over config values over built-in defaults.
pub fn resolve_options(args: &JsonToCsvArgs, config: &JsonToCsvConfig) -> (PathBuf, CollapseOptions) {
    let output = args
        .output
        .clone()
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let options = CollapseOptions::new()
        .with_separator(args.separator.clone().or_else(|| config.separator.clone()));
    (output, options)
}

/// Run the json-to-csv command: merge JSON files into one multi-language CSV file.
pub fn run_json_to_csv_command(args: JsonToCsvArgs, config: &JsonToCsvConfig) -> Result<(), String> {
    let (output, options) = resolve_options(&args, config);
    let inputs = expand_input_globs(&args.inputs)?;

    let summary = collapse_files(&inputs, &output, &options).map_err(|e| e.to_string())?;

    println!(
        "✓ Generated {} with {} language(s)",
        summary.output.display(),
        summary.languages
    );
    Ok(())
}
