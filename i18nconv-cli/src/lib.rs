//! CLI library for testing purposes

pub mod config;
pub mod csv_to_json;
pub mod json_to_csv;
pub mod path_glob;

pub use config::Config;
pub use path_glob::expand_input_globs;
