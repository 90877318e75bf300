use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use i18nconv::language::parse_language_list;
use i18nconv_cli::{
    Config,
    csv_to_json::{CsvToJsonArgs, run_csv_to_json_command},
    json_to_csv::{JsonToCsvArgs, run_json_to_csv_command},
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "i18nconv", author, version, about = "Convert between CSV and JSON translation formats", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./i18nconv.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a CSV file to multiple JSON files (one per language)
    CsvToJson {
        /// Input CSV file path
        input: PathBuf,

        /// Comma-separated list of language codes (auto-detected from the header when omitted)
        #[arg(short, long)]
        languages: Option<String>,

        /// Output directory for JSON files [default: ./output]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Fallback language code [default: first language]
        #[arg(short, long)]
        fallback: Option<String>,

        /// Column index for keys (0-based) [default: 0]
        #[arg(long)]
        key_column: Option<usize>,

        /// Treat the first row as data; needs --languages or `languages` in the config
        #[arg(long)]
        no_header: bool,
    },

    /// Convert JSON file(s) or a directory of JSON files to one multi-language CSV file
    JsonToCsv {
        /// Input JSON file path(s), glob pattern(s) or a directory with JSON files
        inputs: Vec<String>,

        /// Output CSV file path [default: ./output.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key separator for nested keys [default: .]
        #[arg(short, long)]
        separator: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Commands::Completions { shell } = args.commands {
        clap_complete::generate(shell, &mut Args::command(), "i18nconv", &mut std::io::stdout());
        return;
    }

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.commands {
        Commands::CsvToJson {
            input,
            languages,
            output_dir,
            fallback,
            key_column,
            no_header,
        } => run_csv_to_json_command(
            CsvToJsonArgs {
                input,
                languages: languages.as_deref().map(parse_language_list),
                output_dir,
                fallback,
                key_column,
                no_header,
            },
            &config.csv_to_json,
        ),
        Commands::JsonToCsv {
            inputs,
            output,
            separator,
        } => run_json_to_csv_command(
            JsonToCsvArgs {
                inputs,
                output,
                separator,
            },
            &config.json_to_csv,
        ),
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
