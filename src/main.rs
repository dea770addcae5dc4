use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finsight::cli::{
    handle_analyze_command, handle_ask_command, handle_config_command, handle_convert_command,
    handle_sample_command, handle_validate_command, AnalyzeArgs, AskArgs, ConfigCommands,
    DatasetKind,
};
use finsight::config::{FinsightPaths, Settings};

#[derive(Parser)]
#[command(
    name = "finsight",
    version,
    about = "Financial analysis of CSV data from the terminal",
    long_about = "finsight analyzes profit & loss statements, personal finance records \
                  and investment portfolios from CSV files. It renders metrics, tables \
                  and text charts, and can ask an OpenAI-compatible model for insights."
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and analyze a dataset
    Analyze(AnalyzeArgs),

    /// Ask the AI a question about a dataset
    Ask(AskArgs),

    /// Detect the dataset type of a CSV file and check its columns
    Validate {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Convert a CSV file to JSON rows
    Convert {
        /// Path to the CSV file
        file: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print or save a bundled sample dataset
    Sample {
        /// Kind of dataset
        #[arg(value_enum)]
        kind: DatasetKind,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    // Settings load per command; `config` reads them itself
    let paths = FinsightPaths::new()?;
    let load_settings = || Settings::load_or_create(&paths);

    match cli.command {
        Commands::Analyze(args) => handle_analyze_command(&load_settings()?, args)?,
        Commands::Ask(args) => handle_ask_command(&load_settings()?, args)?,
        Commands::Validate { file } => {
            if !handle_validate_command(&load_settings()?, &file)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Convert {
            file,
            output,
            pretty,
        } => handle_convert_command(&file, output.as_deref(), pretty)?,
        Commands::Sample { kind, output } => handle_sample_command(kind, output.as_deref())?,
        Commands::Config(cmd) => handle_config_command(&paths, cmd)?,
    }

    Ok(ExitCode::SUCCESS)
}
