//! docindex CLI
//!
//! Query, validate and export Documenter search indexes.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use docindex::{Category, Config, IndexFormat};

/// Command-line interface for docindex.
#[derive(Parser)]
#[command(
    name = "docindex",
    version,
    about = "Query, validate and export documentation search indexes"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docindex.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Search an index for a term in titles and text
    Query {
        /// Term to look for (case-insensitive substring)
        term: String,
        /// Index file (defaults to index.path from the configuration)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Only show records of this category (repeatable)
        #[arg(long = "category")]
        categories: Vec<Category>,
        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an index file, or all index files under a directory
    Check {
        /// File or directory to check
        path: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Re-serialize an index
    Export {
        /// Index file (defaults to index.path from the configuration)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Output format (script, json, json-pretty)
        #[arg(short, long, default_value = "script")]
        format: IndexFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Variable name for script output (defaults to index.variable)
        #[arg(long)]
        variable: Option<String>,
    },
    /// Show record counts per category and page
    Stats {
        /// Index file (defaults to index.path from the configuration)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    docindex::init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Query {
            term,
            index,
            categories,
            limit,
            json,
        } => {
            docindex::cmd::query::run(
                &config,
                index.as_deref(),
                &term,
                &categories,
                limit,
                json,
            )?;
        }
        Commands::Check { path, strict } => {
            docindex::cmd::check::run(&config, path.as_deref(), strict)?;
        }
        Commands::Export {
            index,
            format,
            output,
            variable,
        } => {
            docindex::cmd::export::run(
                &config,
                index.as_deref(),
                format,
                output.as_deref(),
                variable.as_deref(),
            )?;
        }
        Commands::Stats { index, json } => {
            docindex::cmd::stats::run(&config, index.as_deref(), json)?;
        }
    }

    Ok(())
}
