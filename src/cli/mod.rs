//! Command-line interface for splat-args
//!
//! Provides `train`, `render` and `options` subcommands. The parameter options of
//! `train` and `render` are generated from the parameter group schemas, so they are
//! forwarded verbatim to a second, generated parser.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod options;
mod render;
mod train;
mod utils;

/// Generate command-line options from parameter groups and resolve layered configs
#[derive(Parser)]
#[command(name = "splat-args")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// How configurations are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Namespace)]
    format: OutputFormat,

    /// Declare extra parameter groups from a TOML file (repeatable)
    #[arg(long = "group-file", value_name = "FILE")]
    group_files: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse training parameters and print the model configuration to persist
    Train(train::TrainArgs),

    /// Resolve rendering parameters against a trained model's cfg_args
    Render(render::RenderArgs),

    /// List the generated options of an entry point
    Options(options::OptionsArgs),
}

/// Rendering of printed configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Namespace(key=value, ...)`, readable back as cfg_args
    Namespace,
    /// Pretty-printed JSON object
    Json,
}

/// Options of the outer command that the subcommands need.
pub struct GlobalArgs {
    pub format: OutputFormat,
    pub group_files: Vec<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let globals = GlobalArgs { format: cli.format, group_files: cli.group_files };
    match cli.command {
        Commands::Train(args) => train::run(args, &globals),
        Commands::Render(args) => render::run(args, &globals),
        Commands::Options(args) => options::run(args, &globals),
    }
}
