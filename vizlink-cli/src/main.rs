//! vizlink CLI - Command-line interface
//!
//! Checks view configurations and runs the library's spatial queries from
//! the command line.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use vizlink::config::Settings;
use vizlink::logging::{init_logging, LoggingGuard};

use commands::config::ConfigCommands;
use commands::spatial::{NearestArgs, RegionArgs};
use commands::tiles::TilesArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "vizlink")]
#[command(version = vizlink::VERSION)]
#[command(about = "Linked visualization views: config checks and spatial queries", long_about = None)]
struct Cli {
    /// Also print log events to stdout
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a view config, then bind every view
    Validate {
        /// View config JSON file
        config: PathBuf,
    },

    /// Print the coordination space and each view's scopes
    Scopes {
        /// View config JSON file
        config: PathBuf,
    },

    /// List the raster tiles visible in a viewport
    Tiles(TilesArgs),

    /// Find the point nearest to a position
    Nearest(NearestArgs),

    /// List the points inside a rectangle
    Region(RegionArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let _guard = start_logging(&settings, cli.verbose)?;
    debug!(version = vizlink::VERSION, "vizlink starting");

    match cli.command {
        Commands::Validate { config } => commands::view::run_validate(&config),
        Commands::Scopes { config } => commands::view::run_scopes(&config),
        Commands::Tiles(args) => commands::tiles::run(args, &settings),
        Commands::Nearest(args) => commands::spatial::run_nearest(args, &settings),
        Commands::Region(args) => commands::spatial::run_region(args, &settings),
        Commands::Config { command } => commands::config::run(command, &settings),
    }
}

fn start_logging(settings: &Settings, verbose: bool) -> Result<LoggingGuard, CliError> {
    init_logging(&settings.logging.directory, &settings.logging.file, verbose)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}
