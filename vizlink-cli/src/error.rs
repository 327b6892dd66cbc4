//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use vizlink::config::SettingsError;
use vizlink::quadtree::SpatialQueryError;
use vizlink::session::SessionError;
use vizlink::tiling::TileError;
use vizlink::view_config::ViewConfigError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Settings key or value rejected
    Config(String),
    /// Settings file could not be read or written
    Settings(SettingsError),
    /// View configuration could not be loaded or is invalid
    ViewConfig(ViewConfigError),
    /// A view could not be activated
    Session(SessionError),
    /// Points file could not be read
    Points { path: PathBuf, reason: String },
    /// Malformed spatial query
    Query(SpatialQueryError),
    /// Invalid tile grid
    Tiles(TileError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::ViewConfig(ViewConfigError::Coordination { .. })
            | CliError::Session(SessionError::Coordination(_))
            | CliError::Session(SessionError::Config(ViewConfigError::Coordination { .. })) => {
                eprintln!();
                eprintln!("Every scope a view names must be declared in coordinationSpace, e.g.");
                eprintln!("  \"coordinationSpace\": {{ \"spatialZoom\": {{ \"A\": 0 }} }}");
                eprintln!("Use 'vizlink scopes <config>' to list the declared scopes.");
            }
            CliError::Settings(SettingsError::InvalidValue { .. }) | CliError::Config(_) => {
                eprintln!();
                eprintln!("Use 'vizlink config list' to see available keys and current values.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Settings(e) => write!(f, "{}", e),
            CliError::ViewConfig(e) => write!(f, "{}", e),
            CliError::Session(e) => write!(f, "{}", e),
            CliError::Points { path, reason } => {
                write!(f, "Failed to read points from '{}': {}", path.display(), reason)
            }
            CliError::Query(e) => write!(f, "Invalid query: {}", e),
            CliError::Tiles(e) => write!(f, "Invalid tile grid: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Settings(e) => Some(e),
            CliError::ViewConfig(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Query(e) => Some(e),
            CliError::Tiles(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<ViewConfigError> for CliError {
    fn from(e: ViewConfigError) -> Self {
        CliError::ViewConfig(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

impl From<SpatialQueryError> for CliError {
    fn from(e: SpatialQueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<TileError> for CliError {
    fn from(e: TileError) -> Self {
        CliError::Tiles(e)
    }
}
