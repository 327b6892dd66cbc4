//! Settings management CLI commands.
//!
//! Provides `config get`, `config set`, `config list` and `config path`
//! for viewing and modifying settings from the command line.

use clap::Subcommand;
use vizlink::config::{config_file_path, SettingKey, Settings};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a settings value
    Get {
        /// Settings key in format section.key (e.g., tiles.tile_size)
        key: String,
    },

    /// Set a settings value
    Set {
        /// Settings key in format section.key (e.g., tiles.tile_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all settings
    List,

    /// Show the settings file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, settings: &Settings) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, settings),
        ConfigCommands::Set { key, value } => run_set(&key, &value, settings),
        ConfigCommands::List => run_list(settings),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<SettingKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'vizlink config list' to see available keys.",
            key
        ))
    })
}

/// Get a settings value.
fn run_get(key: &str, settings: &Settings) -> Result<(), CliError> {
    let setting_key = parse_key(key)?;
    println!("{}", setting_key.get(settings));
    Ok(())
}

/// Set a settings value and save the file.
fn run_set(key: &str, value: &str, settings: &Settings) -> Result<(), CliError> {
    let setting_key = parse_key(key)?;

    let mut settings = settings.clone();
    setting_key
        .set(&mut settings, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    settings.save()?;

    println!("Set {} = {}", setting_key.name(), setting_key.get(&settings));

    Ok(())
}

/// List all settings.
fn run_list(settings: &Settings) -> Result<(), CliError> {
    println!("Configuration Settings");
    println!("======================");
    println!();

    let mut current_section = "";

    for key in SettingKey::all() {
        let section = key.section();

        // Print section header when section changes
        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        println!("  {} = {}", key.key_name(), key.get(settings));
    }

    Ok(())
}

/// Show the settings file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}
