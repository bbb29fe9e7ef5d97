//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list` and `config path` for
//! viewing and modifying settings from the command line.

use clap::Subcommand;
use navden::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., filter.measurement_noise)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., jamming.start)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let config = ConfigFile::load()?;
            println!("{}", run_get(&config, &key)?);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = ConfigFile::load()?;
            let config_key = run_set(&mut config, &key, &value)?;
            config.save()?;
            println!("Set {} = {}", config_key.name(), value);
        }
        ConfigCommands::List => {
            let config = ConfigFile::load()?;
            println!("{}", list(&config));
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'navden config list' to see available keys.",
            key
        ))
    })
}

fn run_get(config: &ConfigFile, key: &str) -> Result<String, CliError> {
    let value = parse_key(key)?.get(config);
    if value.is_empty() {
        Ok("(not set)".to_string())
    } else {
        Ok(value)
    }
}

/// Apply one key to `config`.
///
/// Cross-field rules (such as the jamming window ordering) are checked when
/// the file is saved.
fn run_set(config: &mut ConfigFile, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let config_key = parse_key(key)?;
    config_key
        .set(config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(config_key)
}

/// Render every key grouped by section.
fn list(config: &ConfigFile) -> String {
    let mut lines = vec![
        "Configuration Settings".to_string(),
        "======================".to_string(),
    ];
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();
        if section != current_section {
            lines.push(String::new());
            lines.push(format!("[{}]", section));
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            lines.push(format!("  {} = (not set)", key.key_name()));
        } else {
            lines.push(format!("  {} = {}", key.key_name(), value));
        }
    }

    lines.join("\n")
}
