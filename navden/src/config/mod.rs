//! Configuration for the NAVDEN client.
//!
//! Settings live in `~/.navden/config.ini`, one INI section per concern:
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[backend]` | REST base URL, request timeout, trajectory limit |
//! | `[filter]`  | Estimator noise Q and R                          |
//! | `[jamming]` | GPS jamming schedule                             |
//! | `[demo]`    | Local guidance loop parameters                   |
//! | `[logging]` | Log file location                                |
//!
//! A missing file or section falls back to the defaults in [`defaults`].
//!
//! # Example
//!
//! ```
//! use navden::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::default();
//! ConfigKey::JammingEnd.set(&mut config, "8.5").unwrap();
//! assert_eq!(config.jamming.end, 8.5);
//! assert!(config.validate().is_ok());
//! ```

pub mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod validation;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    BackendSettings, ConfigFile, DemoSettings, FilterSettings, JammingSettings, LoggingSettings,
};
pub use validation::SettingsError;
