//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by key name, with validation via the Specification Pattern.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::file::ConfigFile;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Backend settings
    BackendUrl,
    BackendTimeoutSecs,
    BackendTrajectoryLimit,

    // Filter settings
    FilterProcessNoise,
    FilterMeasurementNoise,

    // Jamming settings
    JammingEnabled,
    JammingStart,
    JammingEnd,

    // Demo settings
    DemoDt,
    DemoGain,
    DemoArrivalThreshold,
    DemoBlend,
    DemoTickMs,
    DemoSeed,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "jamming.start").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::BackendUrl => "backend.url",
            ConfigKey::BackendTimeoutSecs => "backend.timeout_secs",
            ConfigKey::BackendTrajectoryLimit => "backend.trajectory_limit",
            ConfigKey::FilterProcessNoise => "filter.process_noise",
            ConfigKey::FilterMeasurementNoise => "filter.measurement_noise",
            ConfigKey::JammingEnabled => "jamming.enabled",
            ConfigKey::JammingStart => "jamming.start",
            ConfigKey::JammingEnd => "jamming.end",
            ConfigKey::DemoDt => "demo.dt",
            ConfigKey::DemoGain => "demo.gain",
            ConfigKey::DemoArrivalThreshold => "demo.arrival_threshold",
            ConfigKey::DemoBlend => "demo.blend",
            ConfigKey::DemoTickMs => "demo.tick_ms",
            ConfigKey::DemoSeed => "demo.seed",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "jamming").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "start").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::BackendUrl => config.backend.url.clone(),
            ConfigKey::BackendTimeoutSecs => config.backend.timeout_secs.to_string(),
            ConfigKey::BackendTrajectoryLimit => config.backend.trajectory_limit.to_string(),
            ConfigKey::FilterProcessNoise => config.filter.process_noise.to_string(),
            ConfigKey::FilterMeasurementNoise => config.filter.measurement_noise.to_string(),
            ConfigKey::JammingEnabled => config.jamming.enabled.to_string(),
            ConfigKey::JammingStart => config.jamming.start.to_string(),
            ConfigKey::JammingEnd => config.jamming.end.to_string(),
            ConfigKey::DemoDt => config.demo.dt.to_string(),
            ConfigKey::DemoGain => config.demo.gain.to_string(),
            ConfigKey::DemoArrivalThreshold => config.demo.arrival_threshold.to_string(),
            ConfigKey::DemoBlend => config.demo.blend.to_string(),
            ConfigKey::DemoTickMs => config.demo.tick_ms.to_string(),
            ConfigKey::DemoSeed => config.demo.seed.map(|s| s.to_string()).unwrap_or_default(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    /// Rules spanning several keys (such as the jamming window) are checked by
    /// [`ConfigFile::validate`] when the file is saved.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();

        match self {
            ConfigKey::BackendUrl => {
                config.backend.url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::BackendTimeoutSecs => {
                config.backend.timeout_secs = self.parse(value)?;
            }
            ConfigKey::BackendTrajectoryLimit => {
                config.backend.trajectory_limit = self.parse(value)?;
            }
            ConfigKey::FilterProcessNoise => {
                config.filter.process_noise = self.parse(value)?;
            }
            ConfigKey::FilterMeasurementNoise => {
                config.filter.measurement_noise = self.parse(value)?;
            }
            ConfigKey::JammingEnabled => {
                config.jamming.enabled = super::parser::parse_bool(value);
            }
            ConfigKey::JammingStart => {
                config.jamming.start = self.parse(value)?;
            }
            ConfigKey::JammingEnd => {
                config.jamming.end = self.parse(value)?;
            }
            ConfigKey::DemoDt => {
                config.demo.dt = self.parse(value)?;
            }
            ConfigKey::DemoGain => {
                config.demo.gain = self.parse(value)?;
            }
            ConfigKey::DemoArrivalThreshold => {
                config.demo.arrival_threshold = self.parse(value)?;
            }
            ConfigKey::DemoBlend => {
                config.demo.blend = self.parse(value)?;
            }
            ConfigKey::DemoTickMs => {
                config.demo.tick_ms = self.parse(value)?;
            }
            ConfigKey::DemoSeed => {
                config.demo.seed = if value.is_empty() {
                    None
                } else {
                    Some(self.parse(value)?)
                };
            }
            ConfigKey::LoggingFile => {
                config.logging.file = super::parser::expand_tilde(value);
            }
        }
        Ok(())
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigKeyError> {
        value.parse().map_err(|_| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: format!("cannot parse '{}'", value),
        })
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::BackendUrl => Box::new(UrlSpec),
            ConfigKey::BackendTimeoutSecs => Box::new(PositiveIntegerSpec),
            ConfigKey::BackendTrajectoryLimit => Box::new(PositiveIntegerSpec),
            ConfigKey::FilterProcessNoise => Box::new(NonNegativeNumberSpec),
            ConfigKey::FilterMeasurementNoise => Box::new(NonNegativeNumberSpec),
            ConfigKey::JammingEnabled => Box::new(BooleanSpec),
            ConfigKey::JammingStart => Box::new(NonNegativeNumberSpec),
            ConfigKey::JammingEnd => Box::new(NonNegativeNumberSpec),
            ConfigKey::DemoDt => Box::new(PositiveNumberSpec),
            ConfigKey::DemoGain => Box::new(PositiveNumberSpec),
            ConfigKey::DemoArrivalThreshold => Box::new(PositiveNumberSpec),
            ConfigKey::DemoBlend => Box::new(FractionSpec),
            ConfigKey::DemoTickMs => Box::new(PositiveIntegerSpec),
            ConfigKey::DemoSeed => Box::new(OptionalIntegerSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::BackendUrl,
            ConfigKey::BackendTimeoutSecs,
            ConfigKey::BackendTrajectoryLimit,
            ConfigKey::FilterProcessNoise,
            ConfigKey::FilterMeasurementNoise,
            ConfigKey::JammingEnabled,
            ConfigKey::JammingStart,
            ConfigKey::JammingEnd,
            ConfigKey::DemoDt,
            ConfigKey::DemoGain,
            ConfigKey::DemoArrivalThreshold,
            ConfigKey::DemoBlend,
            ConfigKey::DemoTickMs,
            ConfigKey::DemoSeed,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Check if the value satisfies this specification.
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification for HTTP(S) URLs.
struct UrlSpec;

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("must be a URL starting with 'http://' or 'https://'".to_string())
        }
    }
}

/// Specification for positive integer values.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Specification for integers where empty means "unset".
struct OptionalIntegerSpec;

impl ValueSpecification for OptionalIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| "must be a non-negative integer or empty".to_string())
    }
}

/// Specification for numbers >= 0.
struct NonNegativeNumberSpec;

impl ValueSpecification for NonNegativeNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n >= 0.0 => Ok(()),
            _ => Err("must be a number >= 0".to_string()),
        }
    }
}

/// Specification for numbers > 0.
struct PositiveNumberSpec;

impl ValueSpecification for PositiveNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n > 0.0 => Ok(()),
            _ => Err("must be a positive number".to_string()),
        }
    }
}

/// Specification for numbers within [0, 1].
struct FractionSpec;

impl ValueSpecification for FractionSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if (0.0..=1.0).contains(&n) => Ok(()),
            _ => Err("must be a number between 0 and 1".to_string()),
        }
    }
}

/// Specification for boolean values.
struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        let valid = ["true", "false", "yes", "no", "1", "0", "on", "off"];
        if valid.contains(&lower.as_str()) {
            Ok(())
        } else {
            Err("must be true/false, yes/no, 1/0, or on/off".to_string())
        }
    }
}

/// Specification for path values (non-empty).
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    super::writer::path_to_string(path)
}
