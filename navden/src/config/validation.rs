//! Cross-field validation of a loaded [`ConfigFile`].
//!
//! The parser only checks that each value has the right type. The rules here
//! need more than one value, or a range the type cannot express.

use thiserror::Error;

use super::settings::ConfigFile;

/// A configuration that parses but cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{name} must be >= 0 (got {value})")]
    NegativeNoise { name: &'static str, value: f64 },

    #[error("jamming.start must be >= 0 (got {0})")]
    NegativeJammingStart(f64),

    #[error("jamming.end ({end}) must be greater than jamming.start ({start})")]
    EmptyJammingWindow { start: f64, end: f64 },

    #[error("{name} must be > 0 (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("demo.blend must be within [0, 1] (got {0})")]
    BlendOutOfRange(f64),

    #[error("backend.url must start with http:// or https:// (got '{0}')")]
    BackendUrl(String),
}

impl ConfigFile {
    /// Check the rules that span several values.
    ///
    /// The jamming window is checked even when jamming is disabled, so that
    /// re-enabling it never produces an invalid schedule.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = self.backend.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::BackendUrl(self.backend.url.clone()));
        }

        for (name, value) in [
            ("filter.process_noise", self.filter.process_noise),
            ("filter.measurement_noise", self.filter.measurement_noise),
        ] {
            if !(value >= 0.0) {
                return Err(SettingsError::NegativeNoise { name, value });
            }
        }

        if !(self.jamming.start >= 0.0) {
            return Err(SettingsError::NegativeJammingStart(self.jamming.start));
        }
        if !(self.jamming.end > self.jamming.start) {
            return Err(SettingsError::EmptyJammingWindow {
                start: self.jamming.start,
                end: self.jamming.end,
            });
        }

        for (name, value) in [
            ("demo.dt", self.demo.dt),
            ("demo.gain", self.demo.gain),
            ("demo.arrival_threshold", self.demo.arrival_threshold),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("backend.timeout_secs", self.backend.timeout_secs),
            ("backend.trajectory_limit", self.backend.trajectory_limit as u64),
            ("demo.tick_ms", self.demo.tick_ms),
        ] {
            if value == 0 {
                return Err(SettingsError::NotPositive {
                    name,
                    value: value as f64,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.demo.blend) {
            return Err(SettingsError::BlendOutOfRange(self.demo.blend));
        }

        Ok(())
    }
}
