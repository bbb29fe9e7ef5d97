//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// Cross-field rules are checked separately by [`ConfigFile::validate`].
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [backend] section
    if let Some(section) = ini.section(Some("backend")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                config.backend.url = v.trim_end_matches('/').to_string();
            }
        }
        if let Some(v) = section.get("timeout_secs") {
            config.backend.timeout_secs = parse_number(
                "backend",
                "timeout_secs",
                v,
                "must be a positive integer (seconds)",
            )?;
        }
        if let Some(v) = section.get("trajectory_limit") {
            config.backend.trajectory_limit = parse_number(
                "backend",
                "trajectory_limit",
                v,
                "must be a positive integer",
            )?;
        }
    }

    // [filter] section
    if let Some(section) = ini.section(Some("filter")) {
        if let Some(v) = section.get("process_noise") {
            config.filter.process_noise =
                parse_number("filter", "process_noise", v, "must be a number")?;
        }
        if let Some(v) = section.get("measurement_noise") {
            config.filter.measurement_noise =
                parse_number("filter", "measurement_noise", v, "must be a number")?;
        }
    }

    // [jamming] section
    if let Some(section) = ini.section(Some("jamming")) {
        if let Some(v) = section.get("enabled") {
            config.jamming.enabled = parse_bool(v);
        }
        if let Some(v) = section.get("start") {
            config.jamming.start =
                parse_number("jamming", "start", v, "must be a number (seconds)")?;
        }
        if let Some(v) = section.get("end") {
            config.jamming.end = parse_number("jamming", "end", v, "must be a number (seconds)")?;
        }
    }

    // [demo] section
    if let Some(section) = ini.section(Some("demo")) {
        if let Some(v) = section.get("dt") {
            config.demo.dt = parse_number("demo", "dt", v, "must be a number (seconds)")?;
        }
        if let Some(v) = section.get("gain") {
            config.demo.gain = parse_number("demo", "gain", v, "must be a number")?;
        }
        if let Some(v) = section.get("arrival_threshold") {
            config.demo.arrival_threshold =
                parse_number("demo", "arrival_threshold", v, "must be a number")?;
        }
        if let Some(v) = section.get("blend") {
            config.demo.blend = parse_number("demo", "blend", v, "must be a number")?;
        }
        if let Some(v) = section.get("tick_ms") {
            config.demo.tick_ms = parse_number(
                "demo",
                "tick_ms",
                v,
                "must be a positive integer (milliseconds)",
            )?;
        }
        if let Some(v) = section.get("seed") {
            let v = v.trim();
            config.demo.seed = if v.is_empty() {
                None
            } else {
                Some(parse_number("demo", "seed", v, "must be an integer or empty")?)
            };
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        })
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
