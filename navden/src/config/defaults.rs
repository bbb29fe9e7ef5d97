//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::settings::*;
use crate::client::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRAJECTORY_LIMIT};
use crate::demo::{
    DEFAULT_ARRIVAL_THRESHOLD, DEFAULT_BLEND, DEFAULT_DT, DEFAULT_GAIN, DEFAULT_TICK_MS,
};

// =============================================================================
// Filter defaults
// =============================================================================

/// Default process noise Q.
pub const DEFAULT_PROCESS_NOISE: f64 = 0.5;

/// Default measurement noise R.
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 2.0;

// =============================================================================
// Jamming defaults
// =============================================================================

/// Jamming starts 3 s into the run, matching the backend schedule.
pub const DEFAULT_JAM_START: f64 = 3.0;

/// Jamming ends 6 s into the run.
pub const DEFAULT_JAM_END: f64 = 6.0;

// =============================================================================
// Logging defaults
// =============================================================================

/// Log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "navden.log";

// =============================================================================
// ConfigFile::default()
// =============================================================================

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            backend: BackendSettings {
                url: DEFAULT_BACKEND_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                trajectory_limit: DEFAULT_TRAJECTORY_LIMIT,
            },
            filter: FilterSettings {
                process_noise: DEFAULT_PROCESS_NOISE,
                measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            },
            jamming: JammingSettings {
                enabled: true,
                start: DEFAULT_JAM_START,
                end: DEFAULT_JAM_END,
            },
            demo: DemoSettings {
                dt: DEFAULT_DT,
                gain: DEFAULT_GAIN,
                arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
                blend: DEFAULT_BLEND,
                tick_ms: DEFAULT_TICK_MS,
                seed: None,
            },
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
