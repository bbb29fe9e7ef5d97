//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let seed = config
        .demo
        .seed
        .map(|s| s.to_string())
        .unwrap_or_default();

    format!(
        r#"[backend]
; Base URL of the NAVDEN backend. The live stream uses <url>/ws.
url = {}
; Timeout in seconds for REST requests (default: 10)
timeout_secs = {}
; Samples requested by `navden trajectory` when --limit is not given (default: 100)
trajectory_limit = {}

[filter]
; Process noise Q (default: 0.5). The demo uses it as the IMU noise half-width.
process_noise = {}
; Measurement noise R (default: 2.0). The demo uses it as the GPS noise half-width.
measurement_noise = {}

[jamming]
; GPS jamming schedule in seconds of simulated time (default: 3.0 to 6.0)
; Both ends are inclusive. end must be greater than start.
enabled = {}
start = {}
end = {}

[demo]
; Integration step in seconds (default: 0.05)
dt = {}
; Guidance gain k (default: 4.0)
gain = {}
; A waypoint counts as reached below this distance (default: 5.0)
arrival_threshold = {}
; Correction blend K applied while GPS is available (default: 0.15)
blend = {}
; Wall-clock milliseconds between demo ticks (default: 50)
tick_ms = {}
; Noise seed for reproducible runs. Leave empty for a random seed.
seed = {}

[logging]
; Log file path (default: ~/.navden/navden.log)
file = {}
"#,
        config.backend.url,
        config.backend.timeout_secs,
        config.backend.trajectory_limit,
        config.filter.process_noise,
        config.filter.measurement_noise,
        config.jamming.enabled,
        config.jamming.start,
        config.jamming.end,
        config.demo.dt,
        config.demo.gain,
        config.demo.arrival_threshold,
        config.demo.blend,
        config.demo.tick_ms,
        seed,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
