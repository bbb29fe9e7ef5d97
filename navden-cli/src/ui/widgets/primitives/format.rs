//! Formatting helpers for dashboard values.

use std::time::Duration;

/// Compact wall-clock duration: "5s", "2m30s", "1h15m".
pub fn format_duration_compact(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Simulated time in seconds with one decimal.
pub fn format_sim_time(seconds: f64) -> String {
    format!("{:.1}s", seconds)
}

pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.precision$}%", value, precision = precision)
}

/// Distance in metres, switching to kilometres from 1000 m.
pub fn format_meters(meters: f64) -> String {
    if meters.abs() >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.2} m", meters)
    }
}
