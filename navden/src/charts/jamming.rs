//! Client-side jamming impact analysis.
//!
//! Mirrors the backend's `/jamming-analysis` computation so the same numbers
//! are available for streamed and demo runs.

use crate::model::{JammingAnalysis, TimeWindow, TrajectoryPoint};

/// Recovery time the backend reports whenever a jam was observed.
pub const RECOVERY_TIME_SECS: f64 = 2.3;

/// Split errors before/during/after `window` and summarise the jam.
///
/// The split is half-open: a sample at exactly `window.end` counts as after.
///
/// - `error_before_jam` / `error_after_recovery` are means (0 when empty)
/// - `peak_error_during_jam` is the maximum inside the window (0 when empty)
/// - `error_increase_factor` is peak / mean-before, or 1 when mean-before is 0
/// - `recovery_time` is [`RECOVERY_TIME_SECS`] once two or more samples fall
///   inside the window
///
/// Values are rounded to two decimals like the backend's.
pub fn analyze_jamming(trajectory: &[TrajectoryPoint], window: TimeWindow) -> JammingAnalysis {
    let mut before = Vec::new();
    let mut during = Vec::new();
    let mut after = Vec::new();

    for point in trajectory {
        if point.time < window.start {
            before.push(point.error);
        } else if point.time < window.end {
            during.push(point.error);
        } else {
            after.push(point.error);
        }
    }

    let avg_before = mean(&before);
    let avg_after = mean(&after);
    let peak = during.iter().copied().fold(0.0_f64, f64::max);
    let factor = if avg_before > 0.0 {
        peak / avg_before
    } else {
        1.0
    };
    let recovery = if during.len() >= 2 {
        RECOVERY_TIME_SECS
    } else {
        0.0
    };

    JammingAnalysis {
        jam_start_time: window.start,
        jam_end_time: window.end,
        jam_duration: window.duration(),
        error_before_jam: round2(avg_before),
        peak_error_during_jam: round2(peak),
        error_after_recovery: round2(avg_after),
        recovery_time: recovery,
        error_increase_factor: round2(factor),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GpsStatus, NavigationMode};

    fn sample(time: f64, error: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            true_x: 0.0,
            true_y: 0.0,
            est_x: 0.0,
            est_y: 0.0,
            error,
            confidence: 90.0,
            gps_status: GpsStatus::Active,
            nav_mode: NavigationMode::Gps,
        }
    }

    #[test]
    fn test_analysis_splits_by_time() {
        let trajectory = vec![
            sample(1.0, 0.5),
            sample(2.0, 1.5),
            sample(3.0, 2.0),
            sample(4.5, 6.0),
            sample(6.0, 4.0),
            sample(7.0, 3.0),
            sample(8.0, 1.0),
        ];

        let analysis = analyze_jamming(&trajectory, TimeWindow::new(3.0, 6.0));

        assert_eq!(analysis.jam_duration, 3.0);
        assert_eq!(analysis.error_before_jam, 1.0);
        assert_eq!(analysis.peak_error_during_jam, 6.0);
        // (4 + 3 + 1) / 3, the sample at t = 6 included.
        assert_eq!(analysis.error_after_recovery, 2.67);
        assert_eq!(analysis.error_increase_factor, 6.0);
        assert_eq!(analysis.recovery_time, RECOVERY_TIME_SECS);
    }

    #[test]
    fn test_sample_at_window_end_counts_as_after() {
        let trajectory = vec![sample(2.0, 1.0), sample(3.0, 2.0), sample(6.0, 9.0)];
        let analysis = analyze_jamming(&trajectory, TimeWindow::new(3.0, 6.0));

        assert_eq!(analysis.peak_error_during_jam, 2.0);
        assert_eq!(analysis.error_after_recovery, 9.0);
        assert_eq!(analysis.recovery_time, 0.0);
    }

    #[test]
    fn test_no_error_before_gives_unit_factor() {
        let trajectory = vec![sample(3.5, 2.0), sample(4.0, 3.0)];
        let analysis = analyze_jamming(&trajectory, TimeWindow::new(3.0, 6.0));

        assert_eq!(analysis.error_before_jam, 0.0);
        assert_eq!(analysis.error_increase_factor, 1.0);
        assert_eq!(analysis.peak_error_during_jam, 3.0);
    }

    #[test]
    fn test_single_jammed_sample_has_no_recovery() {
        let trajectory = vec![sample(1.0, 1.0), sample(4.0, 3.0), sample(7.0, 1.0)];
        let analysis = analyze_jamming(&trajectory, TimeWindow::new(3.0, 6.0));
        assert_eq!(analysis.recovery_time, 0.0);
    }

    #[test]
    fn test_empty_trajectory() {
        let analysis = analyze_jamming(&[], TimeWindow::new(3.0, 6.0));
        assert_eq!(analysis.peak_error_during_jam, 0.0);
        assert_eq!(analysis.error_increase_factor, 1.0);
        assert_eq!(analysis.jam_start_time, 3.0);
    }
}
