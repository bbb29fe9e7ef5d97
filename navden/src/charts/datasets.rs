//! Point series for the path, error and confidence charts.

use crate::model::{TimeWindow, TrajectoryPoint};

use super::{
    Rgb, CONFIDENCE_COLOR, CONFIDENCE_LABEL, ERROR_COLOR, ERROR_LABEL, ESTIMATED_PATH_COLOR,
    ESTIMATED_PATH_LABEL, TRUE_PATH_COLOR, TRUE_PATH_LABEL,
};

/// One labelled series.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Axis bounds of a 2D plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Grow each axis by `fraction` of its span on both sides.
    ///
    /// A zero-width axis is widened by one unit so a single point still plots.
    pub fn padded(self, fraction: f64) -> Self {
        let pad = |min: f64, max: f64| {
            let span = max - min;
            if span > 0.0 {
                span * fraction
            } else {
                1.0
            }
        };
        let px = pad(self.x_min, self.x_max);
        let py = pad(self.y_min, self.y_max);
        Self {
            x_min: self.x_min - px,
            x_max: self.x_max + px,
            y_min: self.y_min - py,
            y_max: self.y_max + py,
        }
    }

    fn include(&mut self, (x, y): (f64, f64)) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }
}

pub fn true_path(trajectory: &[TrajectoryPoint]) -> Vec<(f64, f64)> {
    trajectory.iter().map(|p| (p.true_x, p.true_y)).collect()
}

pub fn estimated_path(trajectory: &[TrajectoryPoint]) -> Vec<(f64, f64)> {
    trajectory.iter().map(|p| (p.est_x, p.est_y)).collect()
}

/// `(time, error)` pairs.
pub fn error_series(trajectory: &[TrajectoryPoint]) -> Vec<(f64, f64)> {
    trajectory.iter().map(|p| (p.time, p.error)).collect()
}

/// `(time, confidence)` pairs.
pub fn confidence_series(trajectory: &[TrajectoryPoint]) -> Vec<(f64, f64)> {
    trajectory.iter().map(|p| (p.time, p.confidence)).collect()
}

/// True and estimated path, in that order.
pub fn path_datasets(trajectory: &[TrajectoryPoint]) -> [Dataset; 2] {
    [
        Dataset {
            label: TRUE_PATH_LABEL,
            color: TRUE_PATH_COLOR,
            points: true_path(trajectory),
        },
        Dataset {
            label: ESTIMATED_PATH_LABEL,
            color: ESTIMATED_PATH_COLOR,
            points: estimated_path(trajectory),
        },
    ]
}

pub fn error_dataset(trajectory: &[TrajectoryPoint]) -> Dataset {
    Dataset {
        label: ERROR_LABEL,
        color: ERROR_COLOR,
        points: error_series(trajectory),
    }
}

pub fn confidence_dataset(trajectory: &[TrajectoryPoint]) -> Dataset {
    Dataset {
        label: CONFIDENCE_LABEL,
        color: CONFIDENCE_COLOR,
        points: confidence_series(trajectory),
    }
}

/// Contiguous runs of jammed samples, as time windows.
///
/// A run is bounded by the times of its first and last jammed sample, so a
/// single jammed sample gives a zero-width window.
pub fn jamming_windows(trajectory: &[TrajectoryPoint]) -> Vec<TimeWindow> {
    let mut windows = Vec::new();
    let mut current: Option<TimeWindow> = None;

    for point in trajectory {
        if point.is_jammed() {
            match current.as_mut() {
                Some(window) => window.end = point.time,
                None => current = Some(TimeWindow::new(point.time, point.time)),
            }
        } else if let Some(window) = current.take() {
            windows.push(window);
        }
    }
    windows.extend(current);
    windows
}

/// Bounds covering both the true and the estimated path.
pub fn bounds(trajectory: &[TrajectoryPoint]) -> Option<Bounds> {
    let first = trajectory.first()?;
    let mut bounds = Bounds {
        x_min: first.true_x,
        x_max: first.true_x,
        y_min: first.true_y,
        y_max: first.true_y,
    };
    for p in trajectory {
        bounds.include((p.true_x, p.true_y));
        bounds.include((p.est_x, p.est_y));
    }
    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GpsStatus, NavigationMode};

    fn point(time: f64, jammed: bool) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            true_x: time * 10.0,
            true_y: 5.0,
            est_x: time * 10.0 + 1.0,
            est_y: 4.0,
            error: time,
            confidence: 100.0 - time,
            gps_status: if jammed {
                GpsStatus::Jammed
            } else {
                GpsStatus::Active
            },
            nav_mode: NavigationMode::Gps,
        }
    }

    #[test]
    fn test_series() {
        let trajectory = vec![point(0.0, false), point(0.5, false)];

        assert_eq!(true_path(&trajectory), vec![(0.0, 5.0), (5.0, 5.0)]);
        assert_eq!(estimated_path(&trajectory), vec![(1.0, 4.0), (6.0, 4.0)]);
        assert_eq!(error_series(&trajectory), vec![(0.0, 0.0), (0.5, 0.5)]);
        assert_eq!(
            confidence_series(&trajectory),
            vec![(0.0, 100.0), (0.5, 99.5)]
        );

        let [truth, estimate] = path_datasets(&trajectory);
        assert_eq!(truth.label, TRUE_PATH_LABEL);
        assert_eq!(estimate.color, ESTIMATED_PATH_COLOR);
        assert_eq!(error_dataset(&trajectory).label, ERROR_LABEL);
        assert_eq!(confidence_dataset(&trajectory).points.len(), 2);
    }

    #[test]
    fn test_jamming_windows() {
        let trajectory = vec![
            point(1.0, false),
            point(2.0, true),
            point(3.0, true),
            point(4.0, false),
            point(5.0, true),
        ];

        assert_eq!(
            jamming_windows(&trajectory),
            vec![TimeWindow::new(2.0, 3.0), TimeWindow::new(5.0, 5.0)]
        );
    }

    #[test]
    fn test_no_jamming() {
        assert!(jamming_windows(&[point(1.0, false)]).is_empty());
        assert!(jamming_windows(&[]).is_empty());
    }

    #[test]
    fn test_bounds_cover_both_paths() {
        let trajectory = vec![point(0.0, false), point(2.0, false)];
        let b = bounds(&trajectory).unwrap();
        assert_eq!(
            b,
            Bounds {
                x_min: 0.0,
                x_max: 21.0,
                y_min: 4.0,
                y_max: 5.0
            }
        );
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn test_padded_single_point() {
        let b = Bounds {
            x_min: 3.0,
            x_max: 3.0,
            y_min: 0.0,
            y_max: 10.0,
        }
        .padded(0.1);
        assert_eq!(b.x_min, 2.0);
        assert_eq!(b.x_max, 4.0);
        assert_eq!(b.y_min, -1.0);
        assert_eq!(b.y_max, 11.0);
    }
}
