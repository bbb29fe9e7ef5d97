//! One-line statistics over a trajectory.

use crate::model::TrajectoryPoint;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectorySummary {
    pub samples: usize,
    /// Time span from the first to the last sample.
    pub duration: f64,
    pub mean_error: f64,
    pub max_error: f64,
    pub final_error: f64,
    pub min_confidence: f64,
    pub final_confidence: f64,
    pub jammed_samples: usize,
}

/// `None` for an empty trajectory.
pub fn summarize(trajectory: &[TrajectoryPoint]) -> Option<TrajectorySummary> {
    let first = trajectory.first()?;
    let last = trajectory.last()?;

    let error_sum: f64 = trajectory.iter().map(|p| p.error).sum();
    let max_error = trajectory.iter().map(|p| p.error).fold(f64::MIN, f64::max);
    let min_confidence = trajectory
        .iter()
        .map(|p| p.confidence)
        .fold(f64::MAX, f64::min);

    Some(TrajectorySummary {
        samples: trajectory.len(),
        duration: last.time - first.time,
        mean_error: error_sum / trajectory.len() as f64,
        max_error,
        final_error: last.error,
        min_confidence,
        final_confidence: last.confidence,
        jammed_samples: trajectory.iter().filter(|p| p.is_jammed()).count(),
    })
}
