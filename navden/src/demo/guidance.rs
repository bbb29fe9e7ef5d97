//! Proportional pursuit guidance.

use crate::model::Vec2;

/// Constant-magnitude pursuit toward the active waypoint.
///
/// `accel = k * (target - pos) / |target - pos|`, or exactly zero once the
/// vehicle is within the arrival threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guidance {
    pub gain: f64,
    pub arrival_threshold: f64,
}

/// Result of one guidance evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceOutput {
    pub acceleration: Vec2,
    pub distance: f64,
    pub arrived: bool,
}

impl Guidance {
    pub fn new(gain: f64, arrival_threshold: f64) -> Self {
        Self {
            gain,
            arrival_threshold,
        }
    }

    pub fn evaluate(&self, position: Vec2, target: Vec2) -> GuidanceOutput {
        let offset = target - position;
        let distance = offset.length();

        if distance < self.arrival_threshold {
            return GuidanceOutput {
                acceleration: Vec2::ZERO,
                distance,
                arrived: true,
            };
        }

        // normalize() only fails at zero length, which the threshold excludes
        // unless the threshold itself is zero.
        let acceleration = offset
            .normalize()
            .map(|unit| unit * self.gain)
            .unwrap_or(Vec2::ZERO);

        GuidanceOutput {
            acceleration,
            distance,
            arrived: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_accel_points_at_target_with_gain_magnitude() {
        let guidance = Guidance::new(4.0, 5.0);
        let out = guidance.evaluate(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));

        assert!(!out.arrived);
        assert_eq!(out.distance, 50.0);
        assert!((out.acceleration.x - 4.0 * 0.6).abs() < EPS);
        assert!((out.acceleration.y - 4.0 * 0.8).abs() < EPS);
        assert!((out.acceleration.length() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_initial_direction_of_default_scene() {
        let guidance = Guidance::new(4.0, 5.0);
        let out = guidance.evaluate(Vec2::new(200.0, 300.0), Vec2::new(500.0, 150.0));

        let expected = Vec2::new(300.0, -150.0).normalize().unwrap();
        let direction = out.acceleration.normalize().unwrap();
        assert!((direction.x - expected.x).abs() < EPS);
        assert!((direction.y - expected.y).abs() < EPS);
    }

    #[test]
    fn test_zero_inside_threshold() {
        let guidance = Guidance::new(4.0, 5.0);
        let out = guidance.evaluate(Vec2::new(10.0, 10.0), Vec2::new(13.0, 13.0));

        assert!(out.arrived);
        assert_eq!(out.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_threshold_is_strict() {
        let guidance = Guidance::new(4.0, 5.0);
        let out = guidance.evaluate(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));

        assert!(!out.arrived);
        assert!((out.acceleration.length() - 4.0).abs() < EPS);
    }
}
