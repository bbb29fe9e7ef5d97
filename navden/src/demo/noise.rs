//! Sensor noise sources for the demo loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Vec2;

/// Produces additive sensor noise.
pub trait NoiseSource: Send {
    /// One scalar sample in `[-half_width, half_width]`.
    fn sample(&mut self, half_width: f64) -> f64;

    /// Independent samples for both axes.
    fn sample_vec(&mut self, half_width: f64) -> Vec2 {
        let x = self.sample(half_width);
        let y = self.sample(half_width);
        Vec2::new(x, y)
    }
}

/// Uniform noise from a seedable PRNG.
#[derive(Debug, Clone)]
pub struct UniformNoise {
    rng: StdRng,
}

impl UniformNoise {
    /// Seeded generator, or one seeded from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl NoiseSource for UniformNoise {
    fn sample(&mut self, half_width: f64) -> f64 {
        if !(half_width > 0.0) {
            return 0.0;
        }
        self.rng.gen_range(-half_width..=half_width)
    }
}

/// Noise-free sensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self, _half_width: f64) -> f64 {
        0.0
    }
}
