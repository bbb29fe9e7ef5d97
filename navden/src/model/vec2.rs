//! Planar vector used for positions, velocities and accelerations.
//!
//! The backend is inconsistent about how it encodes positions: REST payloads
//! use arrays (`[x, y]`, sometimes `[x, y, z]`) while WebSocket frames use
//! objects (`{"x": .., "y": .., "z": ..}`). [`Vec2`] accepts both and always
//! serializes back to the two-element array form.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A 2D vector in simulation units (metres for backend data, canvas units for the demo).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalize(self) -> Option<Vec2> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Heading of this vector in radians, measured from the +x axis.
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl Serialize for Vec2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

/// Wire encodings accepted for a position.
#[derive(Deserialize)]
#[serde(untagged)]
enum Vec2Repr {
    Seq(Vec<f64>),
    Map { x: f64, y: f64 },
}

impl<'de> Deserialize<'de> for Vec2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Vec2Repr::deserialize(deserializer)? {
            Vec2Repr::Seq(values) if values.len() >= 2 => Ok(Vec2::new(values[0], values[1])),
            Vec2Repr::Seq(values) => Err(de::Error::invalid_length(
                values.len(),
                &"a position with at least 2 components",
            )),
            Vec2Repr::Map { x, y } => Ok(Vec2::new(x, y)),
        }
    }
}
