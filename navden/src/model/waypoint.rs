//! Operator-placed mission waypoints.

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Identifier of a waypoint within a plan. Never reused after deletion.
pub type WaypointId = u32;

/// A client-local 2D target point. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub fn new(id: WaypointId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
