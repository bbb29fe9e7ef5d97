//! Mission planner: an ordered, editable list of waypoints on a 2D canvas.
//!
//! Waypoints are client-local. They drive the demo loop and are persisted to
//! `~/.navden/waypoints.json` by [`store`]; the backend never sees them.

pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::demo::default_waypoints;
use crate::model::{Vec2, Waypoint, WaypointId};

/// Width of the planning canvas, in world units.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Height of the planning canvas, in world units.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Planner editing errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("No waypoint with id {0}")]
    UnknownWaypoint(WaypointId),

    #[error("Index {index} is out of range for {len} waypoints")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Waypoint coordinates must be finite (got {x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Ordered waypoint list with stable ids.
///
/// Ids increase monotonically and are never reused after a delete, so an id
/// seen by the UI keeps naming the same waypoint for the life of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    waypoints: Vec<Waypoint>,
    next_id: WaypointId,
}

impl Default for MissionPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionPlan {
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            next_id: 1,
        }
    }

    /// Plan built from positions, in order. Non-finite positions are skipped.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        let mut plan = Self::new();
        plan.extend_from(positions);
        plan
    }

    /// The demo route on the 800×600 canvas.
    pub fn demo_default() -> Self {
        Self::from_positions(default_waypoints())
    }

    /// The five waypoints the backend mission flies.
    pub fn backend_default() -> Self {
        Self::from_positions([
            Vec2::new(20.0, 10.0),
            Vec2::new(40.0, 20.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(20.0, 40.0),
            Vec2::new(0.0, 0.0),
        ])
    }

    /// Append a waypoint, clamped to the canvas.
    pub fn add(&mut self, x: f64, y: f64) -> Result<WaypointId, PlannerError> {
        let waypoint = self.allocate(x, y)?;
        self.waypoints.push(waypoint);
        Ok(waypoint.id)
    }

    /// Insert a waypoint before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, x: f64, y: f64) -> Result<WaypointId, PlannerError> {
        if index > self.waypoints.len() {
            return Err(PlannerError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            });
        }
        let waypoint = self.allocate(x, y)?;
        self.waypoints.insert(index, waypoint);
        Ok(waypoint.id)
    }

    /// Drag a waypoint to a new position, clamped to the canvas.
    pub fn move_to(&mut self, id: WaypointId, x: f64, y: f64) -> Result<(), PlannerError> {
        let index = self.index_of(id)?;
        let (x, y) = clamp_to_canvas(x, y)?;
        self.waypoints[index].x = x;
        self.waypoints[index].y = y;
        Ok(())
    }

    /// Move the waypoint at `from` so it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), PlannerError> {
        let len = self.waypoints.len();
        for index in [from, to] {
            if index >= len {
                return Err(PlannerError::IndexOutOfRange { index, len });
            }
        }
        let waypoint = self.waypoints.remove(from);
        self.waypoints.insert(to, waypoint);
        Ok(())
    }

    /// Swap with the previous waypoint. No-op for the first one.
    pub fn move_up(&mut self, id: WaypointId) -> Result<(), PlannerError> {
        let index = self.index_of(id)?;
        if index > 0 {
            self.waypoints.swap(index, index - 1);
        }
        Ok(())
    }

    /// Swap with the next waypoint. No-op for the last one.
    pub fn move_down(&mut self, id: WaypointId) -> Result<(), PlannerError> {
        let index = self.index_of(id)?;
        if index + 1 < self.waypoints.len() {
            self.waypoints.swap(index, index + 1);
        }
        Ok(())
    }

    pub fn remove(&mut self, id: WaypointId) -> Result<Waypoint, PlannerError> {
        let index = self.index_of(id)?;
        Ok(self.waypoints.remove(index))
    }

    /// Remove every waypoint. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Replace the waypoints with the demo route, keeping the id counter.
    pub fn restore_demo_route(&mut self) {
        self.waypoints.clear();
        self.extend_from(default_waypoints());
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    pub fn index_of(&self, id: WaypointId) -> Result<usize, PlannerError> {
        self.waypoints
            .iter()
            .position(|w| w.id == id)
            .ok_or(PlannerError::UnknownWaypoint(id))
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Positions in flight order, for the guidance loop.
    pub fn targets(&self) -> Vec<Vec2> {
        self.waypoints.iter().map(Waypoint::position).collect()
    }

    /// Length of the polyline from `start` through every waypoint.
    pub fn total_length(&self, start: Vec2) -> f64 {
        self.waypoints
            .iter()
            .fold((start, 0.0), |(from, total), w| {
                let to = w.position();
                (to, total + from.distance(to))
            })
            .1
    }

    /// Raise the id counter past every stored id.
    ///
    /// A hand-edited plan file can carry a counter that would hand out an id
    /// already in use.
    pub(crate) fn repair_id_counter(&mut self) {
        let max_id = self.waypoints.iter().map(|w| w.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            tracing::warn!(
                next_id = self.next_id,
                max_id,
                "Plan id counter behind stored ids, raising it"
            );
            self.next_id = max_id + 1;
        }
    }

    fn extend_from(&mut self, positions: impl IntoIterator<Item = Vec2>) {
        for p in positions {
            if let Ok(waypoint) = self.allocate(p.x, p.y) {
                self.waypoints.push(waypoint);
            }
        }
    }

    fn allocate(&mut self, x: f64, y: f64) -> Result<Waypoint, PlannerError> {
        let (x, y) = clamp_to_canvas(x, y)?;
        let id = self.next_id;
        self.next_id += 1;
        Ok(Waypoint::new(id, x, y))
    }
}

fn clamp_to_canvas(x: f64, y: f64) -> Result<(f64, f64), PlannerError> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(PlannerError::NonFinite { x, y });
    }
    Ok((x.clamp(0.0, CANVAS_WIDTH), y.clamp(0.0, CANVAS_HEIGHT)))
}
