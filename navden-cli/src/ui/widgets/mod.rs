//! Dashboard widgets.
//!
//! - `telemetry` - latest navigation state with sparklines
//! - `mission` - progress, waypoints, final metrics and jamming analysis
//! - `charts` - path and time-series charts
//! - `primitives` - sparkline, progress bar and formatting building blocks

pub mod charts;
mod mission;
pub mod primitives;
mod telemetry;

pub use charts::{PathChart, SeriesKind, TimeSeriesChart};
pub use mission::MissionWidget;
pub use telemetry::{TelemetryHistory, TelemetryWidget};
