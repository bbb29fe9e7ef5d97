//! Low-level visual components composed by the dashboard widgets.
//!
//! - **Sparkline**: compact time-series strip using Unicode blocks
//! - **ProgressBar**: horizontal bar toward a goal
//! - **Format**: human-readable values (metres, percentages, durations)

pub mod format;
mod progress_bar;
mod sparkline;

pub use progress_bar::{ProgressBar, ProgressBarStyle};
pub use sparkline::SparklineHistory;
