//! Chart series and summaries derived from a trajectory.
//!
//! Everything here is a pure function over `&[TrajectoryPoint]`; the TUI and
//! the text commands render the results.

mod datasets;
mod jamming;
mod summary;

pub use datasets::{
    bounds, confidence_dataset, confidence_series, error_dataset, error_series, estimated_path,
    jamming_windows, path_datasets, true_path, Bounds, Dataset,
};
pub use jamming::{analyze_jamming, RECOVERY_TIME_SECS};
pub use summary::{summarize, TrajectorySummary};

/// 24-bit colour, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const TRUE_PATH_LABEL: &str = "True Path";
pub const ESTIMATED_PATH_LABEL: &str = "Estimated Path";
pub const ERROR_LABEL: &str = "Position Error";
pub const CONFIDENCE_LABEL: &str = "Confidence";

pub const TRUE_PATH_COLOR: Rgb = Rgb::new(0x10, 0xb9, 0x81);
pub const ESTIMATED_PATH_COLOR: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
pub const ERROR_COLOR: Rgb = Rgb::new(0xef, 0x44, 0x44);
pub const CONFIDENCE_COLOR: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
pub const JAMMING_COLOR: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
