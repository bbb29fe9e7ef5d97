//! Chart widgets over the session trajectory.
//!
//! Series come from `navden::charts`; this module only maps them onto
//! ratatui's `Chart`. Jamming windows are drawn as amber brackets.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset as ChartDataset, GraphType, Widget},
};

use navden::charts::{
    self, Bounds, Dataset, Rgb, CONFIDENCE_COLOR, ERROR_COLOR, JAMMING_COLOR,
};
use navden::model::{TimeWindow, TrajectoryPoint, Vec2};

/// Map a backend-neutral colour onto the terminal palette.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .into_iter()
        .map(|v| Span::styled(format!("{:.0}", v), Style::default().fg(Color::DarkGray)))
        .collect()
}

fn series<'a>(dataset: &'a Dataset, graph_type: GraphType) -> ChartDataset<'a> {
    ChartDataset::default()
        .name(dataset.label)
        .marker(Marker::Braille)
        .graph_type(graph_type)
        .style(Style::default().fg(to_color(dataset.color)))
        .data(&dataset.points)
}

/// Bracket outline of a time window spanning the full y range.
fn window_outline(window: TimeWindow, y_min: f64, y_max: f64) -> Vec<(f64, f64)> {
    vec![
        (window.start, y_min),
        (window.start, y_max),
        (window.end, y_max),
        (window.end, y_min),
    ]
}

/// True vs estimated path with the planned waypoints.
pub struct PathChart<'a> {
    trajectory: &'a [TrajectoryPoint],
    waypoints: &'a [Vec2],
}

impl<'a> PathChart<'a> {
    pub fn new(trajectory: &'a [TrajectoryPoint], waypoints: &'a [Vec2]) -> Self {
        Self {
            trajectory,
            waypoints,
        }
    }

    /// Plot bounds covering both paths and every waypoint.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = charts::bounds(self.trajectory).or_else(|| {
            self.waypoints.first().map(|w| Bounds {
                x_min: w.x,
                x_max: w.x,
                y_min: w.y,
                y_max: w.y,
            })
        })?;
        for w in self.waypoints {
            bounds.x_min = bounds.x_min.min(w.x);
            bounds.x_max = bounds.x_max.max(w.x);
            bounds.y_min = bounds.y_min.min(w.y);
            bounds.y_max = bounds.y_max.max(w.y);
        }
        Some(bounds.padded(0.05))
    }
}

impl Widget for PathChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(bounds) = self.bounds() else {
            return;
        };

        let [true_path, estimated_path] = charts::path_datasets(self.trajectory);
        let waypoints: Vec<(f64, f64)> = self.waypoints.iter().map(|w| (w.x, w.y)).collect();

        let datasets = vec![
            ChartDataset::default()
                .name("Waypoints")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&waypoints),
            series(&true_path, GraphType::Line),
            series(&estimated_path, GraphType::Line),
        ];

        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .bounds([bounds.x_min, bounds.x_max])
                    .labels(axis_labels(bounds.x_min, bounds.x_max)),
            )
            .y_axis(
                Axis::default()
                    .bounds([bounds.y_min, bounds.y_max])
                    .labels(axis_labels(bounds.y_min, bounds.y_max)),
            )
            .render(area, buf);
    }
}

/// Which per-sample value a time-series chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Error,
    Confidence,
}

impl SeriesKind {
    fn dataset(self, trajectory: &[TrajectoryPoint]) -> Dataset {
        match self {
            SeriesKind::Error => charts::error_dataset(trajectory),
            SeriesKind::Confidence => charts::confidence_dataset(trajectory),
        }
    }

    fn color(self) -> Color {
        match self {
            SeriesKind::Error => to_color(ERROR_COLOR),
            SeriesKind::Confidence => to_color(CONFIDENCE_COLOR),
        }
    }

    /// Y range for the series. Confidence is pinned to 0-100.
    fn y_bounds(self, dataset: &Dataset) -> [f64; 2] {
        match self {
            SeriesKind::Confidence => [0.0, 100.0],
            SeriesKind::Error => {
                let peak = dataset
                    .points
                    .iter()
                    .map(|&(_, y)| y)
                    .fold(0.0_f64, f64::max);
                [0.0, (peak * 1.1).max(1.0)]
            }
        }
    }
}

/// Error or confidence over time, with jamming windows marked.
pub struct TimeSeriesChart<'a> {
    trajectory: &'a [TrajectoryPoint],
    kind: SeriesKind,
    scheduled_jamming: Option<TimeWindow>,
}

impl<'a> TimeSeriesChart<'a> {
    pub fn new(trajectory: &'a [TrajectoryPoint], kind: SeriesKind) -> Self {
        Self {
            trajectory,
            kind,
            scheduled_jamming: None,
        }
    }

    /// Window to mark before any jammed sample has been observed.
    pub fn with_scheduled_jamming(mut self, window: Option<TimeWindow>) -> Self {
        self.scheduled_jamming = window;
        self
    }

    /// Observed jamming windows, or the scheduled one if none were seen.
    pub fn jamming_windows(&self) -> Vec<TimeWindow> {
        let observed = charts::jamming_windows(self.trajectory);
        if observed.is_empty() {
            self.scheduled_jamming.into_iter().collect()
        } else {
            observed
        }
    }
}

impl Widget for TimeSeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Some(first), Some(last)) = (self.trajectory.first(), self.trajectory.last()) else {
            return;
        };

        let dataset = self.kind.dataset(self.trajectory);
        let [y_min, y_max] = self.kind.y_bounds(&dataset);
        let x_min = first.time;
        let x_max = if last.time > first.time {
            last.time
        } else {
            first.time + 1.0
        };

        let outlines: Vec<Vec<(f64, f64)>> = self
            .jamming_windows()
            .into_iter()
            .map(|w| window_outline(w, y_min, y_max))
            .collect();

        let mut datasets: Vec<ChartDataset> = outlines
            .iter()
            .map(|points| {
                ChartDataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(to_color(JAMMING_COLOR)))
                    .data(points)
            })
            .collect();
        datasets.push(series(&dataset, GraphType::Line).style(Style::default().fg(self.kind.color())));

        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .bounds([x_min, x_max])
                    .labels(axis_labels(x_min, x_max)),
            )
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels(axis_labels(y_min, y_max)),
            )
            .render(area, buf);
    }
}
