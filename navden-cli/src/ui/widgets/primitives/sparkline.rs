//! Sparkline chart primitive.
//!
//! A sparkline is a compact chart showing recent values as a series of
//! vertical bars. The telemetry panel uses it for error and confidence.

/// Unicode characters for sparkline visualization (8 height levels).
/// From lowest (▁) to highest (█).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Rolling history buffer for sparkline data.
///
/// Keeps the most recent `max_samples` values; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct SparklineHistory {
    /// Value samples (most recent last).
    samples: Vec<f64>,
    max_samples: usize,
}

impl SparklineHistory {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: Vec::with_capacity(max_samples),
            max_samples,
        }
    }

    /// Add a new value, evicting the oldest one when full.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() >= self.max_samples {
            self.samples.remove(0);
        }
        self.samples.push(value);
    }

    /// Most recent value, or 0.0 if empty.
    pub fn current(&self) -> f64 {
        self.samples.last().copied().unwrap_or(0.0)
    }

    pub fn peak(&self) -> f64 {
        self.samples.iter().cloned().fold(0.0_f64, f64::max)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Render the last `width` samples, scaled to `max_val`.
    ///
    /// Pads with spaces on the left when there are fewer samples than
    /// `width`. A fixed scale keeps bars comparable between frames; pass
    /// `None` to scale against the visible peak instead.
    pub fn render(&self, width: usize, max_val: Option<f64>) -> String {
        if self.samples.is_empty() {
            return " ".repeat(width);
        }

        let start = self.samples.len().saturating_sub(width);
        let visible = &self.samples[start..];
        let max_val = max_val
            .unwrap_or_else(|| visible.iter().cloned().fold(0.0_f64, f64::max))
            .max(0.001);

        let bars: String = visible
            .iter()
            .map(|&val| {
                let normalized = (val / max_val).clamp(0.0, 1.0);
                let index = ((normalized * 7.0).round() as usize).min(7);
                SPARKLINE_CHARS[index]
            })
            .collect();

        format!("{}{}", " ".repeat(width - visible.len()), bars)
    }
}
