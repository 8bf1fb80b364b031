//! Shared types for the svgraph chart pipeline.

use serde::{Deserialize, Serialize};

/// A raw `(x, y)` sample in data space.
///
/// Serialized as a two-element array `[x, y]`, which is the shape chart
/// data is usually supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Sample {
    /// Horizontal data value.
    pub x: f64,
    /// Vertical data value.
    pub y: f64,
}

impl Sample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Sample> for (f64, f64) {
    fn from(sample: Sample) -> Self {
        (sample.x, sample.y)
    }
}

/// A 2D point in drawing space (origin top-left, y increasing downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in pixels from the left edge.
    pub x: f64,
    /// Vertical position in pixels from the top edge.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// Computed as `sqrt(dx² + dy²)`, not `hypot`, so rendered path data
    /// stays bit-for-bit reproducible.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Document size in drawing-space units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Configuration for a single chart render.
///
/// Deserialization fills missing fields from [`Default`], so a partial
/// JSON object such as `{"smoothing": 0.2}` is a valid config.
///
/// Values are checked by [`validate`](Self::validate), which
/// [`crate::process`] and [`crate::Chart`] call before any computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Curvature coefficient. 0 draws straight segments; values much
    /// above 0.3 overshoot and self-intersect.
    ///
    /// Must lie in `[0, 1]`.
    pub smoothing: f64,

    /// Stretch the chart horizontally to fill `container_width`.
    pub scaled: bool,

    /// Label drawn under the horizontal axis.
    pub x_name: String,

    /// Label drawn beside the vertical axis.
    pub y_name: String,

    /// Padding around the plot, also the offset of both axis lines.
    pub margin: f64,

    /// Measured width of the rendering target in pixels.
    ///
    /// Required when `scaled` is `true`.
    pub container_width: Option<f64>,
}

impl ChartConfig {
    /// Default smoothing coefficient.
    pub const DEFAULT_SMOOTHING: f64 = 0.15;
    /// Default margin in pixels.
    pub const DEFAULT_MARGIN: f64 = 20.0;
    /// Default horizontal axis label.
    pub const DEFAULT_X_NAME: &'static str = "X";
    /// Default vertical axis label.
    pub const DEFAULT_Y_NAME: &'static str = "Y";

    /// Check the configuration for values the pipeline cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::MissingContainer`] if `scaled` is set without
    /// a `container_width`. Returns [`ChartError::InvalidConfig`] for a
    /// non-finite or negative margin or container width, or a smoothing
    /// coefficient outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "margin must be a finite value >= 0, got {}",
                self.margin,
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(ChartError::InvalidConfig(format!(
                "smoothing must be within [0, 1], got {}",
                self.smoothing,
            )));
        }
        match self.container_width {
            None if self.scaled => Err(ChartError::MissingContainer),
            Some(width) if !width.is_finite() || width < 0.0 => {
                Err(ChartError::InvalidConfig(format!(
                    "container width must be a finite value >= 0, got {width}",
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            smoothing: Self::DEFAULT_SMOOTHING,
            scaled: false,
            x_name: Self::DEFAULT_X_NAME.to_owned(),
            y_name: Self::DEFAULT_Y_NAME.to_owned(),
            margin: Self::DEFAULT_MARGIN,
            container_width: None,
        }
    }
}

/// Errors that can occur while laying out a chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ChartError {
    /// Scaling was requested but there is no container to measure.
    #[error("container is not defined: scaling requires a container width")]
    MissingContainer,

    /// Chart configuration is invalid.
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    /// A sample has a NaN or infinite coordinate.
    #[error("sample {index} is not finite: ({x}, {y})")]
    NonFiniteSample {
        /// Position of the sample in the caller's input.
        index: usize,
        /// Horizontal value as given.
        x: f64,
        /// Vertical value as given.
        y: f64,
    },
}
