//! Document frame geometry: image size, axis lines and label anchors.
//!
//! The frame only depends on the bounds, the horizontal scale and the
//! margin. With `mx = x_max × scale` and `my = y_max`:
//!
//! ```text
//! width    = mx + 4 × margin
//! height   = my + 2 × margin
//! y axis   = (margin, 0) -> (margin, margin + my + 0.5)
//! x axis   = (2 × margin + mx, margin + my) -> (margin, margin + my)
//! x label  = ((mx − x_min × scale) / 2 + margin, 2 × margin + my)
//! y label  = (−(my + margin) / 2 + margin, 0), rotated −90° about (margin, margin / 2)
//! ```

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::marker::Marker;
use crate::smooth::CurvePath;
use crate::types::{Dimensions, Point};

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint.
    pub from: Point,
    /// Second endpoint.
    pub to: Point,
}

/// Where an axis label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    /// Text anchor position (middle-anchored).
    pub position: Point,
    /// Clockwise rotation in degrees applied about `origin`.
    pub rotation: f64,
    /// Rotation origin.
    pub origin: Point,
}

/// Axis and label geometry of the chart image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Image size.
    pub dimensions: Dimensions,
    /// Vertical axis line.
    pub y_axis: Segment,
    /// Horizontal axis line.
    pub x_axis: Segment,
    /// Anchor of the horizontal axis label.
    pub x_label: LabelAnchor,
    /// Anchor of the vertical axis label.
    pub y_label: LabelAnchor,
}

impl Frame {
    /// Compute the frame for the given extent.
    #[must_use]
    pub fn new(bounds: &Bounds, scale: f64, margin: f64) -> Self {
        let max_x = bounds.x_max * scale;
        let min_x = bounds.x_min * scale;
        let max_y = bounds.y_max;
        let baseline = margin + max_y;

        Self {
            dimensions: Dimensions {
                width: 4.0f64.mul_add(margin, max_x),
                height: 2.0f64.mul_add(margin, max_y),
            },
            y_axis: Segment {
                from: Point::new(margin, 0.0),
                to: Point::new(margin, baseline + 0.5),
            },
            x_axis: Segment {
                from: Point::new(2.0f64.mul_add(margin, max_x), baseline),
                to: Point::new(margin, baseline),
            },
            x_label: LabelAnchor {
                position: Point::new((max_x - min_x) / 2.0 + margin, 2.0f64.mul_add(margin, max_y)),
                rotation: 0.0,
                origin: Point::new(0.0, 0.0),
            },
            y_label: LabelAnchor {
                position: Point::new(-(max_y + margin) / 2.0 + margin, 0.0),
                rotation: -90.0,
                origin: Point::new(margin, margin / 2.0),
            },
        }
    }
}

/// Everything derived from one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Data-space extent of the samples.
    pub bounds: Bounds,
    /// Horizontal scale factor applied to `x`.
    pub scale: f64,
    /// Margin used for the transform and the frame.
    pub margin: f64,
    /// Normalized points in x-ascending order.
    pub points: Vec<Point>,
    /// Smooth path through `points`.
    pub path: CurvePath,
    /// One marker per point.
    pub markers: Vec<Marker>,
    /// Image size, axes and label anchors.
    pub frame: Frame,
}
