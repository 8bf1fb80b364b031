//! Vertex markers: a pair of concentric dots on every data point.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Radius of the outer dot.
pub const OUTER_RADIUS: f64 = 3.0;
/// Radius of the inner dot.
pub const INNER_RADIUS: f64 = 1.5;

/// Concentric dots drawn on one normalized point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Shared center of both dots.
    pub center: Point,
    /// Radius of the outer dot.
    pub outer_radius: f64,
    /// Radius of the inner dot.
    pub inner_radius: f64,
}

impl Marker {
    /// Marker with the standard radii centered on `center`.
    #[must_use]
    pub const fn at(center: Point) -> Self {
        Self {
            center,
            outer_radius: OUTER_RADIUS,
            inner_radius: INNER_RADIUS,
        }
    }
}

/// One marker per point, in input order.
#[must_use]
pub fn markers_for(points: &[Point]) -> Vec<Marker> {
    points.iter().copied().map(Marker::at).collect()
}
