//! Data-to-drawing coordinate transform.
//!
//! Maps sorted samples into drawing space:
//!
//! ```text
//! px = x × scale + margin
//! py = margin + y_max − y
//! ```
//!
//! The Y-axis is **flipped** so that larger data values sit higher in
//! the image. Only the horizontal axis responds to the container width;
//! vertical scale is always 1, so charts stretch to fill the width but
//! keep their vertical proportions.
//!
//! `margin` is the smallest coordinate on both axes for data at or above
//! the origin, which leaves room for the axis lines.

use crate::bounds::Bounds;
use crate::types::{Point, Sample};

/// Fraction of the container width the scaled chart may occupy.
pub const SCALE_SAFETY: f64 = 0.95;

/// Compute the horizontal scale factor.
///
/// Returns 1 unless `scaled` is set and `container_width` exceeds the
/// unscaled extent `x_max + 2 × margin`. In that case the factor is
/// `container_width × SCALE_SAFETY / (x_max + 2 × margin)`, rounded to
/// two decimal places.
///
/// An extent that is not positive (all-negative `x` with a small margin)
/// cannot be stretched meaningfully and also yields 1.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn scale_factor(bounds: &Bounds, margin: f64, scaled: bool, container_width: Option<f64>) -> f64 {
    let extent = bounds.x_max + 2.0 * margin;
    match container_width {
        Some(width) if scaled && extent > 0.0 && width > extent => {
            round2(width * SCALE_SAFETY / extent)
        }
        _ => 1.0,
    }
}

/// Round half-up to two decimal places.
///
/// Rounds the exact binary value: `110 × 0.95 / 100` evaluates to
/// `1.0449999...` and gives `1.04`, where `(v × 100).round() / 100`
/// would see `104.5` and give `1.05`.
fn round2(value: f64) -> f64 {
    // Exact ties (odd multiples of 1/8) are rounded upwards explicitly;
    // `value × 100` is exact for them.
    if (value * 8.0).fract() == 0.0 && (value * 4.0).fract() != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Map samples into drawing space, preserving their order.
#[must_use]
#[allow(clippy::suboptimal_flops)] // mul_add rounds differently
pub fn normalize_points(samples: &[Sample], bounds: &Bounds, scale: f64, margin: f64) -> Vec<Point> {
    samples
        .iter()
        .map(|s| Point::new(s.x * scale + margin, margin + bounds.y_max - s.y))
        .collect()
}
