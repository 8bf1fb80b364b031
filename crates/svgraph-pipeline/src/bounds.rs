//! Data-space extent of a sample set.

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Minimum and maximum sample values on each axis.
///
/// Every sample satisfies `x_min <= x <= x_max` and
/// `y_min <= y <= y_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest `x`.
    pub x_min: f64,
    /// Largest `x`.
    pub x_max: f64,
    /// Smallest `y`.
    pub y_min: f64,
    /// Largest `y`.
    pub y_max: f64,
}

impl Bounds {
    /// Compute bounds in a single pass.
    ///
    /// All four fields are seeded from the first sample, so a single
    /// sample collapses to `min == max` on both axes and all-negative or
    /// all-positive data keeps its true extent. An empty slice yields
    /// all-zero bounds.
    #[must_use]
    pub fn from_samples(samples: &[Sample]) -> Self {
        let Some((first, rest)) = samples.split_first() else {
            return Self::default();
        };

        let mut bounds = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for s in rest {
            if s.x < bounds.x_min {
                bounds.x_min = s.x;
            }
            if s.x > bounds.x_max {
                bounds.x_max = s.x;
            }
            if s.y < bounds.y_min {
                bounds.y_min = s.y;
            }
            if s.y > bounds.y_max {
                bounds.y_max = s.y;
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64, y: f64) -> Sample {
        Sample::new(x, y)
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(Bounds::from_samples(&[]), Bounds::default());
    }

    #[test]
    fn single_sample_collapses() {
        let b = Bounds::from_samples(&[s(7.0, -3.0)]);
        assert!((b.x_min - 7.0).abs() < f64::EPSILON);
        assert!((b.x_max - 7.0).abs() < f64::EPSILON);
        assert!((b.y_min + 3.0).abs() < f64::EPSILON);
        assert!((b.y_max + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn positive_minimum_is_not_pinned_to_zero() {
        let b = Bounds::from_samples(&[s(5.0, 12.0), s(9.0, 4.0), s(6.0, 30.0)]);
        assert!((b.x_min - 5.0).abs() < f64::EPSILON);
        assert!((b.y_min - 4.0).abs() < f64::EPSILON);
        assert!((b.x_max - 9.0).abs() < f64::EPSILON);
        assert!((b.y_max - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_values() {
        let b = Bounds::from_samples(&[s(-10.0, -1.0), s(-20.0, -5.0)]);
        assert!((b.x_min + 20.0).abs() < f64::EPSILON);
        assert!((b.x_max + 10.0).abs() < f64::EPSILON);
        assert!((b.y_min + 5.0).abs() < f64::EPSILON);
        assert!((b.y_max + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_sample_is_inside() {
        let samples = [
            s(0.0, 280.0),
            s(10.0, 80.0),
            s(40.0, 50.0),
            s(150.0, 160.0),
            s(380.0, 10.0),
        ];
        let b = Bounds::from_samples(&samples);
        for p in &samples {
            assert!(b.x_min <= p.x && p.x <= b.x_max);
            assert!(b.y_min <= p.y && p.y <= b.y_max);
        }
    }
}
