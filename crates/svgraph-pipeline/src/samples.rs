//! Sample validation and ordering.
//!
//! This is the first pipeline step: reject non-finite input, then
//! establish the x-ascending order every later stage relies on.

use std::cmp::Ordering;

use crate::types::{ChartError, Sample};

/// Check that every sample has finite coordinates.
///
/// # Errors
///
/// Returns [`ChartError::NonFiniteSample`] for the first sample with a
/// NaN or infinite coordinate.
pub fn validate(samples: &[Sample]) -> Result<(), ChartError> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => {
            let Sample { x, y } = samples[index];
            Err(ChartError::NonFiniteSample { index, x, y })
        }
        None => Ok(()),
    }
}

/// Return a copy of `samples` sorted by `x` ascending.
///
/// The sort is stable: samples sharing an `x` value keep their input
/// order. The caller's slice is left untouched.
///
/// Samples are expected to be finite (see [`validate`]); incomparable
/// values are treated as equal.
#[must_use = "returns the sorted samples"]
pub fn sorted_by_x(samples: &[Sample]) -> Vec<Sample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64, y: f64) -> Sample {
        Sample::new(x, y)
    }

    #[test]
    fn validate_accepts_finite() {
        assert!(validate(&[s(0.0, 1.0), s(-3.5, 1e9)]).is_ok());
    }

    #[test]
    fn validate_accepts_empty() {
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn validate_reports_first_bad_index() {
        let samples = [s(0.0, 1.0), s(1.0, f64::INFINITY), s(f64::NAN, 0.0)];
        let result = validate(&samples);
        assert!(
            matches!(
                result,
                Err(ChartError::NonFiniteSample { index: 1, x, y })
                    if (x - 1.0).abs() < f64::EPSILON && y.is_infinite()
            ),
            "expected NonFiniteSample at index 1, got {result:?}",
        );
    }

    #[test]
    fn sorts_ascending_by_x() {
        let samples = [s(40.0, 5.0), s(10.0, 1.0), s(0.0, 3.0)];
        let sorted = sorted_by_x(&samples);
        assert_eq!(sorted, vec![s(0.0, 3.0), s(10.0, 1.0), s(40.0, 5.0)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let samples = [s(5.0, 1.0), s(0.0, 0.0), s(5.0, 2.0), s(5.0, 3.0)];
        let sorted = sorted_by_x(&samples);
        assert_eq!(
            sorted,
            vec![s(0.0, 0.0), s(5.0, 1.0), s(5.0, 2.0), s(5.0, 3.0)],
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let samples = vec![s(2.0, 0.0), s(1.0, 0.0)];
        let _ = sorted_by_x(&samples);
        assert_eq!(samples, vec![s(2.0, 0.0), s(1.0, 0.0)]);
    }
}
