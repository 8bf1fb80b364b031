//! Owned chart handle.
//!
//! A [`Chart`] keeps a private copy of its samples and configuration
//! together with the most recent [`ChartLayout`]. Handles are
//! independent: any number can exist at once, and dropping one is all it
//! takes to destroy it.
//!
//! The embedding layer drives recomputation explicitly. On a container
//! resize it calls [`Chart::resize`] with the new width (debouncing
//! bursts of resize events is the caller's job). Every recomputation
//! runs the full pipeline from the raw samples.
//!
//! ```rust
//! # use svgraph_pipeline::{Chart, ChartConfig, ChartError, Sample};
//! # fn run() -> Result<(), ChartError> {
//! let config = ChartConfig {
//!     scaled: true,
//!     container_width: Some(400.0),
//!     ..ChartConfig::default()
//! };
//! let samples = [Sample::new(0.0, 10.0), Sample::new(100.0, 40.0)];
//! let mut chart = Chart::new(&samples, config)?;
//! assert!((chart.layout().map_or(0.0, |l| l.scale) - 2.71).abs() < 1e-9);
//!
//! let resized = chart.resize(800.0)?;
//! assert!((resized.scale - 5.43).abs() < 1e-9);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

use crate::layout::ChartLayout;
use crate::types::{ChartConfig, ChartError, Sample};

/// A chart instance owned by its caller.
#[derive(Debug, Clone)]
pub struct Chart {
    samples: Vec<Sample>,
    config: ChartConfig,
    layout: Option<ChartLayout>,
}

impl Chart {
    /// Create a chart and compute its first layout.
    ///
    /// # Errors
    ///
    /// Returns the [`ChartError`] from [`crate::process`] if the config or
    /// samples are invalid. Nothing is retained on failure.
    pub fn new(samples: &[Sample], config: ChartConfig) -> Result<Self, ChartError> {
        let layout = crate::process(samples, &config)?;
        Ok(Self {
            samples: samples.to_vec(),
            config,
            layout: Some(layout),
        })
    }

    /// The samples as supplied, in input order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The most recent layout, or `None` after [`clear`](Self::clear).
    #[must_use]
    pub const fn layout(&self) -> Option<&ChartLayout> {
        self.layout.as_ref()
    }

    /// Re-run the pipeline with the current samples and config.
    ///
    /// # Errors
    ///
    /// Propagates any [`ChartError`] from [`crate::process`]. On error the
    /// previous layout is kept.
    pub fn recompute(&mut self) -> Result<&ChartLayout, ChartError> {
        let layout = crate::process(&self.samples, &self.config)?;
        Ok(&*self.layout.insert(layout))
    }

    /// Record a new container width and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidConfig`] if `container_width` is not
    /// finite or is negative. The previous width and layout are kept on
    /// error.
    pub fn resize(&mut self, container_width: f64) -> Result<&ChartLayout, ChartError> {
        let config = ChartConfig {
            container_width: Some(container_width),
            ..self.config.clone()
        };
        let layout = crate::process(&self.samples, &config)?;
        self.config = config;
        Ok(&*self.layout.insert(layout))
    }

    /// Replace the configuration and recompute.
    ///
    /// # Errors
    ///
    /// Propagates any [`ChartError`] from [`crate::process`]; the previous
    /// config and layout are kept on error.
    pub fn set_config(&mut self, config: ChartConfig) -> Result<&ChartLayout, ChartError> {
        let layout = crate::process(&self.samples, &config)?;
        self.config = config;
        Ok(&*self.layout.insert(layout))
    }

    /// Replace the samples and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NonFiniteSample`] if any sample is not
    /// finite; the previous samples and layout are kept on error.
    pub fn set_data(&mut self, samples: &[Sample]) -> Result<&ChartLayout, ChartError> {
        let layout = crate::process(samples, &self.config)?;
        self.samples = samples.to_vec();
        Ok(&*self.layout.insert(layout))
    }

    /// Drop the current layout. The handle stays usable;
    /// [`recompute`](Self::recompute) restores it.
    pub fn clear(&mut self) {
        self.layout = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn demo() -> Vec<Sample> {
        vec![
            Sample::new(40.0, 5.0),
            Sample::new(10.0, 1.0),
            Sample::new(0.0, 3.0),
        ]
    }

    fn scaled(width: f64) -> ChartConfig {
        ChartConfig {
            scaled: true,
            container_width: Some(width),
            ..ChartConfig::default()
        }
    }

    #[test]
    fn new_computes_layout() {
        let chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        let layout = chart.layout().unwrap();
        assert_eq!(layout.points.len(), 3);
        assert!((layout.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn keeps_caller_order() {
        let chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        assert_eq!(chart.samples(), demo().as_slice());
    }

    #[test]
    fn new_fails_fast_without_container() {
        let config = ChartConfig {
            scaled: true,
            ..ChartConfig::default()
        };
        assert_eq!(
            Chart::new(&demo(), config).unwrap_err(),
            ChartError::MissingContainer,
        );
    }

    #[test]
    fn resize_rescales() {
        // extent = 40 + 40 = 80
        let mut chart = Chart::new(&demo(), scaled(80.0)).unwrap();
        assert!((chart.layout().unwrap().scale - 1.0).abs() < f64::EPSILON);

        let layout = chart.resize(800.0).unwrap();
        // 800 * 0.95 / 80 = 9.5
        assert!((layout.scale - 9.5).abs() < 1e-10);
        assert_eq!(chart.config().container_width, Some(800.0));
    }

    #[test]
    fn failed_resize_keeps_previous_state() {
        let mut chart = Chart::new(&demo(), scaled(800.0)).unwrap();
        let before = chart.layout().cloned();
        assert!(chart.resize(f64::NAN).is_err());
        assert_eq!(chart.layout().cloned(), before);
        assert_eq!(chart.config().container_width, Some(800.0));
    }

    #[test]
    fn clear_then_recompute() {
        let mut chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        let before = chart.layout().cloned().unwrap();
        chart.clear();
        assert!(chart.layout().is_none());
        let after = chart.recompute().unwrap().clone();
        assert_eq!(before, after);
    }

    #[test]
    fn set_data_rejects_non_finite() {
        let mut chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        let err = chart
            .set_data(&[Sample::new(0.0, f64::NAN)])
            .unwrap_err();
        assert!(matches!(err, ChartError::NonFiniteSample { index: 0, .. }));
        assert_eq!(chart.samples(), demo().as_slice());
    }

    #[test]
    fn set_data_replaces_samples() {
        let mut chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        let layout = chart.set_data(&[Sample::new(1.0, 1.0)]).unwrap();
        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.path.segment_count(), 0);
    }

    #[test]
    fn set_config_changes_smoothing() {
        let mut chart = Chart::new(&demo(), ChartConfig::default()).unwrap();
        let straight = ChartConfig {
            smoothing: 0.0,
            ..ChartConfig::default()
        };
        chart.set_config(straight).unwrap();
        assert!(chart.config().smoothing.abs() < f64::EPSILON);
    }

    #[test]
    fn handles_are_independent() {
        let mut a = Chart::new(&demo(), scaled(200.0)).unwrap();
        let b = Chart::new(&demo(), scaled(200.0)).unwrap();
        a.resize(1000.0).unwrap();
        assert!(
            (a.layout().unwrap().scale - b.layout().unwrap().scale).abs() > f64::EPSILON,
            "resizing one handle must not affect another",
        );
    }

    #[test]
    fn chart_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Chart>();
    }
}
