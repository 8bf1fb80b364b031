//! Pipeline diagnostics: timing and counts for each stage.
//!
//! [`process_with_diagnostics`] runs the same stages as
//! [`crate::process`] and records how long each took along with the
//! numbers that matter for that stage.
//!
//! Time is read through the [`Clock`] trait so this crate stays free of
//! platform time APIs; the CLI supplies a `std::time::Instant` clock.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::layout::{ChartLayout, Frame};
use crate::types::{ChartConfig, ChartError, Sample};
use crate::{marker, normalize, samples, smooth};

/// Source of timestamps for stage timing.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Capture the current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// Stage 1+2: validation and x-ordering.
    pub sort: StageDiagnostics,
    /// Stage 3: bounds.
    pub bounds: StageDiagnostics,
    /// Stage 4: scale factor.
    pub scale: StageDiagnostics,
    /// Stage 5: normalization into drawing space.
    pub normalize: StageDiagnostics,
    /// Stages 6+7: curve path and markers.
    pub curve: StageDiagnostics,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary across all stages.
    pub summary: PipelineSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Validation and ordering.
    Sort {
        /// Number of input samples.
        sample_count: usize,
        /// Whether the input already was in x-ascending order.
        already_sorted: bool,
    },
    /// Bounds computation.
    Bounds {
        /// The computed bounds.
        bounds: Bounds,
    },
    /// Scale factor computation.
    Scale {
        /// Whether scaling was requested.
        scaled: bool,
        /// Container width, if any.
        container_width: Option<f64>,
        /// Resulting factor.
        factor: f64,
    },
    /// Normalization.
    Normalize {
        /// Number of normalized points.
        point_count: usize,
        /// Margin used.
        margin: f64,
    },
    /// Curve building.
    Curve {
        /// Smoothing coefficient used.
        smoothing: f64,
        /// Number of cubic segments.
        segment_count: usize,
        /// Length of the rendered path data in bytes.
        path_data_len: usize,
    },
}

/// High-level summary for the entire run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Number of input samples.
    pub sample_count: usize,
    /// Number of cubic segments in the output path.
    pub segment_count: usize,
    /// Output document width in pixels.
    pub width: f64,
    /// Output document height in pixels.
    pub height: f64,
}

/// Run the pipeline, timing each stage.
///
/// Produces the same [`ChartLayout`] and the same `debug` events as
/// [`crate::process`].
///
/// # Errors
///
/// Same as [`crate::process`].
pub fn process_with_diagnostics<C: Clock>(
    input: &[Sample],
    config: &ChartConfig,
    clock: &C,
) -> Result<(ChartLayout, PipelineDiagnostics), ChartError> {
    let total_start = clock.now();

    let start = clock.now();
    config.validate()?;
    samples::validate(input)?;
    let already_sorted = input.windows(2).all(|w| w[0].x <= w[1].x);
    let sorted = samples::sorted_by_x(input);
    let sort = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Sort {
            sample_count: sorted.len(),
            already_sorted,
        },
    };

    let start = clock.now();
    let bounds = Bounds::from_samples(&sorted);
    let bounds_diag = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Bounds { bounds },
    };

    let start = clock.now();
    let scale = normalize::scale_factor(
        &bounds,
        config.margin,
        config.scaled,
        config.container_width,
    );
    let scale_diag = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Scale {
            scaled: config.scaled,
            container_width: config.container_width,
            factor: scale,
        },
    };

    crate::log_extent(sorted.len(), &bounds, scale);

    let start = clock.now();
    let points = normalize::normalize_points(&sorted, &bounds, scale, config.margin);
    let normalize_diag = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Normalize {
            point_count: points.len(),
            margin: config.margin,
        },
    };

    let start = clock.now();
    let path = smooth::build_curve_path(&points, config.smoothing);
    let markers = marker::markers_for(&points);
    let curve = StageDiagnostics {
        duration: clock.elapsed(&start),
        metrics: StageMetrics::Curve {
            smoothing: config.smoothing,
            segment_count: path.segment_count(),
            path_data_len: path.to_string().len(),
        },
    };

    let frame = Frame::new(&bounds, scale, config.margin);
    crate::log_layout(&path, &frame);
    let summary = PipelineSummary {
        sample_count: sorted.len(),
        segment_count: path.segment_count(),
        width: frame.dimensions.width,
        height: frame.dimensions.height,
    };

    let layout = ChartLayout {
        bounds,
        scale,
        margin: config.margin,
        points,
        path,
        markers,
        frame,
    };
    let diagnostics = PipelineDiagnostics {
        sort,
        bounds: bounds_diag,
        scale: scale_diag,
        normalize: normalize_diag,
        curve,
        total_duration: clock.elapsed(&total_start),
        summary,
    };

    Ok((layout, diagnostics))
}

impl PipelineDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Pipeline Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Chart: {} samples, {}x{} px",
            self.summary.sample_count, self.summary.width, self.summary.height,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages = [
            ("Sort", &self.sort),
            ("Bounds", &self.bounds),
            ("Scale", &self.scale),
            ("Normalize", &self.normalize),
            ("Curve", &self.curve),
        ];

        for (name, diag) in stages {
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.push(String::new());
        lines.push(format!("Segments: {}", self.summary.segment_count));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Sort {
            sample_count,
            already_sorted,
        } => {
            let order = if *already_sorted { "in order" } else { "reordered" };
            format!("{sample_count} samples ({order})")
        }
        StageMetrics::Bounds { bounds } => format!(
            "x=[{}, {}] y=[{}, {}]",
            bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max,
        ),
        StageMetrics::Scale {
            scaled,
            container_width,
            factor,
        } => match container_width {
            Some(width) if *scaled => format!("x{factor:.2} (container {width}px)"),
            _ => format!("x{factor:.2}"),
        },
        StageMetrics::Normalize {
            point_count,
            margin,
        } => format!("{point_count} pts, margin={margin}"),
        StageMetrics::Curve {
            smoothing,
            segment_count,
            path_data_len,
        } => format!("s={smoothing:.2} {segment_count} segments, {path_data_len} bytes"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    /// Collects the message of every event it sees.
    #[derive(Clone, Default)]
    struct Messages(Arc<Mutex<Vec<String>>>);

    impl Messages {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    struct MessageVisitor<'a>(&'a mut Vec<String>);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0.push(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Messages {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut messages = self.0.lock().unwrap();
            event.record(&mut MessageVisitor(&mut messages));
        }
    }

    /// Deterministic clock: every reading advances by one millisecond.
    struct StepClock(Cell<u64>);

    impl Clock for StepClock {
        type Instant = u64;

        fn now(&self) -> u64 {
            let t = self.0.get();
            self.0.set(t + 1);
            t
        }

        fn elapsed(&self, since: &u64) -> Duration {
            Duration::from_millis(self.now() - since)
        }
    }

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 280.0),
            Sample::new(40.0, 50.0),
            Sample::new(10.0, 80.0),
        ]
    }

    #[test]
    fn duration_ms_converts_correctly() {
        let d = Duration::from_millis(1234);
        let ms = duration_ms(d);
        assert!((ms - 1234.0).abs() < 0.01);
    }

    #[test]
    fn layout_matches_process() {
        let config = ChartConfig::default();
        let clock = StepClock(Cell::new(0));
        let (layout, _) = process_with_diagnostics(&samples(), &config, &clock).unwrap();
        assert_eq!(layout, crate::process(&samples(), &config).unwrap());
    }

    #[test]
    fn metrics_reflect_input() {
        let clock = StepClock(Cell::new(0));
        let (_, diag) =
            process_with_diagnostics(&samples(), &ChartConfig::default(), &clock).unwrap();
        assert!(matches!(
            diag.sort.metrics,
            StageMetrics::Sort {
                sample_count: 3,
                already_sorted: false,
            }
        ));
        assert!(matches!(
            diag.curve.metrics,
            StageMetrics::Curve {
                segment_count: 2,
                ..
            }
        ));
        assert_eq!(diag.summary.sample_count, 3);
        assert!((diag.summary.width - 120.0).abs() < 1e-10);
        assert!((diag.summary.height - 320.0).abs() < 1e-10);
        assert!(diag.total_duration >= diag.curve.duration);
    }

    #[test]
    fn stage_events_match_process() {
        let messages = Messages::default();
        let subscriber = tracing_subscriber::registry().with(messages.clone());
        let config = ChartConfig::default();

        tracing::subscriber::with_default(subscriber, || {
            crate::process(&samples(), &config).unwrap();
            let from_process = messages.take();

            let clock = StepClock(Cell::new(0));
            process_with_diagnostics(&samples(), &config, &clock).unwrap();
            let from_diagnostics = messages.take();

            for expected in ["chart extent computed", "chart layout built"] {
                assert!(
                    from_diagnostics.iter().any(|m| m == expected),
                    "missing {expected:?} in {from_diagnostics:?}",
                );
            }
            let stage = |all: Vec<String>| -> Vec<String> {
                all.into_iter().filter(|m| m.starts_with("chart ")).collect()
            };
            assert_eq!(stage(from_process), stage(from_diagnostics));
        });
    }

    #[test]
    fn errors_propagate() {
        let clock = StepClock(Cell::new(0));
        let result = process_with_diagnostics(
            &[Sample::new(f64::NAN, 0.0)],
            &ChartConfig::default(),
            &clock,
        );
        assert!(matches!(result, Err(ChartError::NonFiniteSample { .. })));
    }

    #[test]
    fn report_lists_every_stage() {
        let clock = StepClock(Cell::new(0));
        let (_, diag) =
            process_with_diagnostics(&samples(), &ChartConfig::default(), &clock).unwrap();
        let report = diag.report();
        assert!(report.contains("Pipeline Diagnostics Report"));
        for stage in ["Sort", "Bounds", "Scale", "Normalize", "Curve"] {
            assert!(report.contains(stage), "report is missing {stage}");
        }
        assert!(report.contains("reordered"));
    }

    #[test]
    fn diagnostics_serialize_durations_as_seconds() {
        let clock = StepClock(Cell::new(0));
        let (_, diag) =
            process_with_diagnostics(&samples(), &ChartConfig::default(), &clock).unwrap();
        let json: serde_json::Value = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["sort"]["duration"], 0.001);
        assert_eq!(json["summary"]["segment_count"], 2);
    }
}
