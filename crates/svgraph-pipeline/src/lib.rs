//! svgraph-pipeline: Pure chart layout pipeline (sans-IO).
//!
//! Turns `(x, y)` samples into the geometry of a smooth line chart:
//! validate -> sort by x -> bounds -> horizontal scale ->
//! normalize into drawing space -> cubic Bézier path -> vertex markers.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! samples and returns structured data. SVG serialization lives in
//! `svgraph-export`; files and the command line live in `svgraph-cli`.

pub mod bounds;
pub mod chart;
pub mod diagnostics;
pub mod layout;
pub mod marker;
pub mod normalize;
pub mod samples;
pub mod smooth;
pub mod types;

pub use bounds::Bounds;
pub use chart::Chart;
pub use layout::{ChartLayout, Frame, LabelAnchor, Segment};
pub use marker::Marker;
pub use smooth::{CurvePath, PathCommand};
pub use types::{ChartConfig, ChartError, Dimensions, Point, Sample};

/// Run the full layout pipeline.
///
/// The caller's samples are not modified; a sorted copy is used.
///
/// # Pipeline steps
///
/// 1. Validate the config and reject non-finite samples
/// 2. Sort by `x` ascending (stable)
/// 3. Compute data bounds
/// 4. Compute the horizontal scale factor
/// 5. Normalize into drawing space (y inverted, margin offset)
/// 6. Build the smooth cubic path
/// 7. Place one marker per point
/// 8. Compute the document frame (size, axes, labels)
///
/// # Examples
///
/// ```
/// use svgraph_pipeline::{ChartConfig, Point, Sample, process};
///
/// let samples = [Sample::new(10.0, 10.0), Sample::new(0.0, 0.0)];
/// let layout = process(&samples, &ChartConfig::default()).unwrap();
/// assert_eq!(layout.points, vec![Point::new(20.0, 30.0), Point::new(30.0, 20.0)]);
/// assert!(layout.path.to_string().starts_with("M 20,30 C "));
/// ```
///
/// # Errors
///
/// Returns [`ChartError::MissingContainer`] or [`ChartError::InvalidConfig`]
/// if the config is unusable, and [`ChartError::NonFiniteSample`] if a
/// sample has a NaN or infinite coordinate. Errors are raised before any
/// geometry is computed.
pub fn process(samples: &[Sample], config: &ChartConfig) -> Result<ChartLayout, ChartError> {
    // 1. Validation.
    config.validate()?;
    samples::validate(samples)?;

    // 2. Ordering.
    let sorted = samples::sorted_by_x(samples);

    // 3. Bounds.
    let bounds = Bounds::from_samples(&sorted);

    // 4. Scale.
    let scale = normalize::scale_factor(
        &bounds,
        config.margin,
        config.scaled,
        config.container_width,
    );
    log_extent(sorted.len(), &bounds, scale);

    // 5. Normalization.
    let points = normalize::normalize_points(&sorted, &bounds, scale, config.margin);

    // 6. Curve.
    let path = smooth::build_curve_path(&points, config.smoothing);

    // 7. Markers.
    let markers = marker::markers_for(&points);

    // 8. Frame.
    let frame = Frame::new(&bounds, scale, config.margin);
    log_layout(&path, &frame);

    Ok(ChartLayout {
        bounds,
        scale,
        margin: config.margin,
        points,
        path,
        markers,
        frame,
    })
}

/// Debug event emitted once bounds and scale are known.
pub(crate) fn log_extent(sample_count: usize, bounds: &Bounds, scale: f64) {
    tracing::debug!(
        samples = sample_count,
        ?bounds,
        scale,
        "chart extent computed",
    );
}

/// Debug event emitted once the path and frame are built.
pub(crate) fn log_layout(path: &CurvePath, frame: &Frame) {
    tracing::debug!(
        segments = path.segment_count(),
        width = frame.dimensions.width,
        height = frame.dimensions.height,
        "chart layout built",
    );
}
