//! SVG export serializer.
//!
//! Converts a [`ChartLayout`] into an SVG document string using the
//! [`svg`] crate for document construction and XML escaping.
//!
//! The document contains, in order:
//!
//! - optional `<title>`, `<desc>` and `<metadata>` ([`SvgMetadata`])
//! - a group with the two axis labels
//! - a group with the two axis lines
//! - the smooth `<path>` (omitted when there are no points)
//! - a group with two concentric `<circle>` markers per point
//!
//! Class names (`svgraph`, `svgraph-axis`, `svgraph-path`,
//! `svgraph-circle-outer`, `svgraph-circle`) are kept stable so pages can
//! style charts from CSS.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Circle, Description, Element, Group, Line, Path, Title};
use svg::node::{Node, Text};

use svgraph_pipeline::{ChartConfig, ChartError, ChartLayout, CurvePath, LabelAnchor, Sample};

/// Metadata to embed in the SVG document.
///
/// All fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized [`ChartConfig`] JSON — emitted inside a `<metadata>`
    /// element wrapped in a namespaced `<svgraph:chart>` element, so
    /// exported files carry the settings that produced them.
    pub config_json: Option<&'a str>,
}

/// Axis label text.
#[derive(Debug, Clone, Copy)]
pub struct AxisLabels<'a> {
    /// Horizontal axis label.
    pub x: &'a str,
    /// Vertical axis label.
    pub y: &'a str,
}

impl<'a> AxisLabels<'a> {
    /// Take the labels from a chart configuration.
    #[must_use]
    pub fn from_config(config: &'a ChartConfig) -> Self {
        Self {
            x: &config.x_name,
            y: &config.y_name,
        }
    }
}

/// Build the SVG path `d` attribute for a curve.
///
/// Coordinates are written at full `f64` precision.
///
/// # Examples
///
/// ```
/// use svgraph_pipeline::{ChartConfig, Sample, process};
/// use svgraph_export::build_path_data;
///
/// let layout = process(&[Sample::new(5.0, 5.0)], &ChartConfig::default()).unwrap();
/// assert_eq!(build_path_data(&layout.path), "M 25,20");
/// ```
#[must_use]
pub fn build_path_data(path: &CurvePath) -> String {
    path.to_string()
}

/// Build a middle-anchored `<text>` label with a `<tspan>` child.
fn label(text: &str, anchor: &LabelAnchor) -> Element {
    let mut tspan = Element::new("tspan");
    tspan.append(Text::new(text));

    let mut el = Element::new("text");
    el.assign("x", anchor.position.x);
    el.assign("y", anchor.position.y);
    el.assign("text-anchor", "middle");
    if anchor.rotation.abs() > f64::EPSILON {
        el.assign(
            "transform",
            format!(
                "rotate({} {} {})",
                anchor.rotation, anchor.origin.x, anchor.origin.y,
            ),
        );
    }
    el.append(tspan);
    el
}

/// Serialize a chart layout into an SVG document string.
///
/// # Examples
///
/// ```
/// use svgraph_pipeline::{ChartConfig, Sample, process};
/// use svgraph_export::{AxisLabels, SvgMetadata, to_svg};
///
/// let config = ChartConfig::default();
/// let layout = process(&[Sample::new(0.0, 0.0), Sample::new(10.0, 10.0)], &config).unwrap();
/// let metadata = SvgMetadata {
///     title: Some("growth"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&layout, AxisLabels::from_config(&config), &metadata);
/// assert!(svg.contains("<title>growth</title>"));
/// assert!(svg.contains(r#"d="M 20,30 C "#));
/// ```
#[must_use]
pub fn to_svg(layout: &ChartLayout, labels: AxisLabels<'_>, metadata: &SvgMetadata<'_>) -> String {
    let frame = &layout.frame;
    let mut doc = Document::new()
        .set("class", "svgraph")
        .set("width", frame.dimensions.width)
        .set("height", frame.dimensions.height);

    // Optional <title> element
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    // Optional <desc> element
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    // Optional <metadata> element with the chart config
    if let Some(config_json) = metadata.config_json {
        let mut chart_el = Element::new("svgraph:chart");
        chart_el.assign("xmlns:svgraph", "urn:svgraph:chart:1");
        chart_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(chart_el);
        doc = doc.add(metadata_el);
    }

    let labels_group = Group::new()
        .add(label(labels.x, &frame.x_label))
        .add(label(labels.y, &frame.y_label));
    doc = doc.add(labels_group);

    let axes_group = [frame.y_axis, frame.x_axis]
        .into_iter()
        .fold(Group::new(), |group, axis| {
            group.add(
                Line::new()
                    .set("class", "svgraph-axis")
                    .set("x1", axis.from.x)
                    .set("y1", axis.from.y)
                    .set("x2", axis.to.x)
                    .set("y2", axis.to.y)
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            )
        });
    doc = doc.add(axes_group);

    if layout.path.is_empty() {
        tracing::debug!("no points, skipping curve path");
    } else {
        let path = Path::new()
            .set("class", "svgraph-path")
            .set("d", build_path_data(&layout.path))
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    }

    let markers_group = layout
        .markers
        .iter()
        .fold(Group::new(), |group, marker| {
            group
                .add(
                    Circle::new()
                        .set("class", "svgraph-circle-outer")
                        .set("cx", marker.center.x)
                        .set("cy", marker.center.y)
                        .set("r", marker.outer_radius),
                )
                .add(
                    Circle::new()
                        .set("class", "svgraph-circle")
                        .set("cx", marker.center.x)
                        .set("cy", marker.center.y)
                        .set("r", marker.inner_radius),
                )
        });
    doc = doc.add(markers_group);

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// Lay out `samples` and serialize the result in one step.
///
/// # Errors
///
/// Returns any [`ChartError`] from [`svgraph_pipeline::process`].
pub fn render(
    samples: &[Sample],
    config: &ChartConfig,
    metadata: &SvgMetadata<'_>,
) -> Result<String, ChartError> {
    let layout = svgraph_pipeline::process(samples, config)?;
    Ok(to_svg(&layout, AxisLabels::from_config(config), metadata))
}
