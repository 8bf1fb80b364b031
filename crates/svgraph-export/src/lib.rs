//! svgraph-export: Pure format serializers (sans-IO)
//!
//! Converts chart layouts into output formats. Currently supports SVG.

pub mod svg;

pub use svg::{AxisLabels, SvgMetadata, build_path_data, render, to_svg};
