//! Smooth curve construction through an ordered point sequence.
//!
//! Each point after the first becomes the end of one cubic Bézier
//! segment. The two control points of a segment are placed along a
//! tangent estimated from neighbouring points: the control direction at
//! a vertex is parallel to the chord between its predecessor and
//! successor, and its distance is that chord's length times the
//! smoothing coefficient. This gives a Catmull-Rom-like curve whose
//! curvature follows the local point spacing.
//!
//! For the segment ending at point `i`:
//!
//! ```text
//! start control = control_point(p[i-1], p[i-2], p[i],   Forward)
//! end control   = control_point(p[i],   p[i-1], p[i+1], Reversed)
//! ```
//!
//! At the ends of the sequence a missing neighbour is replaced by the
//! point itself, which turns the tangent into a one-sided difference.
//!
//! The smoothing coefficient is used as given. Values outside `[0, 1]`
//! are rejected earlier by [`ChartConfig::validate`](crate::ChartConfig::validate).

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Which way a control point is pushed along the tangent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along the predecessor-to-successor chord.
    Forward,
    /// Against the chord (tangent angle + π).
    Reversed,
}

/// Place a control point for `current`.
///
/// `previous` and `next` are the tangent references; either falls back
/// to `current` when absent.
#[must_use]
#[allow(clippy::suboptimal_flops)] // mul_add rounds differently
pub fn control_point(
    current: Point,
    previous: Option<Point>,
    next: Option<Point>,
    smoothing: f64,
    direction: Direction,
) -> Point {
    let p = previous.unwrap_or(current);
    let n = next.unwrap_or(current);
    let length = p.distance(n) * smoothing;
    let angle = (n.y - p.y).atan2(n.x - p.x)
        + match direction {
            Direction::Forward => 0.0,
            Direction::Reversed => PI,
        };

    Point::new(
        current.x + angle.cos() * length,
        current.y + angle.sin() * length,
    )
}

/// A single SVG path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// `M x,y`
    MoveTo(Point),
    /// `C cx1,cy1 cx2,cy2 x,y`
    CurveTo {
        /// Control point leaving the previous vertex.
        start_control: Point,
        /// Control point entering `end`.
        end_control: Point,
        /// Segment end vertex.
        end: Point,
    },
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {}", Coord(*p)),
            Self::CurveTo {
                start_control,
                end_control,
                end,
            } => write!(
                f,
                "C {} {} {}",
                Coord(*start_control),
                Coord(*end_control),
                Coord(*end),
            ),
        }
    }
}

/// Formats a point as `x,y` with full `f64` precision.
struct Coord(Point);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", unsigned_zero(self.0.x), unsigned_zero(self.0.y))
    }
}

/// `-0` prints as `-0`; path data wants plain `0`.
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// A move-to followed by zero or more cubic segments.
///
/// `Display` renders SVG path data: `M x,y C cx1,cy1 cx2,cy2 x,y ...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePath(Vec<PathCommand>);

impl CurvePath {
    /// Returns `true` if the path has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of commands, including the initial move-to.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of cubic segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// All commands in drawing order.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }
}

impl fmt::Display for CurvePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands = self.0.iter();
        if let Some(first) = commands.next() {
            write!(f, "{first}")?;
        }
        for command in commands {
            write!(f, " {command}")?;
        }
        Ok(())
    }
}

/// Build the smooth path through `points`.
///
/// An empty slice yields an empty path; a single point yields a lone
/// move-to.
#[must_use = "returns the curve path"]
pub fn build_curve_path(points: &[Point], smoothing: f64) -> CurvePath {
    let Some(&first) = points.first() else {
        return CurvePath::default();
    };

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(first));

    for i in 1..points.len() {
        let end = points[i];
        let start_control = control_point(
            points[i - 1],
            i.checked_sub(2).map(|j| points[j]),
            Some(end),
            smoothing,
            Direction::Forward,
        );
        let end_control = control_point(
            end,
            Some(points[i - 1]),
            points.get(i + 1).copied(),
            smoothing,
            Direction::Reversed,
        );
        tracing::trace!(
            segment = i,
            ?start_control,
            ?end_control,
            "curve segment",
        );
        commands.push(PathCommand::CurveTo {
            start_control,
            end_control,
            end,
        });
    }

    CurvePath(commands)
}
