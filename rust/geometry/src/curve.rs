// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar curve primitives
//!
//! Boundary curves are lines and circular arcs lying in a horizontal plane.
//! Arcs are parametrized counter-clockwise for positive sweep and clockwise
//! for negative sweep, so the parametrization origin is always the start point.

use nalgebra::{Point3, Vector3};

/// Default distance below which two points are considered coincident
pub const VERTEX_TOLERANCE: f64 = 1e-6;

/// Straight segment between two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

/// Circular arc in the horizontal plane through `center`
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub center: Point3<f64>,
    pub radius: f64,
    /// Angle of the start point, measured from +X
    pub start_angle: f64,
    /// Signed sweep in radians (positive = counter-clockwise)
    pub sweep: f64,
}

impl Arc {
    fn point_at_angle(&self, angle: f64) -> Point3<f64> {
        Point3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            self.center.z,
        )
    }
}

/// A boundary or centerline curve
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(Arc),
}

impl Curve {
    /// Create a line from two points
    pub fn line(start: Point3<f64>, end: Point3<f64>) -> Self {
        Curve::Line(Line { start, end })
    }

    /// Create an arc from its center, radius, start angle and signed sweep
    pub fn arc(center: Point3<f64>, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Curve::Arc(Arc {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    pub fn start_point(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    pub fn end_point(&self) -> Point3<f64> {
        self.point_at(1.0)
    }

    pub fn midpoint(&self) -> Point3<f64> {
        self.point_at(0.5)
    }

    /// Evaluate the curve at normalized parameter `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        match self {
            Curve::Line(line) => line.start + (line.end - line.start) * t,
            Curve::Arc(arc) => arc.point_at_angle(arc.start_angle + arc.sweep * t),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(line) => (line.end - line.start).norm(),
            Curve::Arc(arc) => arc.radius.abs() * arc.sweep.abs(),
        }
    }

    /// Unit tangent at the parametrization origin, or `None` for degenerate curves
    pub fn tangent_at_start(&self) -> Option<Vector3<f64>> {
        match self {
            Curve::Line(line) => {
                let d = line.end - line.start;
                let len = d.norm();
                if len < VERTEX_TOLERANCE {
                    return None;
                }
                Some(d / len)
            }
            Curve::Arc(arc) => {
                if arc.radius.abs() < VERTEX_TOLERANCE || arc.sweep.abs() < f64::EPSILON {
                    return None;
                }
                let (sin, cos) = arc.start_angle.sin_cos();
                Some(Vector3::new(-sin, cos, 0.0) * arc.sweep.signum())
            }
        }
    }

    /// True if both end points sit at the same elevation
    pub fn is_horizontal(&self, tolerance: f64) -> bool {
        match self {
            Curve::Line(line) => (line.end.z - line.start.z).abs() <= tolerance,
            Curve::Arc(_) => true,
        }
    }

    /// Return a copy of this curve moved by `offset`
    pub fn translated(&self, offset: &Vector3<f64>) -> Curve {
        match self {
            Curve::Line(line) => Curve::line(line.start + *offset, line.end + *offset),
            Curve::Arc(arc) => Curve::Arc(Arc {
                center: arc.center + *offset,
                ..arc.clone()
            }),
        }
    }

    /// Approximate the curve with `segments` straight pieces (lines stay one piece)
    pub fn polyline(&self, segments: usize) -> Vec<Point3<f64>> {
        match self {
            Curve::Line(line) => vec![line.start, line.end],
            Curve::Arc(_) => {
                let n = segments.max(1);
                (0..=n).map(|i| self.point_at(i as f64 / n as f64)).collect()
            }
        }
    }
}
