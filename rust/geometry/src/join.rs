// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proximity tests used to decide which partitions to join at corners.

use nalgebra::{Point2, Point3};

use crate::curve::Curve;

/// Arc subdivision used for intersection tests
const ARC_JOIN_SEGMENTS: usize = 16;

/// True if two curves cross in plan, share an end point, or have coincident midpoints
pub fn curves_touch(a: &Curve, b: &Curve, tolerance: f64) -> bool {
    let ends_a = [a.start_point(), a.end_point()];
    let ends_b = [b.start_point(), b.end_point()];
    for pa in ends_a {
        for pb in ends_b {
            if (pa - pb).norm() < tolerance {
                return true;
            }
        }
    }

    if (a.midpoint() - b.midpoint()).norm() < tolerance {
        return true;
    }

    polylines_cross(
        &a.polyline(ARC_JOIN_SEGMENTS),
        &b.polyline(ARC_JOIN_SEGMENTS),
    )
}

/// Index pairs `(i, j)` with `i < j` of curves that touch
pub fn touching_pairs(curves: &[Curve], tolerance: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..curves.len() {
        for j in (i + 1)..curves.len() {
            if curves_touch(&curves[i], &curves[j], tolerance) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn polylines_cross(a: &[Point3<f64>], b: &[Point3<f64>]) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2)
            .any(|sb| segments_cross(plan(&sa[0]), plan(&sa[1]), plan(&sb[0]), plan(&sb[1])))
    })
}

fn plan(p: &Point3<f64>) -> Point2<f64> {
    Point2::new(p.x, p.y)
}

fn orient(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing of two plan segments (collinear overlaps are not crossings)
fn segments_cross(p1: Point2<f64>, p2: Point2<f64>, q1: Point2<f64>, q2: Point2<f64>) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
