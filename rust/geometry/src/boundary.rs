// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone boundary loops
//!
//! The host describes a zone's footprint as rings of boundary segments: the
//! outer ring first, islands after it. Each ring becomes one [`BoundaryLoop`]
//! by concatenating segment curves in the order the host supplied them.
//! Ordering and winding are never changed here because the offset direction
//! of partitions is derived from them.

use nalgebra::Point3;
use room_envelope_core::ElementId;

use crate::curve::Curve;
use crate::error::{Error, Result};

/// Arc subdivision used for area estimates
const ARC_AREA_SEGMENTS: usize = 32;

/// One piece of a zone boundary as reported by the host
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySegment {
    pub curve: Curve,
    /// Element that bounds the zone along this segment, if any
    pub element_id: Option<ElementId>,
}

impl BoundarySegment {
    pub fn new(curve: Curve) -> Self {
        Self {
            curve,
            element_id: None,
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

/// Closed, ordered ring of curves
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoop {
    curves: Vec<Curve>,
}

impl BoundaryLoop {
    /// Build a loop by appending segment curves in order.
    ///
    /// Each curve must start where the previous one ends, and the last curve
    /// must end where the first one starts, both within `tolerance`.
    pub fn from_segments(segments: &[BoundarySegment], tolerance: f64) -> Result<Self> {
        Self::from_curves(segments.iter().map(|s| s.curve.clone()).collect(), tolerance)
    }

    /// Build a loop from curves, validating continuity and closure
    pub fn from_curves(curves: Vec<Curve>, tolerance: f64) -> Result<Self> {
        if curves.is_empty() {
            return Err(Error::EmptyLoop);
        }

        for i in 1..curves.len() {
            let gap = (curves[i].start_point() - curves[i - 1].end_point()).norm();
            if gap > tolerance {
                return Err(Error::Discontinuous { index: i, gap });
            }
        }

        let lp = Self { curves };
        let gap = lp.closure_gap();
        if gap > tolerance {
            return Err(Error::OpenLoop { gap });
        }
        Ok(lp)
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Distance between the last end point and the first start point
    pub fn closure_gap(&self) -> f64 {
        match (self.curves.first(), self.curves.last()) {
            (Some(first), Some(last)) => (first.start_point() - last.end_point()).norm(),
            _ => 0.0,
        }
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.closure_gap() <= tolerance
    }

    /// Signed plan area (shoelace formula); positive for counter-clockwise loops
    pub fn signed_area(&self) -> f64 {
        let points = self.plan_points();
        let n = points.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += points[i].x * points[j].y;
            area -= points[j].x * points[i].y;
        }
        area / 2.0
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Start points of every curve plus interior arc samples, in loop order
    fn plan_points(&self) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for curve in &self.curves {
            let mut poly = curve.polyline(ARC_AREA_SEGMENTS);
            poly.pop();
            points.extend(poly);
        }
        points
    }
}

impl<'a> IntoIterator for &'a BoundaryLoop {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

/// Convert host boundary rings into loops, one per non-empty ring.
///
/// Rings without segments carry no geometry and are dropped wherever they
/// appear, so the output can be shorter than `rings`. Returns an empty list
/// when the zone has no boundary segments at all.
pub fn extract_loops(rings: &[Vec<BoundarySegment>], tolerance: f64) -> Result<Vec<BoundaryLoop>> {
    rings
        .iter()
        .filter(|ring| !ring.is_empty())
        .map(|ring| BoundaryLoop::from_segments(ring, tolerance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::VERTEX_TOLERANCE;
    use approx::assert_relative_eq;

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<BoundarySegment> {
        let p = |x, y| Point3::new(x, y, 0.0);
        vec![
            BoundarySegment::new(Curve::line(p(x0, y0), p(x1, y0))),
            BoundarySegment::new(Curve::line(p(x1, y0), p(x1, y1))),
            BoundarySegment::new(Curve::line(p(x1, y1), p(x0, y1))),
            BoundarySegment::new(Curve::line(p(x0, y1), p(x0, y0))),
        ]
    }

    #[test]
    fn empty_rings_are_dropped() {
        let rings = vec![Vec::new(), rectangle(0.0, 0.0, 4.0, 3.0), Vec::new()];
        let loops = extract_loops(&rings, VERTEX_TOLERANCE).unwrap();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].is_closed(VERTEX_TOLERANCE));
    }

    #[test]
    fn one_loop_per_ring() {
        let outer = rectangle(0.0, 0.0, 10.0, 8.0);
        let mut island = rectangle(4.0, 3.0, 6.0, 5.0);
        island.reverse();
        for seg in &mut island {
            if let Curve::Line(line) = &mut seg.curve {
                std::mem::swap(&mut line.start, &mut line.end);
            }
        }

        let loops = extract_loops(&[outer, island], VERTEX_TOLERANCE).unwrap();
        assert_eq!(loops.len(), 2);
        for lp in &loops {
            assert!(lp.is_closed(VERTEX_TOLERANCE));
        }
        // Winding is preserved as supplied
        assert!(loops[0].is_counter_clockwise());
        assert!(!loops[1].is_counter_clockwise());
        assert_relative_eq!(loops[0].signed_area(), 80.0);
        assert_relative_eq!(loops[1].signed_area(), -4.0);
    }

    #[test]
    fn no_segments_yields_no_loops() {
        let loops = extract_loops(&[], VERTEX_TOLERANCE).unwrap();
        assert!(loops.is_empty());
        let loops = extract_loops(&[Vec::new()], VERTEX_TOLERANCE).unwrap();
        assert!(loops.is_empty());
    }

    #[test]
    fn discontinuous_ring_is_rejected() {
        let mut ring = rectangle(0.0, 0.0, 2.0, 2.0);
        ring.swap(1, 2);
        assert!(matches!(
            BoundaryLoop::from_segments(&ring, VERTEX_TOLERANCE),
            Err(Error::Discontinuous { index: 1, .. })
        ));
    }

    #[test]
    fn open_ring_is_rejected() {
        let mut ring = rectangle(0.0, 0.0, 2.0, 2.0);
        ring.pop();
        assert!(matches!(
            BoundaryLoop::from_segments(&ring, VERTEX_TOLERANCE),
            Err(Error::OpenLoop { .. })
        ));
    }

    #[test]
    fn arc_ring_area() {
        use std::f64::consts::PI;
        // Half disc of radius 1: diameter from (-1,0) to (1,0), arc back over the top
        let ring = vec![
            BoundarySegment::new(Curve::line(
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            )),
            BoundarySegment::new(Curve::arc(Point3::origin(), 1.0, 0.0, PI)),
        ];
        let lp = BoundaryLoop::from_segments(&ring, 1e-9).unwrap();
        assert_relative_eq!(lp.signed_area(), PI / 2.0, epsilon = 1e-2);
    }
}
