// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Offset centerlines for perimeter partitions
//!
//! A partition drawn on a zone boundary would straddle it. Each boundary curve
//! is therefore translated outward by half the partition thickness, so the
//! partition's inner face lands on the boundary.
//!
//! Precondition: every curve lies in a horizontal plane. The outward normal is
//! the start tangent rotated a quarter turn clockwise about +Z, which points
//! away from the zone for counter-clockwise outer loops and clockwise islands.

use nalgebra::Vector3;

use crate::boundary::BoundaryLoop;
use crate::curve::{Curve, VERTEX_TOLERANCE};
use crate::error::{Error, Result};

/// A boundary curve together with its translated centerline
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetCurve {
    pub source: Curve,
    pub centerline: Curve,
    /// Translation applied to `source`
    pub offset: Vector3<f64>,
}

/// Unit outward normal at the start of a horizontal curve
pub fn outward_normal(curve: &Curve) -> Result<Vector3<f64>> {
    if !curve.is_horizontal(VERTEX_TOLERANCE) {
        return Err(Error::NonHorizontal(format!(
            "{:?} -> {:?}",
            curve.start_point(),
            curve.end_point()
        )));
    }

    let tangent = curve.tangent_at_start().ok_or_else(|| {
        Error::DegenerateCurve(format!("zero-length curve at {:?}", curve.start_point()))
    })?;

    let normal = tangent.cross(&Vector3::z());
    let len = normal.norm();
    if len < VERTEX_TOLERANCE {
        return Err(Error::NonHorizontal("tangent is vertical".to_string()));
    }
    Ok(normal / len)
}

/// Translate a curve outward by `distance`
pub fn offset_curve(curve: &Curve, distance: f64) -> Result<OffsetCurve> {
    let offset = outward_normal(curve)? * distance;
    Ok(OffsetCurve {
        source: curve.clone(),
        centerline: curve.translated(&offset),
        offset,
    })
}

/// Offset every curve of every loop by half of `thickness`.
///
/// Produces one centerline per curve, in loop order. Fails on the first
/// degenerate or non-horizontal curve so callers never see a partial set.
pub fn offset_loops(loops: &[BoundaryLoop], thickness: f64) -> Result<Vec<OffsetCurve>> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(Error::InvalidThickness(thickness));
    }

    let half = thickness / 2.0;
    loops
        .iter()
        .flat_map(|lp| lp.iter())
        .map(|curve| offset_curve(curve, half))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundarySegment;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn square(size: f64) -> BoundaryLoop {
        let p = |x, y| Point3::new(x, y, 0.0);
        let segments = vec![
            BoundarySegment::new(Curve::line(p(0.0, 0.0), p(size, 0.0))),
            BoundarySegment::new(Curve::line(p(size, 0.0), p(size, size))),
            BoundarySegment::new(Curve::line(p(size, size), p(0.0, size))),
            BoundarySegment::new(Curve::line(p(0.0, size), p(0.0, 0.0))),
        ];
        BoundaryLoop::from_segments(&segments, VERTEX_TOLERANCE).unwrap()
    }

    #[test]
    fn normal_points_away_from_ccw_interior() {
        let lp = square(4.0);
        let normals: Vec<_> = lp.iter().map(|c| outward_normal(c).unwrap()).collect();
        assert_relative_eq!(normals[0], Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(normals[1], Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(normals[2], Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(normals[3], Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn offset_is_half_thickness_and_perpendicular() {
        let thickness = 0.25;
        let offsets = offset_loops(&[square(4.0)], thickness).unwrap();
        assert_eq!(offsets.len(), 4);

        for oc in &offsets {
            assert_relative_eq!(oc.offset.norm(), thickness / 2.0, epsilon = 1e-12);
            let tangent = oc.source.tangent_at_start().unwrap();
            assert_relative_eq!(oc.offset.dot(&tangent), 0.0, epsilon = 1e-12);
            assert_relative_eq!(oc.centerline.length(), oc.source.length(), epsilon = 1e-12);
        }
    }

    #[test]
    fn arc_offset_uses_start_tangent() {
        use std::f64::consts::FRAC_PI_2;
        let arc = Curve::arc(Point3::origin(), 2.0, 0.0, FRAC_PI_2);
        let oc = offset_curve(&arc, 0.1).unwrap();
        // Tangent at (2,0) is +Y, so the normal is +X
        assert_relative_eq!(oc.offset, Vector3::new(0.1, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_curve_fails() {
        let p = Point3::new(1.0, 2.0, 0.0);
        assert!(matches!(
            offset_curve(&Curve::line(p, p), 0.1),
            Err(Error::DegenerateCurve(_))
        ));
    }

    #[test]
    fn sloped_curve_fails() {
        let c = Curve::line(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 1.0));
        assert!(matches!(offset_curve(&c, 0.1), Err(Error::NonHorizontal(_))));
    }

    #[test]
    fn thickness_must_be_positive() {
        assert_eq!(
            offset_loops(&[square(1.0)], 0.0),
            Err(Error::InvalidThickness(0.0))
        );
        assert!(offset_loops(&[square(1.0)], f64::NAN).is_err());
    }
}
