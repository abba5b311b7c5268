// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-Envelope Geometry
//!
//! Planar curves, zone boundary loops and partition offset centerlines,
//! built on nalgebra.

pub mod boundary;
pub mod curve;
pub mod error;
pub mod join;
pub mod offset;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use boundary::{extract_loops, BoundaryLoop, BoundarySegment};
pub use curve::{Arc, Curve, Line, VERTEX_TOLERANCE};
pub use error::{Error, Result};
pub use join::{curves_touch, touching_pairs};
pub use offset::{offset_curve, offset_loops, outward_normal, OffsetCurve};
