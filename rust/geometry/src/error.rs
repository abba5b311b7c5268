// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building loops or offsetting curves
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Boundary loop has no curves")]
    EmptyLoop,

    #[error("Segment {index} starts {gap:.6} away from the end of the previous segment")]
    Discontinuous { index: usize, gap: f64 },

    #[error("Boundary loop is not closed: gap of {gap:.6}")]
    OpenLoop { gap: f64 },

    #[error("Degenerate curve: {0}")]
    DegenerateCurve(String),

    #[error("Curve is not horizontal: {0}")]
    NonHorizontal(String),

    #[error("Invalid partition thickness: {0}")]
    InvalidThickness(f64),
}

impl From<Error> for room_envelope_core::Error {
    fn from(err: Error) -> Self {
        room_envelope_core::Error::GeometryCreationFailed(err.to_string())
    }
}
