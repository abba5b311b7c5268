// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone boundary extraction against the host.

use room_envelope_core::{Result, Zone};
use room_envelope_geometry::{extract_loops, BoundaryLoop};

use crate::host::HostDocument;

/// Query a zone's boundary rings and turn each into a closed loop.
///
/// An empty result means the zone has no boundary segments; it is not an
/// error here. Discontinuous or open rings fail with `GeometryCreationFailed`.
pub fn extract_zone_loops<D: HostDocument + ?Sized>(
    doc: &D,
    zone: &Zone,
    tolerance: f64,
) -> Result<Vec<BoundaryLoop>> {
    let rings = doc.query_boundary(zone)?;
    Ok(extract_loops(&rings, tolerance)?)
}
