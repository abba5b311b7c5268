// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter partitions offset outward from a zone boundary.

use room_envelope_core::{CatalogEntry, Category, ElementId, ElementKind, Error, Result, Zone};
use room_envelope_geometry::{offset_loops, touching_pairs, BoundaryLoop, Curve, VERTEX_TOLERANCE};

use crate::host::{HostDocument, PartitionPlacement};
use crate::transaction::Transaction;

/// Default distance under which two centerlines count as touching.
pub const DEFAULT_JOIN_TOLERANCE: f64 = 0.01;

/// Places one partition per boundary curve, shifted outward by half the
/// partition thickness so the inner face sits on the zone boundary.
#[derive(Debug, Clone)]
pub struct OffsetWallSynthesizer {
    join_adjacent: bool,
    join_tolerance: f64,
}

impl Default for OffsetWallSynthesizer {
    fn default() -> Self {
        Self::new(false, DEFAULT_JOIN_TOLERANCE)
    }
}

impl OffsetWallSynthesizer {
    pub fn new(join_adjacent: bool, join_tolerance: f64) -> Self {
        Self {
            join_adjacent,
            join_tolerance,
        }
    }

    /// Build placements for every curve of every loop.
    ///
    /// Nothing is created here. Any degenerate curve fails the whole plan.
    pub fn plan(
        &self,
        loops: &[BoundaryLoop],
        partition_type: &CatalogEntry,
        height: f64,
        zone: &Zone,
    ) -> Result<Vec<PartitionPlacement>> {
        let thickness = partition_type.thickness.ok_or_else(|| Error::CatalogEntryNotFound {
            category: Category::Walls,
            name: format!("{} (no thickness)", partition_type.name),
        })?;
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::GeometryCreationFailed(format!(
                "partition height must be positive, got {height}"
            )));
        }

        let offsets = offset_loops(loops, thickness)?;
        Ok(offsets
            .into_iter()
            .map(|oc| PartitionPlacement {
                zone: zone.id,
                centerline: oc.centerline,
                type_id: partition_type.id,
                level: zone.level_id,
                height,
                base_offset: 0.0,
                flip: false,
                structural: false,
            })
            .collect())
    }

    /// Create the zone's partitions in one transaction.
    ///
    /// Either every partition is created (and joined, when enabled) and the
    /// transaction commits, or nothing from this zone remains.
    pub fn synthesize<D: HostDocument + ?Sized>(
        &self,
        doc: &mut D,
        loops: &[BoundaryLoop],
        partition_type: &CatalogEntry,
        height: f64,
        zone: &Zone,
    ) -> Result<Vec<ElementId>> {
        let placements = self.plan(loops, partition_type, height, zone)?;

        let mut tx = Transaction::start(doc, ElementKind::Partition.transaction_label())?;
        let mut created = Vec::with_capacity(placements.len());
        for placement in &placements {
            created.push(tx.create_partition(placement)?);
        }

        if self.join_adjacent {
            let centerlines: Vec<Curve> = placements.iter().map(|p| p.centerline.clone()).collect();
            let tolerance = self.join_tolerance.max(VERTEX_TOLERANCE);
            for (i, j) in touching_pairs(&centerlines, tolerance) {
                tx.join_partitions(created[i], created[j])?;
            }
        }

        tx.commit()?;
        tracing::debug!(zone = %zone.id, count = created.len(), "partitions created");
        Ok(created)
    }
}
