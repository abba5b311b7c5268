// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator contracts for the host CAD document.
//!
//! Every pass receives the document explicitly; nothing in this crate keeps a
//! global handle. Reads may happen at any time, mutations only between
//! `begin_transaction` and `commit`/`rollback` (see [`crate::Transaction`]).

use room_envelope_core::{
    AttributeDefinition, AttributeValue, Binding, CatalogEntry, Category, ElementId,
    ReferenceLevel, Result, Zone,
};
use room_envelope_geometry::{BoundaryLoop, BoundarySegment, Curve};

/// Everything the host needs to place one perimeter partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionPlacement {
    pub zone: ElementId,
    /// Offset centerline the partition is drawn along
    pub centerline: Curve,
    pub type_id: ElementId,
    /// Base level (the zone's level)
    pub level: ElementId,
    /// Unconnected height above the base level
    pub height: f64,
    pub base_offset: f64,
    pub flip: bool,
    pub structural: bool,
}

/// The host document as seen by the envelope passes.
pub trait HostDocument {
    /// All placed zones, in host order.
    fn query_zones(&self) -> Result<Vec<Zone>>;

    /// Boundary rings of a zone, each an ordered list of segments.
    fn query_boundary(&self, zone: &Zone) -> Result<Vec<Vec<BoundarySegment>>>;

    /// Element types (`want_types`) or instances of a category.
    fn query_catalog(&self, category: Category, want_types: bool) -> Result<Vec<CatalogEntry>>;

    fn query_levels(&self) -> Result<Vec<ReferenceLevel>>;

    fn begin_transaction(&mut self, label: &str) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;

    fn create_floor(
        &mut self,
        boundary: &[BoundaryLoop],
        floor_type: &CatalogEntry,
        level: ElementId,
    ) -> Result<ElementId>;

    fn create_ceiling(
        &mut self,
        boundary: &[BoundaryLoop],
        ceiling_type: &CatalogEntry,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId>;

    fn create_partition(&mut self, placement: &PartitionPlacement) -> Result<ElementId>;

    /// Join the geometry of two partitions.
    fn join_partitions(&mut self, a: ElementId, b: ElementId) -> Result<()>;

    /// Write one attribute value on a zone.
    fn set_attribute(&mut self, zone: ElementId, name: &str, value: AttributeValue) -> Result<()>;

    /// Open the shared definition store, or `None` if none is configured.
    fn definition_store(&mut self) -> Option<&mut dyn DefinitionStore>;

    /// Unbind a definition from the document. Returns false if it was not bound.
    fn remove_binding(&mut self, definition: &str) -> Result<bool>;

    /// Bind a definition to categories under an attribute group.
    fn insert_binding(&mut self, binding: Binding) -> Result<()>;
}

/// Shared store holding attribute definitions in named groups.
///
/// The store lives outside the document and is not transactional.
pub trait DefinitionStore {
    /// Create the group if it does not exist yet.
    fn ensure_group(&mut self, group: &str) -> Result<()>;

    fn find_definition(&self, group: &str, name: &str) -> Option<AttributeDefinition>;

    fn create_definition(
        &mut self,
        group: &str,
        definition: AttributeDefinition,
    ) -> Result<AttributeDefinition>;

    fn remove_definition(&mut self, group: &str, name: &str) -> Result<()>;
}
