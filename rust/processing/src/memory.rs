// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document.
//!
//! Implements [`HostDocument`] and [`DefinitionStore`] over plain collections
//! so the passes can run without a CAD host. Transactions snapshot the
//! mutable document state on `begin_transaction` and restore it on rollback.
//! Created geometry is validated the way a host would reject it: open or
//! degenerate loops, zero-length centerlines and non-positive heights fail.

use rustc_hash::FxHashMap;

use room_envelope_core::{
    AttributeDefinition, AttributeValue, Binding, CatalogEntry, Category, ElementId, ElementKind,
    Error, ReferenceLevel, Result, Zone, ZoneAttribute,
};
use room_envelope_geometry::{BoundaryLoop, BoundarySegment, Curve, VERTEX_TOLERANCE};

use crate::host::{DefinitionStore, HostDocument, PartitionPlacement};

/// Geometry of an element created through the document.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementGeometry {
    Slab {
        loops: Vec<BoundaryLoop>,
        height_offset: f64,
    },
    Partition {
        centerline: Curve,
        height: f64,
    },
}

/// An element created by one of the passes.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub type_id: ElementId,
    pub level: ElementId,
    pub geometry: ElementGeometry,
}

/// One finished transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub label: String,
    pub committed: bool,
}

#[derive(Debug, Clone, Default)]
struct DocumentState {
    zones: Vec<Zone>,
    elements: Vec<SynthesizedElement>,
    joins: Vec<(ElementId, ElementId)>,
    bindings: Vec<Binding>,
}

/// Definition groups of a shared parameter store.
#[derive(Debug, Clone, Default)]
pub struct SharedDefinitionStore {
    groups: FxHashMap<String, Vec<AttributeDefinition>>,
}

impl SharedDefinitionStore {
    /// Definitions in a group, in creation order.
    pub fn definitions(&self, group: &str) -> &[AttributeDefinition] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    fn group_mut(&mut self, group: &str) -> Result<&mut Vec<AttributeDefinition>> {
        self.groups
            .get_mut(group)
            .ok_or_else(|| Error::Host(format!("definition group '{group}' does not exist")))
    }
}

impl DefinitionStore for SharedDefinitionStore {
    fn ensure_group(&mut self, group: &str) -> Result<()> {
        self.groups.entry(group.to_string()).or_default();
        Ok(())
    }

    fn find_definition(&self, group: &str, name: &str) -> Option<AttributeDefinition> {
        self.definitions(group).iter().find(|d| d.name == name).cloned()
    }

    fn create_definition(
        &mut self,
        group: &str,
        definition: AttributeDefinition,
    ) -> Result<AttributeDefinition> {
        let definitions = self.group_mut(group)?;
        if definitions.iter().any(|d| d.name == definition.name) {
            return Err(Error::Host(format!(
                "definition '{}' already exists in group '{group}'",
                definition.name
            )));
        }
        definitions.push(definition.clone());
        Ok(definition)
    }

    fn remove_definition(&mut self, group: &str, name: &str) -> Result<()> {
        let definitions = self.group_mut(group)?;
        let before = definitions.len();
        definitions.retain(|d| d.name != name);
        if definitions.len() == before {
            return Err(Error::Host(format!("definition '{name}' not found in '{group}'")));
        }
        Ok(())
    }
}

/// A host document held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    state: DocumentState,
    open: Option<(String, DocumentState)>,
    boundaries: FxHashMap<ElementId, Vec<Vec<BoundarySegment>>>,
    catalog: Vec<CatalogEntry>,
    levels: Vec<ReferenceLevel>,
    store: Option<SharedDefinitionStore>,
    journal: Vec<TransactionRecord>,
    next_id: u64,
    creation_budget: Option<usize>,
    rejected_bindings: usize,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocument {
    /// An empty document with an empty shared definition store.
    pub fn new() -> Self {
        Self {
            state: DocumentState::default(),
            open: None,
            boundaries: FxHashMap::default(),
            catalog: Vec::new(),
            levels: Vec::new(),
            store: Some(SharedDefinitionStore::default()),
            journal: Vec::new(),
            next_id: 1,
            creation_budget: None,
            rejected_bindings: 0,
        }
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_level(&mut self, name: &str, elevation: f64) -> ElementId {
        let id = self.allocate_id();
        self.levels.push(ReferenceLevel::new(id, name, elevation));
        id
    }

    /// Add a floor or ceiling type (or any type without thickness).
    pub fn add_type(&mut self, category: Category, name: &str) -> ElementId {
        let id = self.allocate_id();
        self.catalog.push(CatalogEntry::new(id, category, name));
        id
    }

    pub fn add_partition_type(&mut self, name: &str, thickness: f64) -> ElementId {
        let id = self.allocate_id();
        self.catalog.push(CatalogEntry::partition(id, name, thickness));
        id
    }

    /// Add a zone on `level` bounded by `rings`.
    pub fn add_zone(&mut self, level: ElementId, rings: Vec<Vec<BoundarySegment>>) -> ElementId {
        let id = self.allocate_id();
        self.state.zones.push(Zone::new(id, level));
        self.boundaries.insert(id, rings);
        id
    }

    pub fn zone_mut(&mut self, id: ElementId) -> Option<&mut Zone> {
        self.state.zones.iter_mut().find(|z| z.id == id)
    }

    /// Seed a zone attribute outside of any transaction.
    pub fn seed_attribute(&mut self, zone: ElementId, attribute: ZoneAttribute, value: AttributeValue) {
        if let Some(z) = self.zone_mut(zone) {
            z.attributes.set(attribute.name(), value);
        }
    }

    /// Remove the shared definition store, as if no file were configured.
    pub fn detach_definition_store(&mut self) {
        self.store = None;
    }

    pub fn shared_store(&self) -> Option<&SharedDefinitionStore> {
        self.store.as_ref()
    }

    /// Let `count` more elements be created, then reject every further creation.
    pub fn reject_creations_after(&mut self, count: usize) {
        self.creation_budget = Some(count);
    }

    /// Reject the next `count` binding insertions.
    pub fn reject_next_bindings(&mut self, count: usize) {
        self.rejected_bindings = count;
    }

    pub fn elements(&self) -> &[SynthesizedElement] {
        &self.state.elements
    }

    pub fn elements_of(&self, kind: ElementKind) -> Vec<&SynthesizedElement> {
        self.state.elements.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn joins(&self) -> &[(ElementId, ElementId)] {
        &self.state.joins
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.state.bindings
    }

    pub fn journal(&self) -> &[TransactionRecord] {
        &self.journal
    }

    pub fn in_transaction(&self) -> bool {
        self.open.is_some()
    }

    fn require_transaction(&self, action: &str) -> Result<()> {
        if self.open.is_none() {
            return Err(Error::Host(format!("{action} requires an open transaction")));
        }
        Ok(())
    }

    fn require_type(&self, entry: &CatalogEntry, category: Category) -> Result<()> {
        let known = self
            .catalog
            .iter()
            .any(|t| t.id == entry.id && t.category == category);
        if !known {
            return Err(Error::Host(format!(
                "{} is not a {category} type in this document",
                entry.id
            )));
        }
        Ok(())
    }

    fn require_level(&self, level: ElementId) -> Result<()> {
        if !self.levels.iter().any(|l| l.id == level) {
            return Err(Error::level_not_found(level));
        }
        Ok(())
    }

    fn spend_creation(&mut self) -> Result<()> {
        match self.creation_budget.as_mut() {
            Some(0) => Err(Error::GeometryCreationFailed(
                "host rejected the element".to_string(),
            )),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn validate_slab(boundary: &[BoundaryLoop]) -> Result<()> {
        if boundary.is_empty() {
            return Err(Error::GeometryCreationFailed("empty boundary".to_string()));
        }
        for lp in boundary {
            if !lp.is_closed(VERTEX_TOLERANCE) {
                return Err(Error::GeometryCreationFailed(format!(
                    "boundary loop is open by {:.6}",
                    lp.closure_gap()
                )));
            }
            if lp.signed_area().abs() < VERTEX_TOLERANCE {
                return Err(Error::GeometryCreationFailed(
                    "boundary loop encloses no area".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn push_element(
        &mut self,
        kind: ElementKind,
        type_id: ElementId,
        level: ElementId,
        geometry: ElementGeometry,
    ) -> ElementId {
        let id = self.allocate_id();
        self.state.elements.push(SynthesizedElement {
            id,
            kind,
            type_id,
            level,
            geometry,
        });
        id
    }

    fn finish_transaction(&mut self, committed: bool) -> Result<()> {
        let (label, snapshot) = self
            .open
            .take()
            .ok_or_else(|| Error::Host("no transaction is open".to_string()))?;
        if !committed {
            self.state = snapshot;
        }
        self.journal.push(TransactionRecord { label, committed });
        Ok(())
    }
}

impl HostDocument for InMemoryDocument {
    fn query_zones(&self) -> Result<Vec<Zone>> {
        Ok(self.state.zones.clone())
    }

    fn query_boundary(&self, zone: &Zone) -> Result<Vec<Vec<BoundarySegment>>> {
        Ok(self.boundaries.get(&zone.id).cloned().unwrap_or_default())
    }

    fn query_catalog(&self, category: Category, want_types: bool) -> Result<Vec<CatalogEntry>> {
        if want_types {
            return Ok(self
                .catalog
                .iter()
                .filter(|t| t.category == category)
                .cloned()
                .collect());
        }

        if category == Category::Rooms {
            return Ok(self
                .state
                .zones
                .iter()
                .map(|z| CatalogEntry::new(z.id, Category::Rooms, z.name.clone()))
                .collect());
        }

        Ok(self
            .state
            .elements
            .iter()
            .filter(|e| e.kind.category() == category)
            .map(|e| {
                let name = self
                    .catalog
                    .iter()
                    .find(|t| t.id == e.type_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                CatalogEntry::new(e.id, category, name)
            })
            .collect())
    }

    fn query_levels(&self) -> Result<Vec<ReferenceLevel>> {
        Ok(self.levels.clone())
    }

    fn begin_transaction(&mut self, label: &str) -> Result<()> {
        if let Some((open, _)) = &self.open {
            return Err(Error::Host(format!(
                "cannot start '{label}' while '{open}' is open"
            )));
        }
        self.open = Some((label.to_string(), self.state.clone()));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.finish_transaction(true)
    }

    fn rollback(&mut self) -> Result<()> {
        self.finish_transaction(false)
    }

    fn create_floor(
        &mut self,
        boundary: &[BoundaryLoop],
        floor_type: &CatalogEntry,
        level: ElementId,
    ) -> Result<ElementId> {
        self.require_transaction("creating a floor")?;
        self.require_type(floor_type, Category::Floors)?;
        self.require_level(level)?;
        Self::validate_slab(boundary)?;
        self.spend_creation()?;
        Ok(self.push_element(
            ElementKind::Floor,
            floor_type.id,
            level,
            ElementGeometry::Slab {
                loops: boundary.to_vec(),
                height_offset: 0.0,
            },
        ))
    }

    fn create_ceiling(
        &mut self,
        boundary: &[BoundaryLoop],
        ceiling_type: &CatalogEntry,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId> {
        self.require_transaction("creating a ceiling")?;
        self.require_type(ceiling_type, Category::Ceilings)?;
        self.require_level(level)?;
        Self::validate_slab(boundary)?;
        if !height_offset.is_finite() {
            return Err(Error::GeometryCreationFailed(format!(
                "invalid ceiling offset {height_offset}"
            )));
        }
        self.spend_creation()?;
        Ok(self.push_element(
            ElementKind::Ceiling,
            ceiling_type.id,
            level,
            ElementGeometry::Slab {
                loops: boundary.to_vec(),
                height_offset,
            },
        ))
    }

    fn create_partition(&mut self, placement: &PartitionPlacement) -> Result<ElementId> {
        self.require_transaction("creating a partition")?;
        if !self
            .catalog
            .iter()
            .any(|t| t.id == placement.type_id && t.category == Category::Walls)
        {
            return Err(Error::Host(format!(
                "{} is not a Walls type in this document",
                placement.type_id
            )));
        }
        self.require_level(placement.level)?;
        if placement.centerline.length() < VERTEX_TOLERANCE {
            return Err(Error::GeometryCreationFailed(
                "partition centerline has zero length".to_string(),
            ));
        }
        if !placement.height.is_finite() || placement.height <= 0.0 {
            return Err(Error::GeometryCreationFailed(format!(
                "partition height must be positive, got {}",
                placement.height
            )));
        }
        self.spend_creation()?;
        Ok(self.push_element(
            ElementKind::Partition,
            placement.type_id,
            placement.level,
            ElementGeometry::Partition {
                centerline: placement.centerline.clone(),
                height: placement.height,
            },
        ))
    }

    fn join_partitions(&mut self, a: ElementId, b: ElementId) -> Result<()> {
        self.require_transaction("joining partitions")?;
        for id in [a, b] {
            let is_partition = self
                .state
                .elements
                .iter()
                .any(|e| e.id == id && e.kind == ElementKind::Partition);
            if !is_partition {
                return Err(Error::Host(format!("{id} is not a partition")));
            }
        }
        self.state.joins.push((a, b));
        Ok(())
    }

    fn set_attribute(&mut self, zone: ElementId, name: &str, value: AttributeValue) -> Result<()> {
        self.require_transaction("setting an attribute")?;
        let z = self
            .zone_mut(zone)
            .ok_or_else(|| Error::Host(format!("zone {zone} does not exist")))?;
        z.attributes.set(name, value);
        Ok(())
    }

    fn definition_store(&mut self) -> Option<&mut dyn DefinitionStore> {
        self.store.as_mut().map(|s| s as &mut dyn DefinitionStore)
    }

    fn remove_binding(&mut self, definition: &str) -> Result<bool> {
        self.require_transaction("removing a binding")?;
        let before = self.state.bindings.len();
        self.state
            .bindings
            .retain(|b| b.definition.name != definition);
        Ok(self.state.bindings.len() < before)
    }

    fn insert_binding(&mut self, binding: Binding) -> Result<()> {
        self.require_transaction("inserting a binding")?;
        if self.rejected_bindings > 0 {
            self.rejected_bindings -= 1;
            return Err(Error::Host(format!(
                "host rejected the binding of '{}'",
                binding.definition.name
            )));
        }
        if self
            .state
            .bindings
            .iter()
            .any(|b| b.definition.name == binding.definition.name)
        {
            return Err(Error::Host(format!(
                "'{}' is already bound",
                binding.definition.name
            )));
        }
        self.state.bindings.push(binding);
        Ok(())
    }
}
