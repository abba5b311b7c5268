// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read accessors for zones, element types and levels.

use room_envelope_core::{CatalogEntry, Category, ElementKind, ReferenceLevel, Result, Zone};

use crate::host::HostDocument;

/// Stateless view over the document's catalogs.
///
/// Every call goes back to the host; nothing is cached because the document
/// may change between passes.
pub struct CatalogCollector<'a, D: HostDocument + ?Sized> {
    doc: &'a D,
}

impl<'a, D: HostDocument + ?Sized> CatalogCollector<'a, D> {
    pub fn new(doc: &'a D) -> Self {
        Self { doc }
    }

    pub fn zones(&self) -> Result<Vec<Zone>> {
        self.doc.query_zones()
    }

    /// Element types of a category.
    pub fn types(&self, category: Category) -> Result<Vec<CatalogEntry>> {
        self.doc.query_catalog(category, true)
    }

    /// Placed instances of a category.
    pub fn instances(&self, category: Category) -> Result<Vec<CatalogEntry>> {
        self.doc.query_catalog(category, false)
    }

    pub fn partition_types(&self) -> Result<Vec<CatalogEntry>> {
        self.types(Category::Walls)
    }

    pub fn floor_types(&self) -> Result<Vec<CatalogEntry>> {
        self.types(Category::Floors)
    }

    pub fn ceiling_types(&self) -> Result<Vec<CatalogEntry>> {
        self.types(Category::Ceilings)
    }

    /// The types a pass of `kind` picks its finishes from.
    pub fn finish_types(&self, kind: ElementKind) -> Result<Vec<CatalogEntry>> {
        self.types(kind.category())
    }

    pub fn levels(&self) -> Result<Vec<ReferenceLevel>> {
        self.doc.query_levels()
    }
}
