// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Finish attribute to catalog type resolution.

use room_envelope_core::{CatalogEntry, Category, ElementKind, Error, Result, Zone, ZoneAttribute};

/// Maps a zone's finish attribute to a catalog entry by exact name.
///
/// Matching is case-sensitive with no fuzzy fallback. The same resolver
/// serves floors, ceilings and partitions with different attribute/catalog
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishTypeResolver {
    attribute: ZoneAttribute,
    category: Category,
}

impl FinishTypeResolver {
    pub fn new(attribute: ZoneAttribute, category: Category) -> Self {
        Self {
            attribute,
            category,
        }
    }

    pub fn for_kind(kind: ElementKind) -> Self {
        Self::new(kind.finish_attribute(), kind.category())
    }

    pub fn attribute(&self) -> ZoneAttribute {
        self.attribute
    }

    /// Resolve the zone's attribute value against `catalog`.
    ///
    /// Fails with `MissingAttribute` if the value is absent or empty and with
    /// `UnknownTypeName` if no entry carries exactly that name.
    pub fn resolve<'c>(&self, zone: &Zone, catalog: &'c [CatalogEntry]) -> Result<&'c CatalogEntry> {
        let name = zone.text(self.attribute)?;
        catalog
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownTypeName {
                category: self.category,
                name: name.to_string(),
            })
    }
}
