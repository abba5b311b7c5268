// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error taxonomy shared by every envelope pass.
//!
//! Pass-level conditions (`NoZonesFound`, `SchemaStoreUnavailable`) abort a
//! whole pass. Everything else is scoped to one zone or one attribute
//! definition and ends up in the pass report instead of being propagated.

use crate::attribute::AttributeKind;
use crate::model::Category;

/// Result type alias for envelope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving room envelopes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// The document contains no zones at all.
    #[error("no rooms found in the document")]
    NoZonesFound,

    /// A zone attribute is absent or holds an empty value.
    #[error("attribute '{attribute}' is missing or empty")]
    MissingAttribute { attribute: String },

    /// A zone attribute holds a value of the wrong kind.
    #[error("attribute '{attribute}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        attribute: String,
        expected: AttributeKind,
        found: AttributeKind,
    },

    /// A finish attribute names a type the catalog does not contain.
    #[error("no {category} type named '{name}'")]
    UnknownTypeName { category: Category, name: String },

    /// A referenced catalog element (partition type, level) could not be found.
    #[error("{category} entry not found: {name}")]
    CatalogEntryNotFound { category: Category, name: String },

    /// The shared definition store could not be opened.
    #[error(
        "the shared parameter store is unavailable; assign a shared parameter file before upgrading the schema"
    )]
    SchemaStoreUnavailable,

    /// An existing definition could not be unbound from the document.
    #[error("could not remove the existing binding of '{definition}'")]
    BindingRemovalFailed { definition: String },

    /// The host rejected the synthesized geometry, or the geometry was degenerate.
    #[error("geometry creation failed: {0}")]
    GeometryCreationFailed(String),

    /// The zone has no boundary segments (unplaced or unenclosed room).
    #[error("zone has no boundary segments")]
    EmptyBoundary,

    /// The zone carries the exclusion flag and is handled manually.
    #[error("zone is flagged '{attribute}' and excluded from generation")]
    Excluded { attribute: String },

    /// Any other failure reported by the host document.
    #[error("host document error: {0}")]
    Host(String),
}

impl Error {
    /// Returns true if this error should skip a zone rather than fail it.
    ///
    /// Skips are resolution problems (bad or missing input on the zone);
    /// failures are problems creating geometry once inputs were resolved.
    pub fn is_zone_skip(&self) -> bool {
        matches!(
            self,
            Error::MissingAttribute { .. }
                | Error::TypeMismatch { .. }
                | Error::UnknownTypeName { .. }
                | Error::CatalogEntryNotFound { .. }
                | Error::EmptyBoundary
                | Error::Excluded { .. }
        )
    }

    /// Returns true if this error terminates a whole pass.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Error::NoZonesFound | Error::SchemaStoreUnavailable)
    }

    /// Shorthand for a level lookup failure.
    pub fn level_not_found(level: impl std::fmt::Display) -> Self {
        Error::CatalogEntryNotFound {
            category: Category::Levels,
            name: level.to_string(),
        }
    }
}
