// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute definition schema
//!
//! Definitions live in a shared store grouped by name. A definition becomes
//! visible on elements once it is bound to one or more categories in the
//! document.

use crate::attribute::{AttributeKind, ZoneAttribute};
use crate::model::Category;

/// The property group a bound attribute is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeGroup {
    IdentityData,
    Constraints,
    Dimensions,
    Other,
}

/// A named, typed definition in the shared store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDefinition {
    pub name: String,
    pub kind: AttributeKind,
    pub visible: bool,
}

/// A definition bound to categories in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding {
    pub definition: AttributeDefinition,
    pub categories: Vec<Category>,
    pub group: AttributeGroup,
}

/// Everything needed to upsert one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionRequest {
    /// Definition group in the shared store.
    pub group_name: String,
    pub category: Category,
    pub name: String,
    pub kind: AttributeKind,
    pub attribute_group: AttributeGroup,
    pub visible: bool,
}

impl DefinitionRequest {
    /// A room attribute request in the given definition group, listed under identity data.
    pub fn room(group_name: impl Into<String>, attribute: ZoneAttribute, visible: bool) -> Self {
        Self {
            group_name: group_name.into(),
            category: Category::Rooms,
            name: attribute.name().to_string(),
            kind: attribute.kind(),
            attribute_group: AttributeGroup::IdentityData,
            visible,
        }
    }

    /// The definition this request produces.
    pub fn definition(&self) -> AttributeDefinition {
        AttributeDefinition {
            name: self.name.clone(),
            kind: self.kind,
            visible: self.visible,
        }
    }
}
