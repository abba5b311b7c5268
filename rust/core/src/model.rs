// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-document entities read by the envelope passes.
//!
//! All of these are owned by the host document. The passes read fresh copies
//! at the start of every invocation and never cache them across runs.

use std::fmt;

use crate::attribute::{AttributeBag, AttributeValue, ZoneAttribute};
use crate::error::{Error, Result};

/// Opaque identifier of an element in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host element categories the passes query or bind attributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Rooms,
    Walls,
    Floors,
    Ceilings,
    Levels,
}

impl Category {
    /// Returns the category name as shown by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rooms => "Rooms",
            Category::Walls => "Walls",
            Category::Floors => "Floors",
            Category::Ceilings => "Ceilings",
            Category::Levels => "Levels",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The element kind produced by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Floor,
    Ceiling,
    Partition,
}

impl ElementKind {
    /// The zone attribute that selects this kind's catalog type.
    pub fn finish_attribute(&self) -> ZoneAttribute {
        match self {
            ElementKind::Floor => ZoneAttribute::FloorFinish,
            ElementKind::Ceiling => ZoneAttribute::CeilingFinish,
            ElementKind::Partition => ZoneAttribute::WallFinish,
        }
    }

    /// The host category holding this kind's types.
    pub fn category(&self) -> Category {
        match self {
            ElementKind::Floor => Category::Floors,
            ElementKind::Ceiling => Category::Ceilings,
            ElementKind::Partition => Category::Walls,
        }
    }

    /// Transaction label used when committing one zone's elements.
    pub fn transaction_label(&self) -> &'static str {
        match self {
            ElementKind::Floor => "Create Floor",
            ElementKind::Ceiling => "Create Ceiling",
            ElementKind::Partition => "Create Walls",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Floor => f.write_str("floor"),
            ElementKind::Ceiling => f.write_str("ceiling"),
            ElementKind::Partition => f.write_str("partition"),
        }
    }
}

/// A named elevation datum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceLevel {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

impl ReferenceLevel {
    pub fn new(id: ElementId, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
        }
    }
}

/// A named element type available for instantiation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub id: ElementId,
    pub category: Category,
    /// Exact display name, matched case-sensitively.
    pub name: String,
    /// Total thickness; only partition types carry one.
    pub thickness: Option<f64>,
}

impl CatalogEntry {
    pub fn new(id: ElementId, category: Category, name: impl Into<String>) -> Self {
        Self {
            id,
            category,
            name: name.into(),
            thickness: None,
        }
    }

    /// Creates a partition type with the given thickness.
    pub fn partition(id: ElementId, name: impl Into<String>, thickness: f64) -> Self {
        Self {
            id,
            category: Category::Walls,
            name: name.into(),
            thickness: Some(thickness),
        }
    }
}

/// A bounded spatial region (room) in the host document.
///
/// A zone always has a reference level. Its finish attributes are optional.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub id: ElementId,
    pub name: String,
    pub number: String,
    pub level_id: ElementId,
    pub attributes: AttributeBag,
}

impl Zone {
    pub fn new(id: ElementId, level_id: ElementId) -> Self {
        Self {
            id,
            name: String::new(),
            number: String::new(),
            level_id,
            attributes: AttributeBag::default(),
        }
    }

    /// Builder-style name and number assignment.
    pub fn named(mut self, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.name = name.into();
        self.number = number.into();
        self
    }

    /// Builder-style attribute assignment.
    pub fn with(mut self, attribute: ZoneAttribute, value: AttributeValue) -> Self {
        self.attributes.set(attribute.name(), value);
        self
    }

    /// Reads a required, non-empty text attribute.
    pub fn text(&self, attribute: ZoneAttribute) -> Result<&str> {
        self.text_opt(attribute)?
            .ok_or_else(|| Error::MissingAttribute {
                attribute: attribute.name().to_string(),
            })
    }

    /// Reads an optional text attribute. Empty text counts as absent.
    pub fn text_opt(&self, attribute: ZoneAttribute) -> Result<Option<&str>> {
        match self.attributes.get(attribute.name()) {
            None => Ok(None),
            Some(value) => value
                .as_text()
                .map(|s| if s.trim().is_empty() { None } else { Some(s) })
                .ok_or_else(|| attribute.mismatch(value)),
        }
    }

    /// Reads an optional yes/no attribute.
    pub fn flag_opt(&self, attribute: ZoneAttribute) -> Result<Option<bool>> {
        match self.attributes.get(attribute.name()) {
            None => Ok(None),
            Some(value) => value
                .as_flag()
                .map(Some)
                .ok_or_else(|| attribute.mismatch(value)),
        }
    }

    /// Reads a required yes/no attribute.
    pub fn flag(&self, attribute: ZoneAttribute) -> Result<bool> {
        self.flag_opt(attribute)?.ok_or_else(|| Error::MissingAttribute {
            attribute: attribute.name().to_string(),
        })
    }

    /// Reads an optional numeric attribute.
    pub fn number_opt(&self, attribute: ZoneAttribute) -> Result<Option<f64>> {
        match self.attributes.get(attribute.name()) {
            None => Ok(None),
            Some(value) => value
                .as_number()
                .map(Some)
                .ok_or_else(|| attribute.mismatch(value)),
        }
    }

    /// Reads a required numeric attribute.
    pub fn number(&self, attribute: ZoneAttribute) -> Result<f64> {
        self.number_opt(attribute)?
            .ok_or_else(|| Error::MissingAttribute {
                attribute: attribute.name().to_string(),
            })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number.is_empty() && self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} {} ({})", self.number, self.name, self.id)
        }
    }
}
