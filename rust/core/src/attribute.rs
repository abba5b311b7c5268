// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed zone attributes.
//!
//! Zones carry a bag of named values. The names the passes depend on are
//! enumerated by [`ZoneAttribute`], each with the value kind it must hold, so
//! lookups fail at the boundary instead of threading untyped strings around.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::Error;

/// The storage kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    Text,
    YesNo,
    Number,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Text => f.write_str("text"),
            AttributeKind::YesNo => f.write_str("yes/no"),
            AttributeKind::Number => f.write_str("number"),
        }
    }
}

/// A value stored on a zone attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl AttributeValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttributeValue::Text(value.into())
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Text(_) => AttributeKind::Text,
            AttributeValue::Flag(_) => AttributeKind::YesNo,
            AttributeValue::Number(_) => AttributeKind::Number,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Named attribute values attached to one zone.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBag(FxHashMap<String, AttributeValue>);

impl AttributeBag {
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Attribute names the envelope passes know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneAttribute {
    FloorFinish,
    CeilingFinish,
    WallFinish,
    /// Name of the level partitions should reach, overriding the computed one.
    WallHeightLevel,
    /// Ceiling offset above the zone level.
    CeilingHeight,
    /// Exclusion flag: the zone is handled manually.
    Unique,
    Furnished,
    /// Bookkeeping flag recording that the room schema was provisioned.
    ParametersProvisioned,
}

impl ZoneAttribute {
    pub const ALL: [ZoneAttribute; 8] = [
        ZoneAttribute::FloorFinish,
        ZoneAttribute::CeilingFinish,
        ZoneAttribute::WallFinish,
        ZoneAttribute::WallHeightLevel,
        ZoneAttribute::CeilingHeight,
        ZoneAttribute::Unique,
        ZoneAttribute::Furnished,
        ZoneAttribute::ParametersProvisioned,
    ];

    /// The attribute name as stored in the host document.
    pub fn name(&self) -> &'static str {
        match self {
            ZoneAttribute::FloorFinish => "Floor Finish",
            ZoneAttribute::CeilingFinish => "Ceiling Finish",
            ZoneAttribute::WallFinish => "Wall Finish",
            ZoneAttribute::WallHeightLevel => "Wall Height Level",
            ZoneAttribute::CeilingHeight => "Ceiling Height",
            ZoneAttribute::Unique => "Unique",
            ZoneAttribute::Furnished => "Furnished",
            ZoneAttribute::ParametersProvisioned => "isParameterExsists",
        }
    }

    /// The value kind this attribute must hold.
    pub fn kind(&self) -> AttributeKind {
        match self {
            ZoneAttribute::FloorFinish
            | ZoneAttribute::CeilingFinish
            | ZoneAttribute::WallFinish
            | ZoneAttribute::WallHeightLevel => AttributeKind::Text,
            ZoneAttribute::CeilingHeight => AttributeKind::Number,
            ZoneAttribute::Unique
            | ZoneAttribute::Furnished
            | ZoneAttribute::ParametersProvisioned => AttributeKind::YesNo,
        }
    }

    /// Looks an attribute up by its stored name (exact match).
    pub fn from_name(name: &str) -> Option<ZoneAttribute> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Checks that a value has the kind this attribute expects.
    pub fn check(&self, value: &AttributeValue) -> Result<(), Error> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(self.mismatch(value))
        }
    }

    pub(crate) fn mismatch(&self, value: &AttributeValue) -> Error {
        Error::TypeMismatch {
            attribute: self.name().to_string(),
            expected: self.kind(),
            found: value.kind(),
        }
    }
}

impl fmt::Display for ZoneAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
