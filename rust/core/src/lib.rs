// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Room-Envelope Core
//!
//! Data model shared by the room envelope passes: zones and their typed
//! attributes, reference levels, catalog entries, attribute definitions, and
//! the error taxonomy every pass reports with.
//!
//! This crate does no geometry and never talks to a host document; it only
//! describes what the host hands over and what can go wrong.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for the model and errors

pub mod attribute;
pub mod error;
pub mod model;
pub mod schema;

pub use attribute::{AttributeBag, AttributeKind, AttributeValue, ZoneAttribute};
pub use error::{Error, Result};
pub use model::{CatalogEntry, Category, ElementId, ElementKind, ReferenceLevel, Zone};
pub use schema::{AttributeDefinition, AttributeGroup, Binding, DefinitionRequest};
