// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute schema upkeep.
//!
//! Definitions are replaced rather than patched: an existing definition is
//! unbound and deleted, then recreated with the requested kind and
//! visibility and bound again. The end state does not depend on whether
//! the definition existed before.

use serde::Serialize;

use room_envelope_core::{
    AttributeDefinition, Binding, DefinitionRequest, Error, Result, ZoneAttribute,
};

use crate::host::{DefinitionStore, HostDocument};
use crate::transaction::Transaction;

const REMOVE_LABEL: &str = "Remove existing parameter";
const CREATE_LABEL: &str = "Create parameter";

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpsertOutcome {
    Created,
    Replaced,
}

/// Result of upserting one definition during an upgrade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionOutcome {
    pub name: String,
    pub result: std::result::Result<UpsertOutcome, Error>,
}

/// Per-definition results of a schema upgrade, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaReport {
    pub outcomes: Vec<DefinitionOutcome>,
}

impl SchemaReport {
    pub fn failures(&self) -> impl Iterator<Item = &DefinitionOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// The definitions every room needs, in the order they are provisioned.
pub fn default_room_schema(group_name: &str) -> Vec<DefinitionRequest> {
    [
        (ZoneAttribute::WallHeightLevel, true),
        (ZoneAttribute::Unique, true),
        (ZoneAttribute::Furnished, false),
        (ZoneAttribute::ParametersProvisioned, false),
    ]
    .into_iter()
    .map(|(attribute, visible)| DefinitionRequest::room(group_name, attribute, visible))
    .collect()
}

/// Creates or replaces attribute definitions and their document bindings.
pub struct ParameterSchemaManager<'a, D: HostDocument + ?Sized> {
    doc: &'a mut D,
}

impl<'a, D: HostDocument + ?Sized> ParameterSchemaManager<'a, D> {
    pub fn new(doc: &'a mut D) -> Self {
        Self { doc }
    }

    fn store(&mut self) -> Result<&mut dyn DefinitionStore> {
        self.doc
            .definition_store()
            .ok_or(Error::SchemaStoreUnavailable)
    }

    /// Create `request`'s definition, replacing any definition of the same
    /// name in the group.
    pub fn upsert_definition(&mut self, request: &DefinitionRequest) -> Result<UpsertOutcome> {
        let group = request.group_name.as_str();
        let existing = {
            let store = self.store()?;
            store.ensure_group(group)?;
            store.find_definition(group, &request.name)
        };

        let outcome = match existing {
            Some(existing) => {
                self.unbind(&existing)?;
                let removed = self.store()?.remove_definition(group, &existing.name);
                if let Err(e) = removed {
                    // Keep the old definition reachable for the next upsert
                    if let Err(restore) = self.bind(existing, request) {
                        tracing::error!(name = %request.name, error = %restore, "could not rebind definition");
                    }
                    return Err(e);
                }
                UpsertOutcome::Replaced
            }
            None => UpsertOutcome::Created,
        };

        let definition = self.store()?.create_definition(group, request.definition())?;
        if let Err(e) = self.bind(definition, request) {
            // The store is not transactional; drop the unbound definition by hand
            if let Some(store) = self.doc.definition_store() {
                if let Err(cleanup) = store.remove_definition(group, &request.name) {
                    tracing::error!(name = %request.name, error = %cleanup, "could not discard unbound definition");
                }
            }
            return Err(e);
        }

        tracing::debug!(
            name = %request.name,
            visible = request.visible,
            outcome = ?outcome,
            "definition upserted"
        );
        Ok(outcome)
    }

    fn bind(&mut self, definition: AttributeDefinition, request: &DefinitionRequest) -> Result<()> {
        let mut tx = Transaction::start(&mut *self.doc, CREATE_LABEL)?;
        tx.insert_binding(Binding {
            definition,
            categories: vec![request.category],
            group: request.attribute_group,
        })?;
        tx.commit()
    }

    fn unbind(&mut self, definition: &AttributeDefinition) -> Result<()> {
        let mut tx = Transaction::start(&mut *self.doc, REMOVE_LABEL)?;
        if !tx.remove_binding(&definition.name)? {
            return Err(Error::BindingRemovalFailed {
                definition: definition.name.clone(),
            });
        }
        tx.commit()
    }

    /// Upsert each request in order.
    ///
    /// Stops with `SchemaStoreUnavailable` as soon as the store cannot be
    /// opened. Any other failure is recorded and the next request is tried.
    pub fn upgrade(&mut self, requests: &[DefinitionRequest]) -> Result<SchemaReport> {
        let mut report = SchemaReport::default();
        for request in requests {
            let result = match self.upsert_definition(request) {
                Err(Error::SchemaStoreUnavailable) => return Err(Error::SchemaStoreUnavailable),
                other => other,
            };
            if let Err(e) = &result {
                tracing::warn!(name = %request.name, error = %e, "definition not upserted");
            }
            report.outcomes.push(DefinitionOutcome {
                name: request.name.clone(),
                result,
            });
        }
        tracing::info!(
            total = report.outcomes.len(),
            failed = report.failures().count(),
            "schema upgrade finished"
        );
        Ok(report)
    }
}
