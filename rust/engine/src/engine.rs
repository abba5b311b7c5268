// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The engine facade.

use room_envelope_core::{AttributeValue, ElementId, ElementKind, Result, ZoneAttribute};
use room_envelope_processing::{
    collect_zone_records, default_room_schema, set_zone_attribute, DefinitionOutcome,
    EnvelopeSynthesisPipeline, HostDocument, ParameterSchemaManager, PipelineConfig, ZoneOutcome,
    ZoneRecord,
};

use crate::request::EngineRequest;
use crate::response::{EngineResponse, PassResult};

/// Owns a host document and runs every envelope operation against it.
///
/// All mutating operations take `&mut self`, so requests against one
/// document are applied one at a time.
pub struct EnvelopeEngine<D: HostDocument> {
    document: D,
    config: PipelineConfig,
}

impl<D: HostDocument> EnvelopeEngine<D> {
    /// Engine with configuration read from the environment.
    pub fn new(document: D) -> Self {
        Self::with_config(document, PipelineConfig::from_env())
    }

    pub fn with_config(document: D, config: PipelineConfig) -> Self {
        Self { document, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn run_floor_pass(&mut self) -> PassResult<ZoneOutcome> {
        self.run_pass(ElementKind::Floor)
    }

    pub fn run_ceiling_pass(&mut self) -> PassResult<ZoneOutcome> {
        self.run_pass(ElementKind::Ceiling)
    }

    pub fn run_partition_pass(&mut self) -> PassResult<ZoneOutcome> {
        self.run_pass(ElementKind::Partition)
    }

    fn run_pass(&mut self, kind: ElementKind) -> PassResult<ZoneOutcome> {
        match EnvelopeSynthesisPipeline::new(&mut self.document, &self.config).run(kind) {
            Ok(report) => {
                let summary = report.summary().to_string();
                PassResult::completed(report.outcomes, summary)
            }
            Err(e) => {
                tracing::error!(kind = ?kind, error = %e, "envelope pass aborted");
                PassResult::aborted(&e)
            }
        }
    }

    /// Create or replace the room attribute definitions in the configured group.
    pub fn run_schema_upgrade(&mut self) -> PassResult<DefinitionOutcome> {
        let requests = default_room_schema(&self.config.schema_group);
        match ParameterSchemaManager::new(&mut self.document).upgrade(&requests) {
            Ok(report) => {
                let failed = report.failures().count();
                let summary = format!(
                    "schema upgrade: {} definitions updated, {} failed",
                    report.outcomes.len() - failed,
                    failed
                );
                PassResult::completed(report.outcomes, summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "schema upgrade aborted");
                PassResult::aborted(&e)
            }
        }
    }

    /// Run one request to completion.
    pub fn handle(&mut self, request: EngineRequest) -> EngineResponse {
        tracing::info!(request = ?request, "handling request");
        match request {
            EngineRequest::FloorPass => EngineResponse::Pass(self.run_floor_pass()),
            EngineRequest::CeilingPass => EngineResponse::Pass(self.run_ceiling_pass()),
            EngineRequest::PartitionPass => EngineResponse::Pass(self.run_partition_pass()),
            EngineRequest::SchemaUpgrade => EngineResponse::Schema(self.run_schema_upgrade()),
        }
    }

    /// Run requests in order; each sees the document left by the previous one.
    pub fn handle_all(
        &mut self,
        requests: impl IntoIterator<Item = EngineRequest>,
    ) -> Vec<EngineResponse> {
        requests.into_iter().map(|r| self.handle(r)).collect()
    }

    pub fn zone_records(&self) -> Result<Vec<ZoneRecord>> {
        collect_zone_records(&self.document)
    }

    pub fn set_zone_attribute(
        &mut self,
        zone: ElementId,
        attribute: ZoneAttribute,
        value: AttributeValue,
    ) -> Result<()> {
        set_zone_attribute(&mut self.document, zone, attribute, value)
    }
}
