// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-zone envelope synthesis.
//!
//! A pass enumerates zones once and handles each zone independently:
//! resolve its inputs, create its elements inside one transaction, and
//! record the outcome. A zone that fails is rolled back on its own; zones
//! committed before it stay committed.

use room_envelope_core::{
    CatalogEntry, ElementId, ElementKind, Error, ReferenceLevel, Result, Zone, ZoneAttribute,
};

use crate::boundary::extract_zone_loops;
use crate::catalog::CatalogCollector;
use crate::config::PipelineConfig;
use crate::finish::FinishTypeResolver;
use crate::host::HostDocument;
use crate::levels::LevelResolver;
use crate::partition::OffsetWallSynthesizer;
use crate::report::{PassReport, ZoneOutcome, ZoneStatus};
use crate::transaction::Transaction;

/// Runs floor, ceiling and partition passes over a document.
pub struct EnvelopeSynthesisPipeline<'a, D: HostDocument + ?Sized> {
    doc: &'a mut D,
    config: &'a PipelineConfig,
}

impl<'a, D: HostDocument + ?Sized> EnvelopeSynthesisPipeline<'a, D> {
    pub fn new(doc: &'a mut D, config: &'a PipelineConfig) -> Self {
        Self { doc, config }
    }

    /// Run one pass.
    ///
    /// Fails with `NoZonesFound` before any transaction is opened when the
    /// document has no zones. Every other per-zone problem is recorded in the
    /// report.
    pub fn run(&mut self, kind: ElementKind) -> Result<PassReport> {
        let (zones, catalog, levels) = {
            let collector = CatalogCollector::new(&*self.doc);
            let zones = collector.zones()?;
            if zones.is_empty() {
                tracing::warn!(kind = ?kind, "no rooms in the document");
                return Err(Error::NoZonesFound);
            }
            (zones, collector.finish_types(kind)?, collector.levels()?)
        };

        tracing::info!(kind = ?kind, zones = zones.len(), "envelope pass started");
        let mut report = PassReport::new(kind);

        for zone in &zones {
            let status = ZoneStatus::from_result(self.process_zone(kind, zone, &catalog, &levels));
            match &status {
                ZoneStatus::Created { elements } => {
                    tracing::debug!(zone = %zone.id, count = elements.len(), "zone created")
                }
                ZoneStatus::Skipped(e) => tracing::warn!(zone = %zone, reason = %e, "zone skipped"),
                ZoneStatus::Failed(e) => tracing::warn!(zone = %zone, error = %e, "zone failed"),
            }
            report.outcomes.push(ZoneOutcome::new(zone, status));
        }

        tracing::info!(
            kind = ?kind,
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "envelope pass finished"
        );
        Ok(report)
    }

    fn process_zone(
        &mut self,
        kind: ElementKind,
        zone: &Zone,
        catalog: &[CatalogEntry],
        levels: &[ReferenceLevel],
    ) -> Result<Vec<ElementId>> {
        if self.config.respect_unique_flag && zone.flag_opt(ZoneAttribute::Unique)?.unwrap_or(false)
        {
            return Err(Error::Excluded {
                attribute: ZoneAttribute::Unique.name().to_string(),
            });
        }

        let entry = FinishTypeResolver::for_kind(kind).resolve(zone, catalog)?;

        let loops = extract_zone_loops(&*self.doc, zone, self.config.vertex_tolerance)?;
        if loops.is_empty() {
            return Err(Error::EmptyBoundary);
        }

        match kind {
            ElementKind::Floor => {
                let mut tx = Transaction::start(&mut *self.doc, kind.transaction_label())?;
                let id = tx.create_floor(&loops, entry, zone.level_id)?;
                tx.commit()?;
                Ok(vec![id])
            }
            ElementKind::Ceiling => {
                let offset = zone.number_opt(ZoneAttribute::CeilingHeight)?.unwrap_or(0.0);
                let mut tx = Transaction::start(&mut *self.doc, kind.transaction_label())?;
                let id = tx.create_ceiling(&loops, entry, zone.level_id, offset)?;
                tx.commit()?;
                Ok(vec![id])
            }
            ElementKind::Partition => {
                let top = LevelResolver::new(levels, self.config.min_level_clearance)
                    .with_fallback_height(self.config.fallback_partition_height)
                    .partition_top(zone)?;
                tracing::debug!(zone = %zone.id, height = top.height, source = ?top.source, "partition top");
                OffsetWallSynthesizer::new(
                    self.config.join_adjacent_partitions,
                    self.config.join_tolerance,
                )
                .synthesize(&mut *self.doc, &loops, entry, top.height, zone)
            }
        }
    }
}
