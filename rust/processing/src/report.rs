// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-zone pass outcomes.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use room_envelope_core::{ElementId, ElementKind, Error, Zone};

/// What happened to one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ZoneStatus {
    Created { elements: Vec<ElementId> },
    /// The zone's inputs or the elements they reference could not be
    /// resolved. Nothing from the zone remains; a transaction may have been
    /// opened and rolled back when the host reported the missing reference.
    Skipped(Error),
    /// Creation was attempted and rolled back
    Failed(Error),
}

impl ZoneStatus {
    /// Classify a zone result.
    pub fn from_result(result: Result<Vec<ElementId>, Error>) -> Self {
        match result {
            Ok(elements) => ZoneStatus::Created { elements },
            Err(e) if e.is_zone_skip() => ZoneStatus::Skipped(e),
            Err(e) => ZoneStatus::Failed(e),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ZoneStatus::Created { .. })
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            ZoneStatus::Created { .. } => None,
            ZoneStatus::Skipped(e) | ZoneStatus::Failed(e) => Some(e),
        }
    }
}

/// Outcome for one zone, labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOutcome {
    pub zone: ElementId,
    pub label: String,
    pub status: ZoneStatus,
}

impl ZoneOutcome {
    pub fn new(zone: &Zone, status: ZoneStatus) -> Self {
        Self {
            zone: zone.id,
            label: zone.to_string(),
            status,
        }
    }
}

/// Everything one pass did, in zone enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    pub kind: ElementKind,
    pub outcomes: Vec<ZoneOutcome>,
}

impl PassReport {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
        }
    }

    pub fn created(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_created()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ZoneStatus::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ZoneStatus::Failed(_)))
            .count()
    }

    /// All element ids created by the pass.
    pub fn elements(&self) -> Vec<ElementId> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                ZoneStatus::Created { elements } => Some(elements.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One summary for the whole pass, grouping skips and failures by reason.
    pub fn summary(&self) -> PassSummary {
        let mut reasons: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut order = Vec::new();
        for outcome in &self.outcomes {
            if let Some(e) = outcome.status.error() {
                let reason = e.to_string();
                let zones = reasons.entry(reason.clone()).or_insert_with(|| {
                    order.push(reason);
                    Vec::new()
                });
                zones.push(outcome.label.clone());
            }
        }

        PassSummary {
            kind: self.kind,
            created: self.created(),
            skipped: self.skipped(),
            failed: self.failed(),
            reasons: order
                .into_iter()
                .map(|reason| {
                    let zones = reasons.remove(&reason).unwrap_or_default();
                    (reason, zones)
                })
                .collect(),
        }
    }
}

/// Aggregated end-of-pass diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassSummary {
    pub kind: ElementKind,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Distinct reasons with the zones they affected, in first-seen order
    pub reasons: Vec<(String, Vec<String>)>,
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pass: {} created, {} skipped, {} failed",
            self.kind, self.created, self.skipped, self.failed
        )?;
        for (reason, zones) in &self.reasons {
            write!(f, "\n  {reason}: {}", zones.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: u64, name: &str) -> Zone {
        Zone::new(ElementId(id), ElementId(1)).named(name, id.to_string())
    }

    #[test]
    fn classifies_results() {
        assert!(ZoneStatus::from_result(Ok(vec![ElementId(5)])).is_created());
        assert!(matches!(
            ZoneStatus::from_result(Err(Error::EmptyBoundary)),
            ZoneStatus::Skipped(_)
        ));
        assert!(matches!(
            ZoneStatus::from_result(Err(Error::GeometryCreationFailed("x".into()))),
            ZoneStatus::Failed(_)
        ));
    }

    #[test]
    fn summary_groups_by_reason() {
        let missing = Error::MissingAttribute {
            attribute: "Floor Finish".into(),
        };
        let mut report = PassReport::new(ElementKind::Floor);
        report.outcomes.push(ZoneOutcome::new(
            &zone(1, "Kitchen"),
            ZoneStatus::Created {
                elements: vec![ElementId(10)],
            },
        ));
        report
            .outcomes
            .push(ZoneOutcome::new(&zone(2, "Hall"), ZoneStatus::Skipped(missing.clone())));
        report
            .outcomes
            .push(ZoneOutcome::new(&zone(3, "Bath"), ZoneStatus::Skipped(missing)));

        let summary = report.summary();
        assert_eq!((summary.created, summary.skipped, summary.failed), (1, 2, 0));
        assert_eq!(summary.reasons.len(), 1);
        assert_eq!(summary.reasons[0].1.len(), 2);
        assert_eq!(report.elements(), vec![ElementId(10)]);
        assert!(summary.to_string().starts_with("floor pass: 1 created, 2 skipped, 0 failed"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "Floor");
        assert_eq!(json["outcomes"].as_array().unwrap().len(), 3);
    }
}
