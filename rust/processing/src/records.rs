// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone read model and single-attribute edits.

use serde::Serialize;

use room_envelope_core::{AttributeValue, ElementId, Result, Zone, ZoneAttribute};

use crate::catalog::CatalogCollector;
use crate::host::HostDocument;
use crate::transaction::Transaction;

const UPDATE_LABEL: &str = "Update room attribute";
const UNKNOWN_LEVEL: &str = "Unknown";

/// One row of the zone overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecord {
    pub id: ElementId,
    pub name: String,
    pub number: String,
    pub level: String,
    pub unique: bool,
    pub floor_finish: Option<String>,
    pub ceiling_finish: Option<String>,
    pub wall_finish: Option<String>,
    pub wall_height_level: Option<String>,
}

// Display reads never fail on a bad value; it shows as unset.
fn text(zone: &Zone, attribute: ZoneAttribute) -> Option<String> {
    zone.text_opt(attribute).ok().flatten().map(str::to_string)
}

/// One record per zone, in host order.
pub fn collect_zone_records<D: HostDocument + ?Sized>(doc: &D) -> Result<Vec<ZoneRecord>> {
    let collector = CatalogCollector::new(doc);
    let levels = collector.levels()?;

    Ok(collector
        .zones()?
        .into_iter()
        .map(|zone| {
            let level = levels
                .iter()
                .find(|l| l.id == zone.level_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| UNKNOWN_LEVEL.to_string());
            ZoneRecord {
                id: zone.id,
                level,
                unique: zone.flag_opt(ZoneAttribute::Unique).ok().flatten().unwrap_or(false),
                floor_finish: text(&zone, ZoneAttribute::FloorFinish),
                ceiling_finish: text(&zone, ZoneAttribute::CeilingFinish),
                wall_finish: text(&zone, ZoneAttribute::WallFinish),
                wall_height_level: text(&zone, ZoneAttribute::WallHeightLevel),
                name: zone.name,
                number: zone.number,
            }
        })
        .collect())
}

/// Write one attribute on a zone in its own transaction.
///
/// The value must have the kind the attribute expects.
pub fn set_zone_attribute<D: HostDocument + ?Sized>(
    doc: &mut D,
    zone: ElementId,
    attribute: ZoneAttribute,
    value: AttributeValue,
) -> Result<()> {
    attribute.check(&value)?;
    let mut tx = Transaction::start(doc, UPDATE_LABEL)?;
    tx.set_attribute(zone, attribute.name(), value)?;
    tx.commit()?;
    tracing::debug!(zone = %zone, attribute = %attribute, "zone attribute updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDocument;
    use room_envelope_core::Error;

    #[test]
    fn records_reflect_attributes() {
        let mut doc = InMemoryDocument::new();
        let level = doc.add_level("Ground", 0.0);
        let zone = doc.add_zone(level, Vec::new());
        doc.zone_mut(zone).unwrap().name = "Office".into();
        doc.seed_attribute(zone, ZoneAttribute::FloorFinish, AttributeValue::text("Carpet"));
        doc.seed_attribute(zone, ZoneAttribute::Unique, AttributeValue::Flag(true));
        // Wrong kind reads as unset
        doc.seed_attribute(zone, ZoneAttribute::WallFinish, AttributeValue::Number(3.0));

        let records = collect_zone_records(&doc).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Office");
        assert_eq!(record.level, "Ground");
        assert!(record.unique);
        assert_eq!(record.floor_finish.as_deref(), Some("Carpet"));
        assert_eq!(record.wall_finish, None);
    }

    #[test]
    fn unknown_level_is_labelled() {
        let mut doc = InMemoryDocument::new();
        doc.add_zone(ElementId(404), Vec::new());
        let records = collect_zone_records(&doc).unwrap();
        assert_eq!(records[0].level, "Unknown");
    }

    #[test]
    fn set_attribute_checks_kind() {
        let mut doc = InMemoryDocument::new();
        let level = doc.add_level("Ground", 0.0);
        let zone = doc.add_zone(level, Vec::new());

        let err = set_zone_attribute(&mut doc, zone, ZoneAttribute::Unique, AttributeValue::text("yes"))
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(doc.journal().is_empty());

        set_zone_attribute(&mut doc, zone, ZoneAttribute::Unique, AttributeValue::Flag(true)).unwrap();
        let records = collect_zone_records(&doc).unwrap();
        assert!(records[0].unique);
        assert_eq!(doc.journal()[0].label, "Update room attribute");
    }
}
