// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end envelope passes against the in-memory document.

use approx::assert_relative_eq;
use room_envelope_core::{AttributeValue, Category, ElementId, ElementKind, Error, ZoneAttribute};
use room_envelope_geometry::{BoundarySegment, Curve, Point3};
use room_envelope_processing::{
    ElementGeometry, EnvelopeSynthesisPipeline, InMemoryDocument, PipelineConfig, ZoneStatus,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64) -> Point3<f64> {
    Point3::new(x, y, 0.0)
}

/// Counter-clockwise rectangle ring
fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<BoundarySegment> {
    vec![
        BoundarySegment::new(Curve::line(p(x0, y0), p(x1, y0))),
        BoundarySegment::new(Curve::line(p(x1, y0), p(x1, y1))),
        BoundarySegment::new(Curve::line(p(x1, y1), p(x0, y1))),
        BoundarySegment::new(Curve::line(p(x0, y1), p(x0, y0))),
    ]
}

/// Clockwise rectangle ring, as islands are reported
fn island(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<BoundarySegment> {
    vec![
        BoundarySegment::new(Curve::line(p(x0, y0), p(x0, y1))),
        BoundarySegment::new(Curve::line(p(x0, y1), p(x1, y1))),
        BoundarySegment::new(Curve::line(p(x1, y1), p(x1, y0))),
        BoundarySegment::new(Curve::line(p(x1, y0), p(x0, y0))),
    ]
}

struct Fixture {
    doc: InMemoryDocument,
    ground: ElementId,
}

impl Fixture {
    fn new() -> Self {
        let mut doc = InMemoryDocument::new();
        let ground = doc.add_level("Level 1", 0.0);
        doc.add_level("Level 2", 3.5);
        doc.add_type(Category::Floors, "Concrete 250mm");
        doc.add_type(Category::Ceilings, "Gypsum Board");
        doc.add_partition_type("Plaster 20", 0.2);
        Self { doc, ground }
    }

    fn zone(&mut self, attributes: &[(ZoneAttribute, AttributeValue)]) -> ElementId {
        let id = self.doc.add_zone(self.ground, vec![rectangle(0.0, 0.0, 5.0, 4.0)]);
        for (attribute, value) in attributes {
            self.doc.seed_attribute(id, *attribute, value.clone());
        }
        id
    }

    fn run(&mut self, kind: ElementKind) -> room_envelope_core::Result<room_envelope_processing::PassReport> {
        self.run_with(kind, &PipelineConfig::default())
    }

    fn run_with(
        &mut self,
        kind: ElementKind,
        config: &PipelineConfig,
    ) -> room_envelope_core::Result<room_envelope_processing::PassReport> {
        EnvelopeSynthesisPipeline::new(&mut self.doc, config).run(kind)
    }
}

fn text(value: &str) -> AttributeValue {
    AttributeValue::text(value)
}

#[test]
fn floor_for_matching_finish() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[(ZoneAttribute::FloorFinish, text("Concrete 250mm"))]);

    let report = fx.run(ElementKind::Floor).unwrap();
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.outcomes[0].status.is_created());
    assert_eq!(fx.doc.elements_of(ElementKind::Floor).len(), 1);
    assert_eq!(fx.doc.journal().len(), 1);
    assert!(fx.doc.journal()[0].committed);
    assert_eq!(fx.doc.journal()[0].label, "Create Floor");
}

#[test]
fn missing_finish_skips_zone() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[]);

    let report = fx.run(ElementKind::Floor).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Skipped(Error::MissingAttribute { .. })
    ));
    assert!(fx.doc.elements().is_empty());
}

#[test]
fn no_zones_aborts_before_any_transaction() {
    init_tracing();
    let mut fx = Fixture::new();
    for kind in [ElementKind::Floor, ElementKind::Ceiling, ElementKind::Partition] {
        assert_eq!(fx.run(kind), Err(Error::NoZonesFound));
    }
    assert!(fx.doc.journal().is_empty());
}

#[test]
fn unknown_height_level_falls_back_to_next_level() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[
        (ZoneAttribute::WallFinish, text("Plaster 20")),
        (ZoneAttribute::WallHeightLevel, text("Roof")),
    ]);

    let report = fx.run(ElementKind::Partition).unwrap();
    assert!(report.outcomes[0].status.is_created());
    let partitions = fx.doc.elements_of(ElementKind::Partition);
    assert_eq!(partitions.len(), 4);
    for element in partitions {
        match &element.geometry {
            ElementGeometry::Partition { height, .. } => assert_relative_eq!(*height, 3.5),
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}

#[test]
fn finish_lookup_is_case_sensitive() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[(ZoneAttribute::FloorFinish, text("concrete 250mm"))]);

    let report = fx.run(ElementKind::Floor).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Skipped(Error::UnknownTypeName { .. })
    ));
}

#[test]
fn failing_zone_does_not_undo_earlier_zones() {
    init_tracing();
    let mut fx = Fixture::new();
    for _ in 0..3 {
        fx.zone(&[(ZoneAttribute::WallFinish, text("Plaster 20"))]);
    }
    // First zone fits, the second runs out halfway
    fx.doc.reject_creations_after(6);

    let report = fx.run(ElementKind::Partition).unwrap();
    assert!(report.outcomes[0].status.is_created());
    assert!(matches!(
        report.outcomes[1].status,
        ZoneStatus::Failed(Error::GeometryCreationFailed(_))
    ));
    assert!(matches!(report.outcomes[2].status, ZoneStatus::Failed(_)));
    assert_eq!(fx.doc.elements_of(ElementKind::Partition).len(), 4);

    let committed: Vec<bool> = fx.doc.journal().iter().map(|t| t.committed).collect();
    assert_eq!(committed, vec![true, false, false]);
    assert!(!fx.doc.in_transaction());
}

#[test]
fn ceiling_uses_height_attribute_as_offset() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[
        (ZoneAttribute::CeilingFinish, text("Gypsum Board")),
        (ZoneAttribute::CeilingHeight, AttributeValue::Number(2.7)),
    ]);
    fx.zone(&[(ZoneAttribute::CeilingFinish, text("Gypsum Board"))]);

    let report = fx.run(ElementKind::Ceiling).unwrap();
    assert_eq!(report.created(), 2);
    let offsets: Vec<f64> = fx
        .doc
        .elements_of(ElementKind::Ceiling)
        .iter()
        .map(|e| match &e.geometry {
            ElementGeometry::Slab { height_offset, .. } => *height_offset,
            other => panic!("unexpected geometry {other:?}"),
        })
        .collect();
    assert_eq!(offsets.len(), 2);
    assert_relative_eq!(offsets[0], 2.7);
    assert_relative_eq!(offsets[1], 0.0);
}

#[test]
fn ceiling_height_of_wrong_kind_skips_zone() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[
        (ZoneAttribute::CeilingFinish, text("Gypsum Board")),
        (ZoneAttribute::CeilingHeight, text("high")),
    ]);

    let report = fx.run(ElementKind::Ceiling).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Skipped(Error::TypeMismatch { .. })
    ));
}

#[test]
fn partition_centerlines_sit_half_thickness_outside() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[(ZoneAttribute::WallFinish, text("Plaster 20"))]);
    fx.run(ElementKind::Partition).unwrap();

    let boundary = rectangle(0.0, 0.0, 5.0, 4.0);
    let partitions = fx.doc.elements_of(ElementKind::Partition);
    assert_eq!(partitions.len(), boundary.len());

    for (segment, element) in boundary.iter().zip(partitions) {
        let centerline = match &element.geometry {
            ElementGeometry::Partition { centerline, .. } => centerline,
            other => panic!("unexpected geometry {other:?}"),
        };
        let shift = centerline.start_point() - segment.curve().start_point();
        let tangent = segment.curve().tangent_at_start().unwrap();
        assert_relative_eq!(shift.norm(), 0.1, epsilon = 1e-9);
        assert_relative_eq!(shift.dot(&tangent), 0.0, epsilon = 1e-9);

        // Outside the 5 x 4 rectangle
        let mid = centerline.midpoint();
        assert!(mid.x < 0.0 || mid.x > 5.0 || mid.y < 0.0 || mid.y > 4.0);
    }
}

#[test]
fn island_partitions_face_into_the_hole() {
    init_tracing();
    let mut fx = Fixture::new();
    let zone = fx.doc.add_zone(
        fx.ground,
        vec![rectangle(0.0, 0.0, 10.0, 10.0), island(4.0, 4.0, 6.0, 6.0)],
    );
    fx.doc
        .seed_attribute(zone, ZoneAttribute::WallFinish, text("Plaster 20"));

    fx.run(ElementKind::Partition).unwrap();
    let partitions = fx.doc.elements_of(ElementKind::Partition);
    assert_eq!(partitions.len(), 8);

    for element in &partitions[4..] {
        let ElementGeometry::Partition { centerline, .. } = &element.geometry else {
            panic!("unexpected geometry");
        };
        let mid = centerline.midpoint();
        assert!(mid.x > 4.0 && mid.x < 6.0 && mid.y > 4.0 && mid.y < 6.0);
    }
}

#[test]
fn override_level_below_base_fails_zone() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.doc.add_level("Basement", -3.0);
    fx.zone(&[
        (ZoneAttribute::WallFinish, text("Plaster 20")),
        (ZoneAttribute::WallHeightLevel, text("Basement")),
    ]);

    let report = fx.run(ElementKind::Partition).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Failed(Error::GeometryCreationFailed(_))
    ));
    assert!(fx.doc.elements().is_empty());
}

#[test]
fn top_level_zone_uses_fallback_height() {
    init_tracing();
    let mut fx = Fixture::new();
    let top = fx.doc.add_level("Roof", 7.0);
    let zone = fx.doc.add_zone(top, vec![rectangle(0.0, 0.0, 3.0, 3.0)]);
    fx.doc
        .seed_attribute(zone, ZoneAttribute::WallFinish, text("Plaster 20"));

    let report = fx.run(ElementKind::Partition).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Skipped(Error::CatalogEntryNotFound { .. })
    ));

    let config = PipelineConfig {
        fallback_partition_height: Some(2.8),
        ..PipelineConfig::default()
    };
    let report = fx.run_with(ElementKind::Partition, &config).unwrap();
    assert_eq!(report.created(), 1);
}

#[test]
fn unique_zones_are_left_alone() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[
        (ZoneAttribute::FloorFinish, text("Concrete 250mm")),
        (ZoneAttribute::Unique, AttributeValue::Flag(true)),
    ]);
    fx.zone(&[
        (ZoneAttribute::FloorFinish, text("Concrete 250mm")),
        (ZoneAttribute::Unique, AttributeValue::Flag(false)),
    ]);

    let report = fx.run(ElementKind::Floor).unwrap();
    assert_eq!((report.created(), report.skipped()), (1, 1));
    assert!(report.summary().to_string().contains("Unique"));
}

#[test]
fn adjacent_partitions_join_when_enabled() {
    init_tracing();
    let mut fx = Fixture::new();
    fx.zone(&[(ZoneAttribute::WallFinish, text("Plaster 20"))]);

    let config = PipelineConfig {
        join_adjacent_partitions: true,
        join_tolerance: 0.2,
        ..PipelineConfig::default()
    };
    fx.run_with(ElementKind::Partition, &config).unwrap();
    assert_eq!(fx.doc.joins().len(), 4);
    assert_eq!(fx.doc.journal().len(), 1);
}

#[test]
fn open_boundary_fails_zone() {
    init_tracing();
    let mut fx = Fixture::new();
    let mut ring = rectangle(0.0, 0.0, 5.0, 4.0);
    ring.pop();
    let zone = fx.doc.add_zone(fx.ground, vec![ring]);
    fx.doc
        .seed_attribute(zone, ZoneAttribute::FloorFinish, text("Concrete 250mm"));

    let report = fx.run(ElementKind::Floor).unwrap();
    assert!(matches!(
        report.outcomes[0].status,
        ZoneStatus::Failed(Error::GeometryCreationFailed(_))
    ));
    assert!(fx.doc.journal().is_empty());
}
