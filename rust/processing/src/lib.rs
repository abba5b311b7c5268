// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room envelope processing
//!
//! Derives floors, ceilings and perimeter partitions for the zones of a host
//! document from the attributes stored on each zone, and keeps the attribute
//! schema those zones depend on up to date.
//!
//! The host is reached only through [`HostDocument`]. [`InMemoryDocument`]
//! implements it without a CAD application.

pub mod boundary;
pub mod catalog;
pub mod config;
pub mod finish;
pub mod host;
pub mod levels;
pub mod memory;
pub mod partition;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod schema;
pub mod transaction;

pub use boundary::extract_zone_loops;
pub use catalog::CatalogCollector;
pub use config::PipelineConfig;
pub use finish::FinishTypeResolver;
pub use host::{DefinitionStore, HostDocument, PartitionPlacement};
pub use levels::{level_by_name, next_level_above, LevelResolver, PartitionTop, TopSource};
pub use memory::{
    ElementGeometry, InMemoryDocument, SharedDefinitionStore, SynthesizedElement,
    TransactionRecord,
};
pub use partition::OffsetWallSynthesizer;
pub use pipeline::EnvelopeSynthesisPipeline;
pub use records::{collect_zone_records, set_zone_attribute, ZoneRecord};
pub use report::{PassReport, PassSummary, ZoneOutcome, ZoneStatus};
pub use schema::{
    default_room_schema, DefinitionOutcome, ParameterSchemaManager, SchemaReport, UpsertOutcome,
};
pub use transaction::Transaction;
