// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use room_envelope_geometry::VERTEX_TOLERANCE;

use crate::levels::DEFAULT_MIN_CLEARANCE;
use crate::partition::DEFAULT_JOIN_TOLERANCE;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Skip zones whose `Unique` flag is set.
    pub respect_unique_flag: bool,
    /// Join touching partitions of a zone after creating them.
    pub join_adjacent_partitions: bool,
    /// Clearance a level must exceed above the zone level to bound its partitions.
    pub min_level_clearance: f64,
    /// Partition height used when no level qualifies.
    pub fallback_partition_height: Option<f64>,
    /// Maximum gap between consecutive boundary curves.
    pub vertex_tolerance: f64,
    /// Maximum distance at which two partition centerlines are joined.
    pub join_tolerance: f64,
    /// Definition group the room schema is created in.
    pub schema_group: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            respect_unique_flag: true,
            join_adjacent_partitions: false,
            min_level_clearance: DEFAULT_MIN_CLEARANCE,
            fallback_partition_height: None,
            vertex_tolerance: VERTEX_TOLERANCE,
            join_tolerance: DEFAULT_JOIN_TOLERANCE,
            schema_group: "Room".into(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_bool = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Some(true),
                    "0" | "false" | "no" | "off" => Some(false),
                    _ => None,
                })
                .unwrap_or(default)
        };
        let parse_f64 = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        Self {
            respect_unique_flag: parse_bool(
                "ENVELOPE_RESPECT_UNIQUE_FLAG",
                defaults.respect_unique_flag,
            ),
            join_adjacent_partitions: parse_bool(
                "ENVELOPE_JOIN_ADJACENT_PARTITIONS",
                defaults.join_adjacent_partitions,
            ),
            min_level_clearance: parse_f64("ENVELOPE_MIN_LEVEL_CLEARANCE")
                .filter(|c| *c >= 0.0)
                .unwrap_or(defaults.min_level_clearance),
            fallback_partition_height: parse_f64("ENVELOPE_FALLBACK_PARTITION_HEIGHT")
                .filter(|h| *h > 0.0)
                .or(defaults.fallback_partition_height),
            vertex_tolerance: parse_f64("ENVELOPE_VERTEX_TOLERANCE")
                .filter(|t| *t > 0.0)
                .unwrap_or(defaults.vertex_tolerance),
            join_tolerance: parse_f64("ENVELOPE_JOIN_TOLERANCE")
                .filter(|t| *t > 0.0)
                .unwrap_or(defaults.join_tolerance),
            schema_group: lookup("ENVELOPE_SCHEMA_GROUP")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.schema_group),
        }
    }
}
