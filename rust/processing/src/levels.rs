// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical extent resolution against reference levels.

use room_envelope_core::{Error, ReferenceLevel, Result, Zone, ZoneAttribute};

/// Default clearance between a zone's level and the level its partitions reach.
pub const DEFAULT_MIN_CLEARANCE: f64 = 1.8;

/// First level strictly higher than `base.elevation + min_clearance`.
///
/// Levels are considered in ascending elevation order regardless of input
/// order. A level exactly at the threshold does not qualify.
pub fn next_level_above<'a>(
    levels: &'a [ReferenceLevel],
    base: &ReferenceLevel,
    min_clearance: f64,
) -> Option<&'a ReferenceLevel> {
    let threshold = base.elevation + min_clearance;
    let mut sorted: Vec<&ReferenceLevel> = levels.iter().collect();
    sorted.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
    sorted.into_iter().find(|level| level.elevation > threshold)
}

/// Case-insensitive exact name lookup.
pub fn level_by_name<'a>(levels: &'a [ReferenceLevel], name: &str) -> Option<&'a ReferenceLevel> {
    let wanted = name.to_lowercase();
    levels.iter().find(|level| level.name.to_lowercase() == wanted)
}

/// Where a partition's height came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopSource {
    /// The zone named a level explicitly
    Override,
    /// The next level above the zone's level
    NextLevel,
    /// No level qualified; the configured fallback height was used
    Fallback,
}

/// Resolved top of a zone's partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTop {
    pub height: f64,
    pub top_level: Option<ReferenceLevel>,
    pub source: TopSource,
}

/// Resolves partition heights for zones against one set of levels.
#[derive(Debug, Clone)]
pub struct LevelResolver<'a> {
    levels: &'a [ReferenceLevel],
    min_clearance: f64,
    fallback_height: Option<f64>,
}

impl<'a> LevelResolver<'a> {
    pub fn new(levels: &'a [ReferenceLevel], min_clearance: f64) -> Self {
        Self {
            levels,
            min_clearance,
            fallback_height: None,
        }
    }

    pub fn with_fallback_height(mut self, height: Option<f64>) -> Self {
        self.fallback_height = height;
        self
    }

    /// The zone's own level.
    pub fn base_level(&self, zone: &Zone) -> Result<&'a ReferenceLevel> {
        self.levels
            .iter()
            .find(|level| level.id == zone.level_id)
            .ok_or_else(|| Error::level_not_found(zone.level_id))
    }

    /// Height of the zone's partitions.
    ///
    /// A level named by the zone's `Wall Height Level` attribute takes
    /// precedence. If that name matches no level, or the attribute is unset,
    /// the next level above by the minimum clearance is used.
    pub fn partition_top(&self, zone: &Zone) -> Result<PartitionTop> {
        let base = self.base_level(zone)?;

        if let Some(name) = zone.text_opt(ZoneAttribute::WallHeightLevel)? {
            match level_by_name(self.levels, name) {
                Some(level) => {
                    return Ok(PartitionTop {
                        height: level.elevation - base.elevation,
                        top_level: Some(level.clone()),
                        source: TopSource::Override,
                    })
                }
                None => tracing::warn!(
                    zone = %zone.id,
                    level = name,
                    "override level not found, using next level above"
                ),
            }
        }

        if let Some(level) = next_level_above(self.levels, base, self.min_clearance) {
            return Ok(PartitionTop {
                height: level.elevation - base.elevation,
                top_level: Some(level.clone()),
                source: TopSource::NextLevel,
            });
        }

        match self.fallback_height {
            Some(height) => Ok(PartitionTop {
                height,
                top_level: None,
                source: TopSource::Fallback,
            }),
            None => Err(Error::level_not_found(format!(
                "above '{}' by more than {}",
                base.name, self.min_clearance
            ))),
        }
    }
}
