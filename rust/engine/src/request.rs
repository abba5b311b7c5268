// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Requests accepted by the engine.

use serde::{Deserialize, Serialize};

use room_envelope_core::ElementKind;

/// One unit of work for [`crate::EnvelopeEngine::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineRequest {
    FloorPass,
    CeilingPass,
    PartitionPass,
    SchemaUpgrade,
}

impl EngineRequest {
    /// The element kind a pass request synthesizes, `None` for the schema upgrade.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            EngineRequest::FloorPass => Some(ElementKind::Floor),
            EngineRequest::CeilingPass => Some(ElementKind::Ceiling),
            EngineRequest::PartitionPass => Some(ElementKind::Partition),
            EngineRequest::SchemaUpgrade => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_names() {
        let request: EngineRequest = serde_json::from_str("\"partition_pass\"").unwrap();
        assert_eq!(request, EngineRequest::PartitionPass);
        assert_eq!(request.element_kind(), Some(ElementKind::Partition));
        assert_eq!(EngineRequest::SchemaUpgrade.element_kind(), None);
    }
}
