// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pass results returned to callers.

use serde::Serialize;

use room_envelope_core::Error;
use room_envelope_processing::{DefinitionOutcome, ZoneOutcome};

/// A terminal condition, reported once per pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(error: &Error) -> Self {
        Self {
            code: error_code(error).to_string(),
            message: error.to_string(),
        }
    }
}

/// Stable machine-readable code for an error.
pub fn error_code(error: &Error) -> &'static str {
    match error {
        Error::NoZonesFound => "NO_ZONES_FOUND",
        Error::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
        Error::TypeMismatch { .. } => "TYPE_MISMATCH",
        Error::UnknownTypeName { .. } => "UNKNOWN_TYPE_NAME",
        Error::CatalogEntryNotFound { .. } => "CATALOG_ENTRY_NOT_FOUND",
        Error::SchemaStoreUnavailable => "SCHEMA_STORE_UNAVAILABLE",
        Error::BindingRemovalFailed { .. } => "BINDING_REMOVAL_FAILED",
        Error::GeometryCreationFailed(_) => "GEOMETRY_CREATION_FAILED",
        Error::EmptyBoundary => "EMPTY_BOUNDARY",
        Error::Excluded { .. } => "EXCLUDED",
        Error::Host(_) => "HOST_ERROR",
    }
}

/// Pass-level success plus per-item outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassResult<T> {
    /// False only when the pass was aborted as a whole.
    pub success: bool,
    /// Why the pass was aborted.
    pub diagnostic: Option<Diagnostic>,
    /// Aggregated end-of-pass message.
    pub summary: Option<String>,
    pub outcomes: Vec<T>,
}

impl<T> PassResult<T> {
    pub fn completed(outcomes: Vec<T>, summary: impl Into<String>) -> Self {
        Self {
            success: true,
            diagnostic: None,
            summary: Some(summary.into()),
            outcomes,
        }
    }

    pub fn aborted(error: &Error) -> Self {
        Self {
            success: false,
            diagnostic: Some(Diagnostic::from_error(error)),
            summary: None,
            outcomes: Vec::new(),
        }
    }
}

impl<T: Serialize> PassResult<T> {
    /// The result as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Response to an [`crate::EngineRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum EngineResponse {
    Pass(PassResult<ZoneOutcome>),
    Schema(PassResult<DefinitionOutcome>),
}

impl EngineResponse {
    pub fn success(&self) -> bool {
        match self {
            EngineResponse::Pass(result) => result.success,
            EngineResponse::Schema(result) => result.success,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            EngineResponse::Pass(result) => result.diagnostic.as_ref(),
            EngineResponse::Schema(result) => result.diagnostic.as_ref(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
