// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room envelope engine
//!
//! Entry point for callers that drive the envelope passes. Wraps a
//! [`HostDocument`](room_envelope_processing::HostDocument) and exposes the
//! floor, ceiling and partition passes, the schema upgrade, and a request
//! dispatcher whose results serialize to JSON.

pub mod engine;
pub mod request;
pub mod response;

pub use engine::EnvelopeEngine;
pub use request::EngineRequest;
pub use response::{error_code, Diagnostic, EngineResponse, PassResult};
