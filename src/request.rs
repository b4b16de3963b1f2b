//! Request type for a single inference call.

use std::time::Duration;

use serde_json::{Map, Value};

/// One inference request: the caller-supplied payload fields plus per-call
/// options. Constructed fresh per call and not mutated after dispatch; the
/// model identifier is injected by the dispatcher, never stored here.
#[derive(Debug, Clone, Default)]
pub struct InferenceRequest {
    payload: Map<String, Value>,
    timeout: Option<Duration>,
    json_mode: bool,
}

impl InferenceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one payload field. Fields are sent to the API verbatim.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.payload.insert(name.into(), value);
        self
    }

    /// Replace the payload with an existing field map.
    pub fn fields(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Per-attempt request timeout. Unset means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ask the API for JSON-only output (`response_format: json_object`).
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn json_mode(&self) -> bool {
        self.json_mode
    }
}
