//! Single-attempt request dispatch.

use std::env;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::request::InferenceRequest;
use crate::{Error, Result};

/// Default base URL for the remote inference API.
pub const BASE_API_URL: &str = "https://api.openai.com/v1";

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const COMPLETIONS_PATH: &str = "/completions";

/// Environment variable consulted for the bearer credential when no explicit
/// override is configured. Read at each dispatch so rotation is honored.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Route by payload shape: a `messages` field targets the chat endpoint,
/// anything else the completion endpoint.
pub(crate) fn endpoint_path(payload: &Map<String, Value>) -> &'static str {
    if payload.contains_key("messages") {
        CHAT_COMPLETIONS_PATH
    } else {
        COMPLETIONS_PATH
    }
}

/// Performs one dispatch attempt against the remote API.
///
/// Holds no connection state: each attempt builds its own HTTP client, so a
/// connection is opened and closed per attempt. Retrying and concurrency
/// limiting live in the caller.
pub(crate) struct Dispatcher {
    base_url: String,
    model: String,
    override_api_key: Option<String>,
}

impl Dispatcher {
    pub fn new(base_url: String, model: String, override_api_key: Option<String>) -> Self {
        Self {
            base_url,
            model,
            override_api_key,
        }
    }

    fn api_key(&self) -> Option<String> {
        self.override_api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV_VAR).ok())
    }

    /// Build the wire body: caller payload plus the injected model identifier
    /// and, when requested, the JSON-only response format.
    fn wire_body(&self, request: &InferenceRequest) -> Map<String, Value> {
        let mut body = request.payload().clone();
        body.insert("model".to_string(), json!(self.model));
        if request.json_mode() {
            body.insert("response_format".to_string(), json!({"type": "json_object"}));
        }
        body
    }

    /// Send one attempt and parse the response body.
    ///
    /// A non-success status is logged with the parsed error body (or raw text
    /// when unparsable) and surfaced as [`Error::Api`] carrying the status and
    /// the remote `error.type` / `error.message` metadata for classification.
    pub async fn dispatch(&self, request: &InferenceRequest) -> Result<Value> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let url = format!("{}{}", self.base_url, endpoint_path(request.payload()));
        let mut req = client.post(&url).json(&self.wire_body(request));
        if let Some(key) = self.api_key() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (error_type, message) = match serde_json::from_str::<Value>(&text) {
                Ok(body) => {
                    info!(status = status.as_u16(), body = %body, "error response from API");
                    let error = body.get("error");
                    (
                        error
                            .and_then(|e| e.get("type"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        error
                            .and_then(|e| e.get("message"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    )
                }
                Err(_) => {
                    warn!(
                        status = status.as_u16(),
                        body = %text,
                        "could not parse error response as JSON"
                    );
                    (None, None)
                }
            };
            return Err(Error::Api {
                status: status.as_u16(),
                error_type,
                message,
            });
        }

        Ok(response.json().await?)
    }
}
