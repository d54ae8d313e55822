//! Submission wire contract and its HTTP transport

use crate::config::FormsConfig;
use crate::error::{FormError, Result};
use crate::store::FormState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Request body: the form identifier merged alongside the flattened state,
/// `{ "formIdentifier": "...", "<field>": { "index", "value" }, ... }`.
/// Field identifiers are lower-case, so none can shadow `formIdentifier`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "formIdentifier")]
    pub form_identifier: String,
    #[serde(flatten)]
    pub state: FormState,
}

/// Body of a successful response. Only its existence matters to the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Delivers a submission to the persistence endpoint
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// `SubmissionRejected` for non-2xx answers, `Transport` when no answer
    /// arrived.
    async fn send(&self, payload: &SubmissionPayload) -> Result<SubmitResponse>;
}

/// JSON over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &FormsConfig) -> Result<Self> {
        Self::new(config.submit_endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: reqwest::Error) -> FormError {
    if e.is_timeout() {
        FormError::Transport(format!("request timed out: {}", e))
    } else {
        FormError::Transport(e.to_string())
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<SubmitResponse> {
        debug!(endpoint = %self.endpoint, form = %payload.form_identifier, "Posting submission");

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await;

        if status.is_success() {
            let parsed = match body {
                Ok(bytes) if bytes.is_empty() => SubmitResponse::default(),
                Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                    debug!(error = %e, "Success response body is not JSON");
                    SubmitResponse::default()
                }),
                Err(e) => {
                    warn!(error = %e, "Could not read success response body");
                    SubmitResponse::default()
                }
            };
            return Ok(parsed);
        }

        let message = body
            .ok()
            .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        Err(FormError::SubmissionRejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldState;
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let mut state = FormState::new();
        state.insert("email", FieldState { index: Some(0), value: Some("a@b.com".into()) });
        let payload = SubmissionPayload {
            form_identifier: "contact".into(),
            state,
        };

        let body = serde_json::to_string(&payload).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            decoded,
            json!({ "formIdentifier": "contact", "email": { "index": 0, "value": "a@b.com" } })
        );
    }

    #[test]
    fn test_payload_parses_back() {
        let payload: SubmissionPayload = serde_json::from_value(json!({
            "formIdentifier": "newsletter",
            "name": { "index": 1, "value": "Ada" },
            "colour": { "value": "#000000" }
        }))
        .unwrap();
        assert_eq!(payload.form_identifier, "newsletter");
        assert_eq!(payload.state.value("name"), "Ada");
        assert_eq!(payload.state.get("colour").and_then(|s| s.index), None);
    }
}
