//! HTTP flow-server generator
//!
//! Calls a deployed flow over HTTP. The flow server wraps inputs and outputs
//! in a small envelope:
//!
//! ```text
//! POST {base_url}/{flow}        {"data": {"question": "..."}}
//! 200 OK                        {"result": {"response": "..."}}
//! 4xx/5xx or 200                {"error": {"status": "...", "message": "..."}}
//! ```

use super::{GenerateError, Generator};
use crate::config::GeneratorConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Longest slice of a raw error body echoed back to the user
const MAX_ERROR_BODY: usize = 300;

pub struct HttpGenerator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    /// Create a generator for the configured flow
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let url = config.flow_url();

        tracing::info!(
            "Initialized flow generator: {} (timeout: {}s, auth: {})",
            url,
            config.timeout_secs,
            if config.api_key.is_some() {
                "bearer"
            } else {
                "none"
            }
        );

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct FlowRequest<'a> {
    data: FlowInput<'a>,
}

#[derive(Debug, Serialize)]
struct FlowInput<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct FlowEnvelope {
    result: Option<FlowOutput>,
    error: Option<FlowErrorBody>,
}

#[derive(Debug, Deserialize)]
struct FlowOutput {
    response: String,
}

#[derive(Debug, Deserialize)]
struct FlowErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl FlowErrorBody {
    fn describe(&self) -> String {
        match (&self.message, &self.status) {
            (Some(message), _) => message.clone(),
            (None, Some(status)) => status.clone(),
            (None, None) => "Unknown error".to_string(),
        }
    }
}

/// Interpret a flow-server reply
pub(crate) fn parse_flow_body(status: u16, body: &str) -> Result<String, GenerateError> {
    let envelope: Option<FlowEnvelope> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let message = envelope
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .map(FlowErrorBody::describe)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body_excerpt(trimmed).to_string()
                }
            });
        return Err(GenerateError::Api { status, message });
    }

    let envelope = envelope.ok_or_else(|| {
        GenerateError::InvalidResponse("body is not a flow envelope".to_string())
    })?;

    if let Some(error) = envelope.error {
        return Err(GenerateError::Flow(error.describe()));
    }

    envelope
        .result
        .map(|output| output.response)
        .ok_or_else(|| GenerateError::InvalidResponse("missing result.response".to_string()))
}

/// Leading slice of a raw body, at most `MAX_ERROR_BODY` bytes on a char boundary
fn body_excerpt(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let end = (0..=MAX_ERROR_BODY)
        .rev()
        .find(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    &body[..end]
}

#[async_trait]
impl Generator for HttpGenerator {
    fn name(&self) -> &'static str {
        "flow-http"
    }

    async fn generate(&self, question: &str) -> Result<String, GenerateError> {
        let mut request = self.client.post(&self.url).json(&FlowRequest {
            data: FlowInput { question },
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerateError::Timeout
            } else {
                GenerateError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GenerateError::Timeout
            } else {
                GenerateError::Network(format!("Failed to read response body: {}", e))
            }
        })?;

        tracing::debug!(status, body_len = body.len(), "Flow server replied");

        parse_flow_body(status, &body)
    }
}
