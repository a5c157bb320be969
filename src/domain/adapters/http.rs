//! Shared HTTP plumbing for the remote capability adapters.

use crate::core::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::core::errors::{CopyResult, PipelineError, ProcessingStage};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbImage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Upper bound on binary response bodies (decoded images).
const MAX_BINARY_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Location and credentials of a remote inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpEndpoint {
    /// Full URL requests are POSTed to.
    pub url: String,
    /// Optional bearer token sent in the `Authorization` header.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Whole-request timeout in seconds.
    #[serde(default = "HttpEndpoint::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpEndpoint {
    fn default_timeout_secs() -> u64 {
        DEFAULT_HTTP_TIMEOUT_SECS
    }

    /// Creates an endpoint with no token and the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_token: None,
            timeout_secs: Self::default_timeout_secs(),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    fn validate(&self) -> CopyResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(PipelineError::invalid_field(
                "url",
                "an http:// or https:// URL",
                format!("'{}'", self.url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PipelineError::invalid_field("timeout_secs", "a positive timeout", "0"));
        }
        Ok(())
    }
}

/// Blocking client bound to one endpoint and one pipeline stage.
///
/// Every failure is reported as a [`PipelineError::ModelInvocation`] naming the adapter.
pub(crate) struct HttpClient {
    agent: Agent,
    endpoint: HttpEndpoint,
    stage: ProcessingStage,
    adapter: &'static str,
}

impl HttpClient {
    pub(crate) fn new(
        endpoint: HttpEndpoint,
        stage: ProcessingStage,
        adapter: &'static str,
    ) -> CopyResult<Self> {
        endpoint.validate()?;
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(endpoint.timeout_secs)))
            .http_status_as_error(false)
            .build();
        Ok(Self {
            agent: config.into(),
            endpoint,
            stage,
            adapter,
        })
    }

    pub(crate) fn endpoint(&self) -> &HttpEndpoint {
        &self.endpoint
    }

    fn request(&self) -> ureq::RequestBuilder<ureq::typestate::WithBody> {
        let request = self.agent.post(self.endpoint.url.as_str());
        match &self.endpoint.api_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// POSTs a JSON body and decodes a JSON response.
    pub(crate) fn post_json<B, R>(&self, body: &B) -> CopyResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(adapter = self.adapter, url = %self.endpoint.url, "POST json");
        let mut response = self
            .request()
            .send_json(body)
            .map_err(|e| self.error_with_source("request failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.body_mut().read_to_string().unwrap_or_default();
            return Err(self.error(format!("HTTP {}: {}", status, detail.trim())));
        }

        response
            .body_mut()
            .read_json::<R>()
            .map_err(|e| self.error_with_source("undecodable response body", e))
    }

    /// POSTs raw bytes and returns the raw response body.
    pub(crate) fn post_bytes(&self, content_type: &str, bytes: &[u8]) -> CopyResult<Vec<u8>> {
        debug!(
            adapter = self.adapter,
            url = %self.endpoint.url,
            bytes = bytes.len(),
            "POST binary"
        );
        let mut response = self
            .request()
            .header("Content-Type", content_type)
            .send(bytes)
            .map_err(|e| self.error_with_source("request failed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.body_mut().read_to_string().unwrap_or_default();
            return Err(self.error(format!("HTTP {}: {}", status, detail.trim())));
        }

        response
            .body_mut()
            .with_config()
            .limit(MAX_BINARY_RESPONSE_BYTES)
            .read_to_vec()
            .map_err(|e| self.error_with_source("failed to read response body", e))
    }

    pub(crate) fn error(&self, context: impl Into<String>) -> PipelineError {
        PipelineError::invocation(self.stage, self.adapter, context)
    }

    pub(crate) fn error_with_source(
        &self,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> PipelineError {
        PipelineError::invocation_with_source(self.stage, self.adapter, context, source)
    }
}

/// Response of a text-producing inference endpoint.
///
/// Endpoints answer either with a list of candidates (the first one is used) or with a single
/// object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum GeneratedTextResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedText {
    generated_text: String,
}

impl GeneratedTextResponse {
    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            GeneratedTextResponse::Batch(items) => {
                items.into_iter().next().map(|item| item.generated_text)
            }
            GeneratedTextResponse::Single(item) => Some(item.generated_text),
        }
    }
}

/// Encodes an image as base64 PNG for JSON payloads.
pub(crate) fn png_base64(image: &RgbImage) -> CopyResult<String> {
    let png = crate::utils::encode_png(image)?;
    Ok(STANDARD.encode(png))
}
