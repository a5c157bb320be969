//! Engine assembly and image acquisition shared between CLI and server modes.

use crate::config::EngineConfig;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use image::RgbImage;
use prodscribe::prelude::*;
use prodscribe::utils::load_image_from_bytes;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to download image: {0}")]
    Download(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("{0}")]
    NotConfigured(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Error body returned by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_)
            | ServiceError::Download(_)
            | ServiceError::ImageDecode(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Config(_) | ServiceError::Worker(_) | ServiceError::Pipeline(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message including every underlying cause.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.detailed_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

fn endpoint(url: &str, config: &EngineConfig) -> HttpEndpoint {
    HttpEndpoint::new(url)
        .with_api_token(config.api_token.clone())
        .with_timeout(config.http_timeout)
}

fn required<'a>(value: &'a Option<String>, flag: &str, env: &str) -> Result<&'a str, ServiceError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServiceError::Config(format!("missing --{} (or {})", flag, env)))
}

fn build_recognizer(config: &EngineConfig) -> Result<Arc<dyn TextRecognizer>, ServiceError> {
    #[cfg(feature = "oar-ocr")]
    {
        if let Some(oar) = &config.oar_ocr {
            let recognizer = prodscribe::domain::adapters::OarOcrRecognizer::new(oar)?;
            return Ok(Arc::new(recognizer));
        }
    }

    let url = required(&config.ocr_url, "ocr-url", "PRODSCRIBE_OCR_URL")?;
    Ok(Arc::new(HttpTextRecognizer::new(endpoint(url, config))?))
}

/// Assembles the copy pipeline from the configured collaborators.
pub fn build_pipeline(config: &EngineConfig) -> Result<CopyPipeline, ServiceError> {
    let pipeline_config = match &config.pipeline_config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };

    let recognizer = build_recognizer(config)?;
    let caption_url = required(&config.caption_url, "caption-url", "PRODSCRIBE_CAPTION_URL")?;
    let generator_url =
        required(&config.generator_url, "generator-url", "PRODSCRIBE_GENERATOR_URL")?;

    let pipeline = CopyPipelineBuilder::new()
        .recognizer(recognizer)
        .captioner(Arc::new(HttpCaptionGenerator::new(endpoint(caption_url, config))?))
        .tagger(Arc::new(LexiconTagger::new()))
        .text_generator(Arc::new(HttpTextGenerator::new(endpoint(generator_url, config))?))
        .config(pipeline_config)
        .build()?;
    Ok(pipeline)
}

/// Assembles the background remover, or `None` when no segmenter is configured.
pub fn build_remover(config: &EngineConfig) -> Result<Option<BackgroundRemover>, ServiceError> {
    match config.segmenter_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let segmenter = HttpSegmenter::new(endpoint(url, config))?;
            Ok(Some(BackgroundRemover::new(Arc::new(segmenter))))
        }
        None => {
            info!("No segmenter configured; background removal is disabled");
            Ok(None)
        }
    }
}

/// Fetches images by URL with a whole-request timeout.
#[derive(Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Download bytes from a URL
    pub async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Download(format!("Failed to fetch URL: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::Download(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Download(format!("Failed to read response body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    /// Download an image from a URL
    pub async fn download_image(&self, url: &str) -> Result<RgbImage, ServiceError> {
        let bytes = self.download_bytes(url).await?;
        decode_image(&bytes)
    }
}

/// Decodes an uploaded or downloaded payload, reporting failures as client errors.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ServiceError> {
    load_image_from_bytes(bytes)
        .map_err(|e| ServiceError::ImageDecode(ServiceError::from(e).detailed_message()))
}
