//! Image captioning over HTTP.
//!
//! Sends an inference-API style payload: the image as base64 PNG in `inputs` and the decoding
//! parameters in `parameters`.

use super::http::{GeneratedTextResponse, HttpClient, HttpEndpoint, png_base64};
use crate::core::config::CaptionParams;
use crate::core::errors::{CopyResult, ProcessingStage};
use crate::core::traits::CaptionGenerator;
use image::RgbImage;
use serde::Serialize;

const ADAPTER_NAME: &str = "HttpCaptionGenerator";

#[derive(Serialize)]
struct CaptionRequest<'a> {
    inputs: &'a str,
    parameters: &'a CaptionParams,
}

/// [`CaptionGenerator`] backed by a remote image-to-text service.
pub struct HttpCaptionGenerator {
    client: HttpClient,
}

impl HttpCaptionGenerator {
    /// Creates a caption generator for the given endpoint.
    pub fn new(endpoint: HttpEndpoint) -> CopyResult<Self> {
        Ok(Self {
            client: HttpClient::new(endpoint, ProcessingStage::Captioning, ADAPTER_NAME)?,
        })
    }
}

impl CaptionGenerator for HttpCaptionGenerator {
    fn caption(&self, image: &RgbImage, params: &CaptionParams) -> CopyResult<String> {
        let encoded = png_base64(image)?;
        let response: GeneratedTextResponse = self.client.post_json(&CaptionRequest {
            inputs: &encoded,
            parameters: params,
        })?;
        response
            .into_text()
            .ok_or_else(|| self.client.error("service returned no caption"))
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}
