//! Text recognition over HTTP.
//!
//! Talks to an OCR service that answers with the OCR-server response shape:
//! `{"success": true, "text": "...", "regions": [{"text", "confidence", "bounding_box"}]}`.

use super::http::{HttpClient, HttpEndpoint, png_base64};
use crate::core::errors::{CopyResult, ProcessingStage};
use crate::core::traits::TextRecognizer;
use crate::domain::{DetectionBox, TextDetection};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ADAPTER_NAME: &str = "HttpTextRecognizer";

#[derive(Serialize)]
struct RecognitionRequest<'a> {
    image: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    regions: Vec<RegionResponse>,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RegionResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    bounding_box: Option<DetectionBox>,
}

/// [`TextRecognizer`] backed by a remote OCR service.
pub struct HttpTextRecognizer {
    client: HttpClient,
}

impl HttpTextRecognizer {
    /// Creates a recognizer for the given endpoint.
    pub fn new(endpoint: HttpEndpoint) -> CopyResult<Self> {
        Ok(Self {
            client: HttpClient::new(endpoint, ProcessingStage::Recognition, ADAPTER_NAME)?,
        })
    }

    /// The endpoint this recognizer talks to.
    pub fn endpoint(&self) -> &HttpEndpoint {
        self.client.endpoint()
    }

    fn detections_from(&self, response: RecognitionResponse) -> CopyResult<Vec<TextDetection>> {
        if !response.success {
            return Err(self.client.error(
                response
                    .error
                    .unwrap_or_else(|| "service reported failure".to_string()),
            ));
        }

        // Regions whose text did not survive recognition carry an empty string.
        Ok(response
            .regions
            .into_iter()
            .filter(|region| !region.text.trim().is_empty())
            .map(|region| TextDetection {
                text: region.text,
                confidence: region.confidence,
                bounding_box: region.bounding_box,
            })
            .collect())
    }
}

impl TextRecognizer for HttpTextRecognizer {
    fn recognize(&self, image: &RgbImage) -> CopyResult<Vec<TextDetection>> {
        let encoded = png_base64(image)?;
        let response: RecognitionResponse =
            self.client.post_json(&RecognitionRequest { image: &encoded })?;
        let detections = self.detections_from(response)?;
        debug!(regions = detections.len(), "text recognition finished");
        Ok(detections)
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PipelineError;

    fn recognizer() -> HttpTextRecognizer {
        HttpTextRecognizer::new(HttpEndpoint::new("http://localhost:8080/ocr")).unwrap()
    }

    #[test]
    fn test_response_regions_become_detections_in_order() {
        let response: RecognitionResponse = serde_json::from_str(
            r#"{
                "success": true,
                "text": "ORGANIC\nOATS",
                "regions": [
                    {"text": "ORGANIC", "confidence": 0.97,
                     "bounding_box": {"x_min": 1.0, "y_min": 2.0, "x_max": 30.0, "y_max": 12.0}},
                    {"text": "   ", "confidence": 0.10},
                    {"text": "OATS", "confidence": 0.95}
                ],
                "image_width": 64,
                "image_height": 64
            }"#,
        )
        .unwrap();

        let detections = recognizer().detections_from(response).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "ORGANIC");
        assert_eq!(detections[0].confidence, Some(0.97));
        assert!(detections[0].bounding_box.is_some());
        assert_eq!(detections[1].text, "OATS");
    }

    #[test]
    fn test_unsuccessful_response_is_an_invocation_failure() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{"success": false, "error": "model not loaded"}"#).unwrap();

        let err = recognizer().detections_from(response).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ModelInvocation {
                stage: ProcessingStage::Recognition,
                ..
            }
        ));
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn test_empty_regions_mean_no_text() {
        let response: RecognitionResponse = serde_json::from_str(r#"{"regions": []}"#).unwrap();
        assert!(recognizer().detections_from(response).unwrap().is_empty());
    }
}
