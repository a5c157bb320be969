//! In-process text recognition through the `oar-ocr` library.
//!
//! Enabled with the `oar-ocr` cargo feature. Detection and recognition run on ONNX Runtime;
//! CUDA devices additionally require the `cuda` feature.

use crate::core::errors::{CopyResult, PipelineError, ProcessingStage};
use crate::core::traits::TextRecognizer;
use crate::domain::{DetectionBox, TextDetection};
use image::RgbImage;
#[cfg(feature = "cuda")]
use oar_ocr::core::config::OrtExecutionProvider;
use oar_ocr::core::config::OrtSessionConfig;
use oar_ocr::oarocr::{OAROCR, OAROCRBuilder};
use std::path::PathBuf;

const ADAPTER_NAME: &str = "OarOcrRecognizer";

/// Model files and device for the in-process recognizer.
#[derive(Debug, Clone)]
pub struct OarOcrConfig {
    pub det_model: PathBuf,
    pub rec_model: PathBuf,
    pub dict_path: PathBuf,
    pub device: String,
}

/// [`TextRecognizer`] running text detection and recognition locally.
pub struct OarOcrRecognizer {
    ocr: OAROCR,
}

impl OarOcrRecognizer {
    /// Loads the models. Every model file must exist.
    pub fn new(config: &OarOcrConfig) -> CopyResult<Self> {
        for (label, path) in [
            ("detection model", &config.det_model),
            ("recognition model", &config.rec_model),
            ("character dictionary", &config.dict_path),
        ] {
            if !path.exists() {
                return Err(PipelineError::config_error_with_suggestion(
                    ADAPTER_NAME,
                    format!("{} not found: {}", label, path.display()),
                    "download the model files or fix the path",
                ));
            }
        }

        let ort_config = parse_device_config(&config.device)?;

        let mut builder =
            OAROCRBuilder::new(&config.det_model, &config.rec_model, &config.dict_path);
        if let Some(ort_config) = ort_config {
            builder = builder.ort_session(ort_config);
        }

        let ocr = builder.build().map_err(|e| PipelineError::ConfigError {
            message: format!("{}: {}", ADAPTER_NAME, e),
        })?;

        Ok(Self { ocr })
    }
}

impl TextRecognizer for OarOcrRecognizer {
    fn recognize(&self, image: &RgbImage) -> CopyResult<Vec<TextDetection>> {
        let result = self
            .ocr
            .predict(vec![image.clone()])
            .map_err(|e| {
                PipelineError::invocation_with_source(
                    ProcessingStage::Recognition,
                    ADAPTER_NAME,
                    "predict",
                    e,
                )
            })?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PipelineError::invocation(
                    ProcessingStage::Recognition,
                    ADAPTER_NAME,
                    "no results returned",
                )
            })?;

        Ok(result
            .text_regions
            .iter()
            .filter_map(|region| {
                let text = region.text.as_ref()?.to_string();
                if text.trim().is_empty() {
                    return None;
                }
                let bbox = &region.bounding_box;
                Some(TextDetection {
                    text,
                    confidence: region.confidence,
                    bounding_box: Some(DetectionBox {
                        x_min: bbox.x_min(),
                        y_min: bbox.y_min(),
                        x_max: bbox.x_max(),
                        y_max: bbox.y_max(),
                    }),
                })
            })
            .collect())
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}

/// Parses `cpu`, `cuda` or `cuda:N` into an ONNX Runtime session configuration.
fn parse_device_config(device: &str) -> CopyResult<Option<OrtSessionConfig>> {
    let device_lower = device.to_lowercase();

    if device_lower == "cpu" {
        return Ok(None);
    }

    #[cfg(feature = "cuda")]
    {
        if device_lower.starts_with("cuda") {
            let device_id = if device_lower == "cuda" {
                0
            } else if let Some(id_str) = device_lower.strip_prefix("cuda:") {
                id_str.parse::<i32>().map_err(|_| {
                    PipelineError::invalid_field("device", "a CUDA device id", device)
                })?
            } else {
                return Err(PipelineError::invalid_field(
                    "device",
                    "'cuda' or 'cuda:N'",
                    device,
                ));
            };

            let config = OrtSessionConfig::new().with_execution_providers(vec![
                OrtExecutionProvider::CUDA {
                    device_id: Some(device_id),
                    gpu_mem_limit: None,
                    arena_extend_strategy: None,
                    cudnn_conv_algo_search: None,
                    do_copy_in_default_stream: None,
                    cudnn_conv_use_max_workspace: None,
                },
                OrtExecutionProvider::CPU,
            ]);

            return Ok(Some(config));
        }
    }

    #[cfg(not(feature = "cuda"))]
    {
        if device_lower.starts_with("cuda") {
            return Err(PipelineError::ConfigError {
                message: format!(
                    "CUDA device '{}' requested but the cuda feature is not enabled",
                    device
                ),
            });
        }
    }

    Err(PipelineError::invalid_field("device", "cpu, cuda or cuda:N", device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_device_needs_no_session_config() {
        assert!(parse_device_config("CPU").unwrap().is_none());
    }

    #[test]
    fn test_unknown_device_is_rejected() {
        assert!(parse_device_config("tpu").is_err());
    }

    #[test]
    fn test_missing_model_files_are_reported() {
        let config = OarOcrConfig {
            det_model: PathBuf::from("/nonexistent/det.onnx"),
            rec_model: PathBuf::from("/nonexistent/rec.onnx"),
            dict_path: PathBuf::from("/nonexistent/dict.txt"),
            device: "cpu".to_string(),
        };
        let err = OarOcrRecognizer::new(&config).err().unwrap();
        assert!(err.to_string().contains("detection model not found"));
    }
}
