//! Configuration types for the server and CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Locations and credentials of the collaborators the engine is assembled from.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub ocr_url: Option<String>,
    pub caption_url: Option<String>,
    pub generator_url: Option<String>,
    pub segmenter_url: Option<String>,
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    /// JSON file with a `PipelineConfig`; defaults are used when absent.
    pub pipeline_config: Option<PathBuf>,
    /// In-process recognizer; takes precedence over `ocr_url` when set.
    #[cfg(feature = "oar-ocr")]
    pub oar_ocr: Option<prodscribe::domain::adapters::OarOcrConfig>,
}

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub engine: EngineConfig,
    pub host: String,
    pub port: u16,
    pub download_timeout: Duration,
}
