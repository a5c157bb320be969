//! The core module of the pipeline.
//!
//! This module contains the fundamental components shared by every stage:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - Traits defining the leaf capabilities (text recognition, captioning, tagging,
//!   text generation, segmentation)

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

pub use config::{CaptionParams, EmptyTitlePolicy, PipelineConfig, SamplingParams};
pub use constants::*;
pub use errors::{CopyResult, PipelineError, ProcessingStage};
pub use traits::{CaptionGenerator, ForegroundSegmenter, PosTagger, TextGenerator, TextRecognizer};
