//! Error handling for the pipeline.

pub mod types;

pub use types::{CopyResult, PipelineError, ProcessingStage};
