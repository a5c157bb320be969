//! Configuration management for the pipeline.
//!
//! This module provides the decoding/sampling parameter types handed to the caption and
//! text generators, and the top-level [`PipelineConfig`].

pub mod pipeline;

pub use pipeline::{CaptionParams, EmptyTitlePolicy, PipelineConfig, SamplingParams};
