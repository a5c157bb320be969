//! Pipeline configuration types.

use crate::core::constants::*;
use crate::core::errors::{CopyResult, PipelineError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoding parameters for the caption generator.
///
/// The defaults favor a short, literal noun phrase over a creative caption: a wide beam,
/// a strong repetition penalty, a very short maximum length and early termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionParams {
    /// Maximum caption length in tokens.
    #[serde(default = "CaptionParams::default_max_length")]
    pub max_length: usize,
    /// Beam search width.
    #[serde(default = "CaptionParams::default_num_beams")]
    pub num_beams: usize,
    /// Penalty applied to tokens already generated (1.0 disables it).
    #[serde(default = "CaptionParams::default_repetition_penalty")]
    pub repetition_penalty: f32,
    /// Size of n-grams that may appear at most once.
    #[serde(default = "CaptionParams::default_no_repeat_ngram_size")]
    pub no_repeat_ngram_size: usize,
    /// Stop as soon as every beam has produced a complete sequence.
    #[serde(default = "CaptionParams::default_early_stopping")]
    pub early_stopping: bool,
}

impl CaptionParams {
    fn default_max_length() -> usize {
        DEFAULT_CAPTION_MAX_LENGTH
    }

    fn default_num_beams() -> usize {
        DEFAULT_CAPTION_NUM_BEAMS
    }

    fn default_repetition_penalty() -> f32 {
        DEFAULT_CAPTION_REPETITION_PENALTY
    }

    fn default_no_repeat_ngram_size() -> usize {
        DEFAULT_NO_REPEAT_NGRAM_SIZE
    }

    fn default_early_stopping() -> bool {
        true
    }

    /// Validates the parameters.
    pub fn validate(&self) -> CopyResult<()> {
        if self.max_length == 0 {
            return Err(PipelineError::invalid_field(
                "caption.max_length",
                "a positive length",
                "0",
            ));
        }
        if self.num_beams == 0 {
            return Err(PipelineError::invalid_field(
                "caption.num_beams",
                "at least one beam",
                "0",
            ));
        }
        if !(self.repetition_penalty >= 1.0) {
            return Err(PipelineError::invalid_field(
                "caption.repetition_penalty",
                "a value >= 1.0",
                self.repetition_penalty.to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CaptionParams {
    fn default() -> Self {
        Self {
            max_length: Self::default_max_length(),
            num_beams: Self::default_num_beams(),
            repetition_penalty: Self::default_repetition_penalty(),
            no_repeat_ngram_size: Self::default_no_repeat_ngram_size(),
            early_stopping: Self::default_early_stopping(),
        }
    }
}

/// Sampling parameters for the description text generator.
///
/// Descriptions are sampled, not decoded greedily, so two calls with the same title are
/// expected to differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sample from the distribution instead of taking the most likely token.
    #[serde(default = "SamplingParams::default_do_sample")]
    pub do_sample: bool,
    /// Nucleus sampling probability mass.
    #[serde(default = "SamplingParams::default_top_p")]
    pub top_p: f32,
    /// Softmax temperature.
    #[serde(default = "SamplingParams::default_temperature")]
    pub temperature: f32,
    /// Size of n-grams that may appear at most once.
    #[serde(default = "SamplingParams::default_no_repeat_ngram_size")]
    pub no_repeat_ngram_size: usize,
    /// Maximum output length in tokens.
    #[serde(default = "SamplingParams::default_max_length")]
    pub max_length: usize,
}

impl SamplingParams {
    fn default_do_sample() -> bool {
        true
    }

    fn default_top_p() -> f32 {
        DEFAULT_TOP_P
    }

    fn default_temperature() -> f32 {
        DEFAULT_TEMPERATURE
    }

    fn default_no_repeat_ngram_size() -> usize {
        DEFAULT_NO_REPEAT_NGRAM_SIZE
    }

    fn default_max_length() -> usize {
        DEFAULT_DESCRIPTION_MAX_LENGTH
    }

    /// Validates the parameters.
    pub fn validate(&self) -> CopyResult<()> {
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(PipelineError::invalid_field(
                "sampling.top_p",
                "a value in (0, 1]",
                self.top_p.to_string(),
            ));
        }
        if !(self.temperature > 0.0) {
            return Err(PipelineError::invalid_field(
                "sampling.temperature",
                "a positive value",
                self.temperature.to_string(),
            ));
        }
        if self.max_length == 0 {
            return Err(PipelineError::invalid_field(
                "sampling.max_length",
                "a positive length",
                "0",
            ));
        }
        Ok(())
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            do_sample: Self::default_do_sample(),
            top_p: Self::default_top_p(),
            temperature: Self::default_temperature(),
            no_repeat_ngram_size: Self::default_no_repeat_ngram_size(),
            max_length: Self::default_max_length(),
        }
    }
}

/// What to do when recognized text produces no keywords at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTitlePolicy {
    /// Return the empty title. The caption generator is never consulted once text was detected.
    #[default]
    Keep,
    /// Run the caption path when the recognized text yields an empty title.
    CaptionFallback,
}

/// Configuration for a [`CopyPipeline`](crate::pipeline::CopyPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Caption decoding parameters.
    #[serde(default)]
    pub caption: CaptionParams,
    /// Description sampling parameters.
    #[serde(default)]
    pub sampling: SamplingParams,
    /// Policy for an empty title on the recognized-text path.
    #[serde(default)]
    pub empty_title: EmptyTitlePolicy,
    /// Number of caption keywords kept for the title.
    #[serde(default = "PipelineConfig::default_max_caption_words")]
    pub max_caption_words: usize,
}

impl PipelineConfig {
    fn default_max_caption_words() -> usize {
        DEFAULT_MAX_CAPTION_WORDS
    }

    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caption decoding parameters.
    pub fn with_caption(mut self, caption: CaptionParams) -> Self {
        self.caption = caption;
        self
    }

    /// Set the description sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Set the empty-title policy.
    pub fn with_empty_title(mut self, policy: EmptyTitlePolicy) -> Self {
        self.empty_title = policy;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> CopyResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            PipelineError::ConfigError {
                message: format!("failed to parse '{}': {}", path.display(), e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section of the configuration.
    pub fn validate(&self) -> CopyResult<()> {
        self.caption.validate()?;
        self.sampling.validate()?;
        if self.max_caption_words == 0 {
            return Err(PipelineError::invalid_field(
                "max_caption_words",
                "at least one word",
                "0",
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            caption: CaptionParams::default(),
            sampling: SamplingParams::default(),
            empty_title: EmptyTitlePolicy::default(),
            max_caption_words: Self::default_max_caption_words(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_settings() {
        let config = PipelineConfig::new();
        assert_eq!(config.caption.max_length, 10);
        assert_eq!(config.caption.num_beams, 5);
        assert_eq!(config.caption.repetition_penalty, 3.0);
        assert!(config.caption.early_stopping);
        assert!(config.sampling.do_sample);
        assert_eq!(config.sampling.top_p, 0.9);
        assert_eq!(config.sampling.temperature, 0.7);
        assert_eq!(config.sampling.no_repeat_ngram_size, 2);
        assert_eq!(config.sampling.max_length, 250);
        assert_eq!(config.max_caption_words, 2);
        assert_eq!(config.empty_title, EmptyTitlePolicy::Keep);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"sampling": {"temperature": 1.1}, "empty_title": "caption_fallback"}"#)
                .unwrap();
        assert_eq!(config.sampling.temperature, 1.1);
        assert_eq!(config.sampling.top_p, 0.9);
        assert_eq!(config.caption, CaptionParams::default());
        assert_eq!(config.empty_title, EmptyTitlePolicy::CaptionFallback);
        assert_eq!(config.max_caption_words, 2);
    }

    #[test]
    fn test_validate_rejects_bad_sampling() {
        let mut config = PipelineConfig::new();
        config.sampling.top_p = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::new();
        config.sampling.temperature = -0.5;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::new();
        config.sampling.top_p = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_caption_and_word_limit() {
        let mut config = PipelineConfig::new();
        config.caption.num_beams = 0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::new();
        config.caption.repetition_penalty = 0.5;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::new();
        config.max_caption_words = 0;
        assert!(config.validate().is_err());
    }
}
