//! Core error types for the title/description pipeline.
//!
//! This module defines the error enum shared by every pipeline component, together with the
//! [`ProcessingStage`] enum that identifies which collaborator an invocation failure came from.

use thiserror::Error;

/// Enum representing the stage of the pipeline in which an error occurred.
///
/// Every stage maps to exactly one leaf collaborator, except [`ProcessingStage::Composition`]
/// which is the in-process alpha blend of the background remover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Reading printed text from the image.
    Recognition,
    /// Describing the image with a caption.
    Captioning,
    /// Part-of-speech tagging of recognized text or a caption.
    Tagging,
    /// Expanding a title into a description.
    Generation,
    /// Separating foreground from background.
    Segmentation,
    /// Flattening a segmented image onto a white canvas.
    Composition,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Recognition => write!(f, "text recognition"),
            ProcessingStage::Captioning => write!(f, "captioning"),
            ProcessingStage::Tagging => write!(f, "part-of-speech tagging"),
            ProcessingStage::Generation => write!(f, "text generation"),
            ProcessingStage::Segmentation => write!(f, "segmentation"),
            ProcessingStage::Composition => write!(f, "composition"),
        }
    }
}

/// Enum representing the errors that can occur in the pipeline.
///
/// An empty title is *not* an error: it is a valid [`PipelineResult`] value.
///
/// [`PipelineResult`]: crate::pipeline::PipelineResult
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A leaf collaborator failed, timed out or returned something unusable.
    #[error("{stage} failed in '{model}': {context}")]
    ModelInvocation {
        /// The stage of the pipeline that failed.
        stage: ProcessingStage,
        /// Name of the collaborator that was invoked.
        model: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error occurred while decoding or encoding an image.
    #[error("image codec")]
    ImageLoad(#[from] image::ImageError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type CopyResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Creates a model invocation error without an underlying source.
    pub fn invocation(
        stage: ProcessingStage,
        model: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::ModelInvocation {
            stage,
            model: model.into(),
            context: context.into(),
            source: None,
        }
    }

    /// Wraps an error raised while invoking a collaborator.
    pub fn invocation_with_source(
        stage: ProcessingStage,
        model: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelInvocation {
            stage,
            model: model.into(),
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a configuration error with a suggestion for recovery.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use prodscribe::core::PipelineError;
    /// let err = PipelineError::config_error_with_suggestion(
    ///     "pipeline builder",
    ///     "no text generator was supplied",
    ///     "call `text_generator(...)` before `build()`"
    /// );
    /// assert!(matches!(err, PipelineError::ConfigError { .. }));
    /// ```
    pub fn config_error_with_suggestion(
        context: impl Into<String>,
        details: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "{}: {}; suggestion: {}",
                context.into(),
                details.into(),
                suggestion.into()
            ),
        }
    }

    /// Creates a configuration error for invalid field values.
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }

    /// Returns the stage of a model invocation failure.
    pub fn stage(&self) -> Option<ProcessingStage> {
        match self {
            Self::ModelInvocation { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invocation_error_display_names_stage_and_model() {
        let err = PipelineError::invocation(ProcessingStage::Captioning, "blip", "empty caption");
        assert_eq!(
            err.to_string(),
            "captioning failed in 'blip': empty caption"
        );
        assert_eq!(err.stage(), Some(ProcessingStage::Captioning));
    }

    #[test]
    fn test_invocation_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline");
        let err = PipelineError::invocation_with_source(
            ProcessingStage::Recognition,
            "ocr",
            "request failed",
            io,
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_field_message() {
        let err = PipelineError::invalid_field("top_p", "a value in (0, 1]", "1.5");
        assert!(err.to_string().contains("'top_p'"));
        assert_eq!(err.stage(), None);
    }
}
