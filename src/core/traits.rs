//! Traits for the leaf capabilities the pipeline is built from.
//!
//! Every capability is a synchronous, thread-safe trait object. Handles are constructed once at
//! process start, shared through `Arc`, and never mutated afterwards; implementations that keep
//! internal state must make it safe for concurrent use.

use crate::core::config::{CaptionParams, SamplingParams};
use crate::core::errors::CopyResult;
use crate::domain::{TaggedToken, TextDetection};
use image::{RgbImage, RgbaImage};
use rand::RngCore;

/// Reads printed text from an image.
pub trait TextRecognizer: Send + Sync {
    /// Returns the detected text regions in detection order. An empty vector means no text.
    fn recognize(&self, image: &RgbImage) -> CopyResult<Vec<TextDetection>>;

    /// A short name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Describes the dominant subject of an image in one short caption.
pub trait CaptionGenerator: Send + Sync {
    /// Generates a caption with the given decoding parameters.
    fn caption(&self, image: &RgbImage, params: &CaptionParams) -> CopyResult<String>;

    /// A short name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Tags every token of a string with its grammatical role, in source order.
pub trait PosTagger: Send + Sync {
    /// Tokenizes and tags `text`.
    fn tag(&self, text: &str) -> CopyResult<Vec<TaggedToken>>;

    /// A short name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Generates text from a prompt.
///
/// The random source is an explicit argument so that callers decide between production
/// non-determinism and a seeded, reproducible run.
pub trait TextGenerator: Send + Sync {
    /// Generates one string for `prompt`.
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
        rng: &mut dyn RngCore,
    ) -> CopyResult<String>;

    /// A short name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Separates the foreground subject of an image from its background.
pub trait ForegroundSegmenter: Send + Sync {
    /// Returns the image with a per-pixel alpha channel; background pixels are transparent.
    /// The output has the same dimensions as `image`.
    fn segment(&self, image: &RgbImage) -> CopyResult<RgbaImage>;

    /// A short name used in logs and error messages.
    fn name(&self) -> &str;
}
