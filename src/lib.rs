//! # Prodscribe
//!
//! Derives a short product title and a marketing-style description from a single product
//! photograph, and offers a utility that replaces an image's background with solid white.
//!
//! The title is produced by one of two paths:
//!
//! 1. **Recognized text** - printed text on the packaging is read by a [`TextRecognizer`],
//!    normalized, filtered down to nouns, proper nouns and adjectives, deduplicated and
//!    title-cased.
//! 2. **Caption** - only when no text is detected at all, a [`CaptionGenerator`] describes the
//!    image and the first qualifying words of that caption become the title.
//!
//! The title is then expanded into a description by a [`TextGenerator`].
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants and the capability traits
//! * [`domain`] - Detection and token types, plus HTTP-backed capability adapters
//! * [`processors`] - Text normalization, keyword filtering and casing helpers
//! * [`models`] - The built-in lexicon part-of-speech tagger
//! * [`pipeline`] - Title stages, description generator, controller and background remover
//! * [`utils`] - Tracing setup and image loading/encoding
//!
//! ## Example
//!
//! ```no_run
//! use prodscribe::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = HttpTextRecognizer::new(HttpEndpoint::new("http://localhost:8080/ocr"))?;
//! let captioner = HttpCaptionGenerator::new(HttpEndpoint::new("http://localhost:8081/caption"))?;
//! let generator = HttpTextGenerator::new(HttpEndpoint::new("http://localhost:8082/generate"))?;
//!
//! let pipeline = CopyPipelineBuilder::new()
//!     .recognizer(Arc::new(recognizer))
//!     .captioner(Arc::new(captioner))
//!     .tagger(Arc::new(LexiconTagger::new()))
//!     .text_generator(Arc::new(generator))
//!     .build()?;
//!
//! let image = prodscribe::utils::load_image_from_path("product.jpg".as_ref())?;
//! let result = pipeline.synthesize(&image)?;
//! println!("{}\n{}", result.title, result.description);
//! # Ok(())
//! # }
//! ```
//!
//! [`TextRecognizer`]: core::traits::TextRecognizer
//! [`CaptionGenerator`]: core::traits::CaptionGenerator
//! [`TextGenerator`]: core::traits::TextGenerator

pub mod core;
pub mod domain;
pub mod models;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error handling
    pub use crate::core::{CopyResult, PipelineError, ProcessingStage};

    // Configuration
    pub use crate::core::config::{CaptionParams, EmptyTitlePolicy, PipelineConfig, SamplingParams};

    // Capabilities
    pub use crate::core::traits::{
        CaptionGenerator, ForegroundSegmenter, PosTagger, TextGenerator, TextRecognizer,
    };

    // Domain types
    pub use crate::domain::{PosRole, TaggedToken, TextDetection};

    // Adapters
    pub use crate::domain::adapters::{
        HttpCaptionGenerator, HttpEndpoint, HttpSegmenter, HttpTextGenerator, HttpTextRecognizer,
    };
    #[cfg(feature = "oar-ocr")]
    pub use crate::domain::adapters::OarOcrRecognizer;
    pub use crate::models::LexiconTagger;

    // Pipeline
    pub use crate::pipeline::{
        BackgroundRemover, CopyPipeline, CopyPipelineBuilder, DescriptionGenerator, PipelineResult,
        TitleSource, caption_title, composite_on_white, extract_title,
    };
}
