//! The copy pipeline controller.
//!
//! [`CopyPipeline`] routes one image through the recognized-text or caption title path and then
//! through the description generator. It is assembled from capability handles with
//! [`CopyPipelineBuilder`].

use super::caption::caption_title;
use super::description::DescriptionGenerator;
use super::result::{PipelineResult, TitleSource};
use super::title::extract_title;
use crate::core::config::{EmptyTitlePolicy, PipelineConfig};
use crate::core::errors::{CopyResult, PipelineError};
use crate::core::traits::{CaptionGenerator, PosTagger, TextGenerator, TextRecognizer};
use crate::domain::concatenated_text;
use crate::models::LexiconTagger;
use image::RgbImage;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;

/// Builder for [`CopyPipeline`].
///
/// The text recognizer, caption generator and text generator are required. The part-of-speech
/// tagger defaults to [`LexiconTagger`] and the configuration to [`PipelineConfig::default`].
///
/// # Example
///
/// ```no_run
/// use prodscribe::prelude::*;
/// use std::sync::Arc;
///
/// # fn build(
/// #     recognizer: Arc<dyn TextRecognizer>,
/// #     captioner: Arc<dyn CaptionGenerator>,
/// #     generator: Arc<dyn TextGenerator>,
/// # ) -> CopyResult<CopyPipeline> {
/// CopyPipelineBuilder::new()
///     .recognizer(recognizer)
///     .captioner(captioner)
///     .text_generator(generator)
///     .config(PipelineConfig::new().with_empty_title(EmptyTitlePolicy::CaptionFallback))
///     .build()
/// # }
/// ```
#[derive(Default)]
pub struct CopyPipelineBuilder {
    recognizer: Option<Arc<dyn TextRecognizer>>,
    captioner: Option<Arc<dyn CaptionGenerator>>,
    tagger: Option<Arc<dyn PosTagger>>,
    text_generator: Option<Arc<dyn TextGenerator>>,
    config: Option<PipelineConfig>,
}

impl CopyPipelineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text recognizer.
    pub fn recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Sets the caption generator.
    pub fn captioner(mut self, captioner: Arc<dyn CaptionGenerator>) -> Self {
        self.captioner = Some(captioner);
        self
    }

    /// Sets the part-of-speech tagger.
    pub fn tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Sets the text generator used for descriptions.
    pub fn text_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.text_generator = Some(generator);
        self
    }

    /// Sets the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validates the configuration and assembles the pipeline.
    pub fn build(self) -> CopyResult<CopyPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let recognizer = self.recognizer.ok_or_else(|| missing("text recognizer", "recognizer"))?;
        let captioner = self.captioner.ok_or_else(|| missing("caption generator", "captioner"))?;
        let text_generator = self
            .text_generator
            .ok_or_else(|| missing("text generator", "text_generator"))?;
        let tagger = self
            .tagger
            .unwrap_or_else(|| Arc::new(LexiconTagger::new()) as Arc<dyn PosTagger>);

        let describer = DescriptionGenerator::new(text_generator).with_params(config.sampling.clone());

        tracing::info!(
            target: "pipeline",
            recognizer = recognizer.name(),
            captioner = captioner.name(),
            tagger = tagger.name(),
            empty_title = ?config.empty_title,
            "copy pipeline ready"
        );

        Ok(CopyPipeline {
            recognizer,
            captioner,
            tagger,
            describer,
            config,
        })
    }
}

fn missing(what: &str, method: &str) -> PipelineError {
    PipelineError::config_error_with_suggestion(
        "pipeline builder",
        format!("no {} was supplied", what),
        format!("call `{}(...)` before `build()`", method),
    )
}

/// Synthesizes a title and a description for product images.
///
/// The pipeline holds only shared, immutable handles, so one instance can serve concurrent
/// requests from several threads.
pub struct CopyPipeline {
    recognizer: Arc<dyn TextRecognizer>,
    captioner: Arc<dyn CaptionGenerator>,
    tagger: Arc<dyn PosTagger>,
    describer: DescriptionGenerator,
    config: PipelineConfig,
}

impl std::fmt::Debug for CopyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyPipeline")
            .field("recognizer", &self.recognizer.name())
            .field("captioner", &self.captioner.name())
            .field("tagger", &self.tagger.name())
            .field("describer", &self.describer)
            .field("config", &self.config)
            .finish()
    }
}

impl CopyPipeline {
    /// Produces the title and description for one image.
    ///
    /// The caption generator runs only when the recognizer detected no text (or, with
    /// [`EmptyTitlePolicy::CaptionFallback`], when the recognized text gave an empty title).
    /// Any collaborator failure aborts the run; no partial result is returned.
    pub fn synthesize(&self, image: &RgbImage) -> CopyResult<PipelineResult> {
        let mut rng = rand::thread_rng();
        self.synthesize_with_rng(image, &mut rng)
    }

    /// Like [`synthesize`](Self::synthesize), drawing sampling randomness from `rng`.
    pub fn synthesize_with_rng(
        &self,
        image: &RgbImage,
        rng: &mut dyn RngCore,
    ) -> CopyResult<PipelineResult> {
        let start = Instant::now();
        let (title, source) = self.resolve_title(image)?;
        let title_elapsed = start.elapsed();

        let description = self.describer.generate_with_rng(&title, rng)?;

        tracing::info!(
            target: "pipeline",
            %title,
            source = ?source,
            title_ms = title_elapsed.as_millis() as u64,
            total_ms = start.elapsed().as_millis() as u64,
            "copy synthesized"
        );

        Ok(PipelineResult {
            title,
            description,
            source,
        })
    }

    /// Produces only the title for one image. The text generator is not invoked.
    pub fn title(&self, image: &RgbImage) -> CopyResult<String> {
        self.resolve_title(image).map(|(title, _)| title)
    }

    /// The validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The description generator, for callers that already have a title.
    pub fn describer(&self) -> &DescriptionGenerator {
        &self.describer
    }

    fn resolve_title(&self, image: &RgbImage) -> CopyResult<(String, TitleSource)> {
        let detections = self.recognizer.recognize(image)?;
        tracing::debug!(
            target: "pipeline",
            recognizer = self.recognizer.name(),
            detections = detections.len(),
            "text recognized"
        );

        if detections.is_empty() {
            return Ok((self.caption_path(image)?, TitleSource::Caption));
        }

        let raw_text = concatenated_text(&detections);
        let title = extract_title(&raw_text, self.tagger.as_ref())?;

        if title.is_empty() && self.config.empty_title == EmptyTitlePolicy::CaptionFallback {
            tracing::debug!(
                target: "pipeline",
                %raw_text,
                "recognized text has no keywords; falling back to caption"
            );
            return Ok((self.caption_path(image)?, TitleSource::Caption));
        }

        Ok((title, TitleSource::RecognizedText))
    }

    fn caption_path(&self, image: &RgbImage) -> CopyResult<String> {
        caption_title(
            image,
            self.captioner.as_ref(),
            self.tagger.as_ref(),
            &self.config.caption,
            self.config.max_caption_words,
        )
    }
}
