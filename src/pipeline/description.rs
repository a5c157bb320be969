//! Description generation from a title.

use crate::core::config::SamplingParams;
use crate::core::constants::DESCRIPTION_PROMPT_TEMPLATE;
use crate::core::errors::{CopyResult, PipelineError};
use crate::core::traits::TextGenerator;
use rand::RngCore;
use std::sync::Arc;

const TITLE_PLACEHOLDER: &str = "{title}";

/// Expands a product title into marketing copy with a [`TextGenerator`].
///
/// The generated text is returned verbatim; no post-processing is applied.
#[derive(Clone)]
pub struct DescriptionGenerator {
    generator: Arc<dyn TextGenerator>,
    params: SamplingParams,
    template: String,
}

impl std::fmt::Debug for DescriptionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionGenerator")
            .field("generator", &self.generator.name())
            .field("params", &self.params)
            .finish()
    }
}

impl DescriptionGenerator {
    /// Creates a generator with the default prompt and sampling parameters.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            params: SamplingParams::default(),
            template: DESCRIPTION_PROMPT_TEMPLATE.to_string(),
        }
    }

    /// Sets the sampling parameters.
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Replaces the prompt template. The template must contain `{title}`.
    pub fn with_template(mut self, template: impl Into<String>) -> CopyResult<Self> {
        let template = template.into();
        if !template.contains(TITLE_PLACEHOLDER) {
            return Err(PipelineError::invalid_field(
                "template",
                "a prompt containing '{title}'",
                format!("'{}'", template),
            ));
        }
        self.template = template;
        Ok(self)
    }

    /// Sampling parameters passed to the text generator.
    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Substitutes `title` into the prompt template. An empty title is substituted as-is.
    pub fn build_prompt(&self, title: &str) -> String {
        self.template.replace(TITLE_PLACEHOLDER, title)
    }

    /// Generates a description using the thread-local random source.
    ///
    /// Repeated calls with the same title are expected to produce different text.
    pub fn generate(&self, title: &str) -> CopyResult<String> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(title, &mut rng)
    }

    /// Generates a description drawing randomness from `rng`.
    pub fn generate_with_rng(&self, title: &str, rng: &mut dyn RngCore) -> CopyResult<String> {
        let prompt = self.build_prompt(title);
        let description = self.generator.generate(&prompt, &self.params, rng)?;
        tracing::debug!(
            target: "pipeline",
            generator = self.generator.name(),
            chars = description.len(),
            "description generated"
        );
        Ok(description)
    }
}
