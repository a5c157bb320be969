//! Result types for the pipeline.

use serde::Serialize;

/// Which path produced the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// Printed text recognized on the product.
    RecognizedText,
    /// A caption of the whole image.
    Caption,
}

/// Title and description synthesized for one image.
///
/// Serializes as `{"title": ..., "description": ...}`; the title source is kept for callers
/// and logs only. An empty `title` is a valid outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub title: String,
    pub description: String,
    #[serde(skip)]
    pub source: TitleSource,
}

impl PipelineResult {
    /// Returns true when no keyword survived title extraction.
    pub fn is_title_empty(&self) -> bool {
        self.title.is_empty()
    }
}
