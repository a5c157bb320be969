//! Title extraction from an image caption.
//!
//! Used only when no text was recognized on the product.

use crate::core::config::CaptionParams;
use crate::core::errors::CopyResult;
use crate::core::traits::{CaptionGenerator, PosTagger};
use crate::processors::{dedup_case_insensitive, keyword_tokens, sentence_case};
use image::RgbImage;

/// Captions the image and keeps at most `max_words` of its keywords as the title.
///
/// The caption is tagged, filtered down to nouns, proper nouns and adjectives, deduplicated
/// case-insensitively, truncated to the first `max_words` keywords in caption order, joined with
/// single spaces and sentence-cased. A caption without keywords gives an empty title.
///
/// Caption text is used as the tagger returns it, without the normalization applied to
/// recognized text.
pub fn caption_title(
    image: &RgbImage,
    captioner: &dyn CaptionGenerator,
    tagger: &dyn PosTagger,
    params: &CaptionParams,
    max_words: usize,
) -> CopyResult<String> {
    let caption = captioner.caption(image, params)?;
    tracing::debug!(target: "pipeline", captioner = captioner.name(), %caption, "image captioned");

    let tokens = tagger.tag(&caption)?;
    let words = keyword_tokens(&tokens)
        .iter()
        .flat_map(|token| token.split_whitespace())
        .map(str::to_string)
        .collect();
    let mut words = dedup_case_insensitive(words);
    words.truncate(max_words);

    Ok(sentence_case(&words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PipelineError, ProcessingStage};
    use crate::models::LexiconTagger;

    struct FixedCaption(&'static str);

    impl CaptionGenerator for FixedCaption {
        fn caption(&self, _image: &RgbImage, _params: &CaptionParams) -> CopyResult<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn title_for(caption: &'static str, max_words: usize) -> String {
        caption_title(
            &RgbImage::new(4, 4),
            &FixedCaption(caption),
            &LexiconTagger::new(),
            &CaptionParams::default(),
            max_words,
        )
        .unwrap()
    }

    #[test]
    fn test_keeps_first_two_keywords_in_sentence_case() {
        assert_eq!(title_for("a jar of honey on a wooden table", 2), "Jar honey");
        assert_eq!(title_for("a RED coffee mug", 2), "Red coffee");
    }

    #[test]
    fn test_word_limit_is_configurable() {
        assert_eq!(title_for("a jar of honey on a wooden table", 3), "Jar honey wooden");
        assert_eq!(title_for("a jar of honey on a wooden table", 1), "Jar");
    }

    #[test]
    fn test_duplicates_do_not_use_up_the_limit() {
        assert_eq!(title_for("mug mug MUG on a shelf", 2), "Mug shelf");
    }

    #[test]
    fn test_caption_without_keywords_is_empty() {
        assert_eq!(title_for("", 2), "");
        assert_eq!(title_for("it is on the", 2), "");
    }

    #[test]
    fn test_captioner_failure_propagates() {
        struct Broken;
        impl CaptionGenerator for Broken {
            fn caption(&self, _image: &RgbImage, _params: &CaptionParams) -> CopyResult<String> {
                Err(PipelineError::invocation(ProcessingStage::Captioning, "broken", "timeout"))
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let err = caption_title(
            &RgbImage::new(1, 1),
            &Broken,
            &LexiconTagger::new(),
            &CaptionParams::default(),
            2,
        )
        .unwrap_err();
        assert_eq!(err.stage(), Some(ProcessingStage::Captioning));
    }
}
