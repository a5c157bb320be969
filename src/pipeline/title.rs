//! Title extraction from recognized text.

use crate::core::errors::CopyResult;
use crate::core::traits::PosTagger;
use crate::processors::{dedup_case_insensitive, keyword_tokens, normalize_text, title_case};

/// Builds a title from the concatenated text of every detection.
///
/// The text is normalized to ASCII letters, digits and single spaces, tagged, filtered down to
/// nouns, proper nouns and adjectives, deduplicated case-insensitively (first occurrence wins)
/// and title-cased. When no keyword survives the title is the empty string.
pub fn extract_title(raw_text: &str, tagger: &dyn PosTagger) -> CopyResult<String> {
    let normalized = normalize_text(raw_text);
    if normalized.is_empty() {
        tracing::debug!(target: "pipeline", "recognized text is empty after normalization");
        return Ok(String::new());
    }

    let tokens = tagger.tag(&normalized)?;
    // Re-normalize each keyword so a tagger that returns decorated tokens cannot break the
    // letters/digits/single-space shape of the title.
    let keywords = keyword_tokens(&tokens)
        .iter()
        .flat_map(|token| {
            normalize_text(token)
                .split(' ')
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    let keywords = dedup_case_insensitive(keywords);

    tracing::debug!(
        target: "pipeline",
        tagger = tagger.name(),
        tokens = tokens.len(),
        keywords = keywords.len(),
        "extracted title keywords"
    );
    Ok(title_case(&keywords.join(" ")))
}
