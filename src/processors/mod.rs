//! Text processors used by the title stages.

pub mod text;

pub use text::{dedup_case_insensitive, keyword_tokens, normalize_text, sentence_case, title_case};
