//! Constants used throughout the pipeline.

/// Default maximum caption length in tokens.
pub const DEFAULT_CAPTION_MAX_LENGTH: usize = 10;

/// Default beam width for captioning.
pub const DEFAULT_CAPTION_NUM_BEAMS: usize = 5;

/// Default repetition penalty for captioning.
pub const DEFAULT_CAPTION_REPETITION_PENALTY: f32 = 3.0;

/// Default n-gram size that may not repeat, shared by captioning and description sampling.
pub const DEFAULT_NO_REPEAT_NGRAM_SIZE: usize = 2;

/// Default nucleus sampling probability mass for descriptions.
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Default sampling temperature for descriptions.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default maximum description length in tokens.
pub const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 250;

/// Number of keywords kept from a caption.
pub const DEFAULT_MAX_CAPTION_WORDS: usize = 2;

/// Default timeout for calls to remote collaborators, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Prompt used to expand a title into a description. `{title}` is replaced verbatim.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = "You are a creative e-commerce copywriter. \
Write 4-5 short, engaging bullet points describing '{title}'. \
Include taste, texture, usage, packaging, and why customers will love it. \
Keep it unique and readable for an online store.";
