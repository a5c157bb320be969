//! Built-in model implementations.
//!
//! Currently this is the [`LexiconTagger`], an in-process part-of-speech tagger. Every other
//! capability is reached through [`crate::domain::adapters`].

mod lexicon;
pub mod lexicon_tagger;

pub use lexicon_tagger::LexiconTagger;
