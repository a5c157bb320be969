//! A rule-based part-of-speech tagger.
//!
//! Tokens are runs of alphanumeric characters (with inner apostrophes); every other
//! non-whitespace character becomes its own punctuation token. Roles are assigned in this order:
//!
//! 1. caller-supplied entries,
//! 2. tokens with digits, punctuation and single characters are [`PosRole::Other`],
//! 3. closed-class words (determiners, prepositions, auxiliaries, ...) are [`PosRole::Other`],
//! 4. the adjective lexicon,
//! 5. known nouns that look like adjectives,
//! 6. `-ly` words are adverbs ([`PosRole::Other`]),
//! 7. adjective suffixes (`-ous`, `-ive`, `-ed`, consonant + `-y`, ...),
//! 8. everything else is a noun, or a proper noun when it starts with an uppercase letter.

use super::lexicon::{ADJECTIVE_SUFFIXES, ADJECTIVES, CLOSED_CLASS, NOUN_EXCEPTIONS};
use crate::core::errors::CopyResult;
use crate::core::traits::PosTagger;
use crate::domain::{PosRole, TaggedToken};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

static CLOSED_CLASS_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CLOSED_CLASS.iter().copied().collect());
static ADJECTIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ADJECTIVES.iter().copied().collect());
static NOUN_EXCEPTION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NOUN_EXCEPTIONS.iter().copied().collect());

/// In-process [`PosTagger`] driven by word lists and suffix rules.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, PosRole>,
}

impl LexiconTagger {
    /// Creates a tagger with the built-in lexicon only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry that overrides every built-in rule. Matching is case-insensitive.
    pub fn with_entry(mut self, word: impl AsRef<str>, role: PosRole) -> Self {
        self.entries.insert(word.as_ref().to_lowercase(), role);
        self
    }

    /// Adds several overriding entries.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PosRole)>,
        S: AsRef<str>,
    {
        for (word, role) in entries {
            self.entries.insert(word.as_ref().to_lowercase(), role);
        }
        self
    }

    /// Assigns a role to a single token.
    pub fn classify(&self, token: &str) -> PosRole {
        let lower = token.to_lowercase();

        if let Some(role) = self.entries.get(&lower) {
            return *role;
        }

        if token.chars().count() < 2
            || token.chars().any(|c| c.is_numeric())
            || !token.chars().any(char::is_alphabetic)
        {
            return PosRole::Other;
        }

        if CLOSED_CLASS_SET.contains(lower.as_str()) {
            return PosRole::Other;
        }

        if ADJECTIVE_SET.contains(lower.as_str()) {
            return PosRole::Adjective;
        }

        if NOUN_EXCEPTION_SET.contains(lower.as_str()) {
            return noun_role(token);
        }

        if lower.len() > 4 && lower.ends_with("ly") {
            return PosRole::Other;
        }

        if has_adjective_suffix(&lower) {
            return PosRole::Adjective;
        }

        noun_role(token)
    }
}

fn noun_role(token: &str) -> PosRole {
    if token.chars().next().is_some_and(char::is_uppercase) {
        PosRole::ProperNoun
    } else {
        PosRole::Noun
    }
}

fn has_adjective_suffix(lower: &str) -> bool {
    let len = lower.chars().count();
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|(suffix, min_len)| len >= *min_len && lower.ends_with(suffix))
    {
        // "-eed" words (seed, speed, ...) are not participles.
        return !lower.ends_with("eed");
    }

    // crunchy, salty, creamy: consonant followed by a final "y".
    let mut tail = lower.chars().rev();
    match (tail.next(), tail.next()) {
        (Some('y'), Some(before)) => len >= 5 && !"aeiouy".contains(before),
        _ => false,
    }
}

/// Splits text into word and punctuation tokens, preserving source order.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let inner_apostrophe = c == '\''
            && word_start.is_some()
            && chars.peek().is_some_and(|(_, next)| next.is_alphanumeric());

        if c.is_alphanumeric() || inner_apostrophe {
            if word_start.is_none() {
                word_start = Some(idx);
            }
            continue;
        }

        if let Some(start) = word_start.take() {
            tokens.push(&text[start..idx]);
        }
        if !c.is_whitespace() {
            tokens.push(&text[idx..idx + c.len_utf8()]);
        }
    }

    if let Some(start) = word_start {
        tokens.push(&text[start..]);
    }
    tokens
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> CopyResult<Vec<TaggedToken>> {
        Ok(tokenize(text)
            .into_iter()
            .map(|token| TaggedToken::new(token, self.classify(token)))
            .collect())
    }

    fn name(&self) -> &str {
        "LexiconTagger"
    }
}
