//! Text normalization, keyword filtering and casing helpers.
//!
//! These are the pure transformations shared by the recognized-text and caption title stages.

use crate::domain::TaggedToken;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Replaces every character outside `[A-Za-z0-9\s]` with a space, collapses whitespace runs to
/// one space and trims both ends.
///
/// The result contains only ASCII letters, digits and single interior spaces.
///
/// ```
/// use prodscribe::processors::normalize_text;
///
/// assert_eq!(normalize_text("  Crunchy\tPeanut-Butter!! 500g "), "Crunchy Peanut Butter 500g");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let stripped = NON_ALPHANUMERIC.replace_all(raw, " ");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Keeps the text of nouns, proper nouns and adjectives, in source order.
pub fn keyword_tokens(tokens: &[TaggedToken]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.role.is_keyword())
        .map(|token| token.text.clone())
        .collect()
}

/// Removes case-insensitive duplicates. The first occurrence and its casing win.
pub fn dedup_case_insensitive(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(words.len());
    words
        .into_iter()
        .filter(|word| seen.insert(word.to_lowercase()))
        .collect()
}

/// Uppercases every letter that follows a non-letter and lowercases every other letter.
///
/// Digits count as word breaks, so `"500g"` becomes `"500G"` and `"3in1"` becomes `"3In1"`.
pub fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if after_letter {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    titled
}

/// Capitalizes the first letter of the string and lowercases the rest.
pub fn sentence_case(text: &str) -> String {
    capitalize_first(text)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PosRole;

    #[test]
    fn test_normalize_strips_symbols_and_collapses_whitespace() {
        assert_eq!(normalize_text("NET WT. 16 OZ (454g)"), "NET WT 16 OZ 454g");
        assert_eq!(normalize_text("\n\n  "), "");
        assert_eq!(normalize_text("café crème"), "caf cr me");
        assert_eq!(normalize_text("a\u{a0}b"), "a b");
    }

    #[test]
    fn test_keyword_tokens_keep_only_open_class_roles() {
        let tokens = vec![
            TaggedToken::new("Crunchy", PosRole::Adjective),
            TaggedToken::new("Peanut", PosRole::ProperNoun),
            TaggedToken::new("with", PosRole::Other),
            TaggedToken::new("Butter", PosRole::Noun),
            TaggedToken::new("500g", PosRole::Other),
        ];
        assert_eq!(keyword_tokens(&tokens), vec!["Crunchy", "Peanut", "Butter"]);
    }

    #[test]
    fn test_dedup_keeps_first_casing() {
        let words = vec!["Box".to_string(), "box".to_string(), "BOX".to_string(), "Tea".to_string()];
        assert_eq!(dedup_case_insensitive(words), vec!["Box", "Tea"]);
    }

    #[test]
    fn test_title_case_ignores_original_casing() {
        assert_eq!(title_case("PEANUT butter"), "Peanut Butter");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_restarts_after_digits() {
        assert_eq!(title_case("500g oats"), "500G Oats");
        assert_eq!(title_case("3in1 COFFEE"), "3In1 Coffee");
        assert_eq!(title_case("x2 pack"), "X2 Pack");
        assert_eq!(title_case("12 34"), "12 34");
    }

    #[test]
    fn test_sentence_case_only_capitalizes_first_letter() {
        assert_eq!(sentence_case("coffee MUG"), "Coffee mug");
        assert_eq!(sentence_case(""), "");
    }
}
