//! Part-of-speech tagged tokens.

use serde::{Deserialize, Serialize};

/// Grammatical role assigned to a token by a [`PosTagger`](crate::core::PosTagger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosRole {
    Noun,
    ProperNoun,
    Adjective,
    Other,
}

impl PosRole {
    /// Whether tokens with this role are kept as title keywords.
    pub fn is_keyword(self) -> bool {
        matches!(self, PosRole::Noun | PosRole::ProperNoun | PosRole::Adjective)
    }
}

/// A token and its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub role: PosRole,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, role: PosRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}
