use serde::{Deserialize, Serialize};

/// A candidate code for a free-text product description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionMatch {
    pub code: String,
    pub description: String,
    /// Similarity score in `0..=100`. Not a probability.
    pub confidence: u8,
}

impl SuggestionMatch {
    pub fn new(code: impl Into<String>, description: impl Into<String>, confidence: u8) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            confidence,
        }
    }
}
