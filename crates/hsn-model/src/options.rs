//! Query options shared by the validator, the suggester and the CLI config.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of descriptions kept by the suggester.
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

/// Default confidence threshold. Matches must score strictly above it.
pub const DEFAULT_MIN_CONFIDENCE: u8 = 60;

/// How the validator reports ancestors of a valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyMode {
    /// Only the two-digit chapter, for codes longer than two digits.
    #[default]
    Placeholder,
    /// Every 2/4/6 digit prefix strictly shorter than the code.
    Full,
}

/// Similarity algorithm used to rank descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Best of plain, token-sort and token-set ratios.
    #[default]
    TokenSet,
    /// Jaro-Winkler on normalized text.
    JaroWinkler,
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenSet => f.write_str("token_set"),
            Self::JaroWinkler => f.write_str("jaro_winkler"),
        }
    }
}

/// Options for the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    #[serde(default)]
    pub hierarchy: HierarchyMode,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyMode) -> Self {
        self.hierarchy = hierarchy;
        self
    }
}

/// Options for the suggester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestOptions {
    /// Maximum number of descriptions considered, and of matches returned.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Matches must score strictly above this value.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,
    #[serde(default)]
    pub scorer: ScorerKind,
}

fn default_limit() -> usize {
    DEFAULT_SUGGEST_LIMIT
}

fn default_min_confidence() -> u8 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGEST_LIMIT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            scorer: ScorerKind::default(),
        }
    }
}

impl SuggestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: u8) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerKind) -> Self {
        self.scorer = scorer;
        self
    }
}
