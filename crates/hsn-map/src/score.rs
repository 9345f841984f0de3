//! Similarity scoring between a query and candidate descriptions.
//!
//! Scores are integers in `0..=100`. Both scorers work on text passed
//! through [`normalize_text`], so case and punctuation never matter.

use rapidfuzz::distance::jaro_winkler;
use rapidfuzz::fuzz;

use hsn_model::ScorerKind;

use crate::utils::{normalize_text, tokens};

/// Weight applied to the token-based ratios so that an exact character
/// match still outranks a pure token-set match.
const TOKEN_RATIO_WEIGHT: f64 = 0.95;

/// Scores a query against candidate strings.
///
/// Implementations must be deterministic: the same inputs always give the
/// same scores.
pub trait SimilarityScorer {
    /// Score one candidate in `0..=100`.
    fn score(&self, query: &str, candidate: &str) -> u8;

    /// Score every candidate, keeping candidate order.
    fn rank<'c>(&self, query: &str, candidates: &'c [String]) -> Vec<(&'c str, u8)> {
        candidates
            .iter()
            .map(|candidate| (candidate.as_str(), self.score(query, candidate)))
            .collect()
    }
}

/// Best of the plain ratio, the token-sort ratio and the token-set ratio.
///
/// The token-set ratio compares the shared tokens against each side's
/// remainder, so a query whose words all appear in a longer description
/// still scores high:
///
/// ```text
/// query       "breeding horse"
/// candidate   "pure bred breeding horses"
/// shared      "breeding"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetScorer;

impl TokenSetScorer {
    fn score_normalized(a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let base = ratio(a, b);
        let sorted = ratio(&sorted_tokens(a), &sorted_tokens(b));
        let set = token_set_ratio(a, b);
        base.max(sorted * TOKEN_RATIO_WEIGHT)
            .max(set * TOKEN_RATIO_WEIGHT)
    }
}

impl SimilarityScorer for TokenSetScorer {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        to_percent(Self::score_normalized(
            &normalize_text(query),
            &normalize_text(candidate),
        ))
    }

    fn rank<'c>(&self, query: &str, candidates: &'c [String]) -> Vec<(&'c str, u8)> {
        let query = normalize_text(query);
        candidates
            .iter()
            .map(|candidate| {
                let score = Self::score_normalized(&query, &normalize_text(candidate));
                (candidate.as_str(), to_percent(score))
            })
            .collect()
    }
}

/// Jaro-Winkler similarity on normalized text.
///
/// Favors shared leading characters; useful for short product names.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerScorer;

impl SimilarityScorer for JaroWinklerScorer {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        let query = normalize_text(query);
        let candidate = normalize_text(candidate);
        if query.is_empty() || candidate.is_empty() {
            return 0;
        }
        to_percent(jaro_winkler::similarity(query.chars(), candidate.chars()))
    }
}

/// Construct the scorer selected by configuration.
pub fn scorer_for(kind: ScorerKind) -> Box<dyn SimilarityScorer + Send + Sync> {
    match kind {
        ScorerKind::TokenSet => Box::new(TokenSetScorer),
        ScorerKind::JaroWinkler => Box::new(JaroWinklerScorer),
    }
}

/// Indel-based similarity in `0.0..=1.0`; empty input scores zero.
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    fuzz::ratio(a.chars(), b.chars())
}

fn sorted_tokens(normalized: &str) -> String {
    tokens(normalized).into_iter().collect::<Vec<_>>().join(" ")
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    let shared = join(tokens_a.intersection(&tokens_b).copied());
    let only_a = join(tokens_a.difference(&tokens_b).copied());
    let only_b = join(tokens_b.difference(&tokens_a).copied());

    let combined_a = join([shared.as_str(), only_a.as_str()].into_iter());
    let combined_b = join([shared.as_str(), only_b.as_str()].into_iter());

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}
