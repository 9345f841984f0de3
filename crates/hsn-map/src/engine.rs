//! Suggestion engine.
//!
//! For a free-text query the engine scores every distinct description in
//! the code book, keeps the `limit` best (stable, so equal scores keep
//! catalog order), drops anything at or below the confidence threshold,
//! and fans each surviving description out to all codes that carry it.

use std::cmp::Reverse;
use std::fmt;

use tracing::debug;

use hsn_core::CodeBook;
use hsn_model::{SuggestOptions, SuggestionMatch};

use crate::score::{SimilarityScorer, scorer_for};

/// Coarse bucket for a suggestion's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Above the threshold but below 80.
    Low,
    /// 80 to 94.
    Medium,
    /// 95 and above.
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            95.. => Self::High,
            80..=94 => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Medium => f.write_str("medium"),
            Self::Low => f.write_str("low"),
        }
    }
}

pub struct Suggester<'a> {
    book: &'a CodeBook,
    scorer: Box<dyn SimilarityScorer + Send + Sync>,
    options: SuggestOptions,
}

impl<'a> Suggester<'a> {
    pub fn new(book: &'a CodeBook) -> Self {
        let options = SuggestOptions::default();
        Self {
            book,
            scorer: scorer_for(options.scorer),
            options,
        }
    }

    /// Apply options, including the scorer they select.
    pub fn with_options(mut self, options: SuggestOptions) -> Self {
        self.scorer = scorer_for(options.scorer);
        self.options = options;
        self
    }

    /// Replace the scorer with a custom implementation.
    pub fn with_scorer<S>(mut self, scorer: S) -> Self
    where
        S: SimilarityScorer + Send + Sync + 'static,
    {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn options(&self) -> SuggestOptions {
        self.options
    }

    /// Suggest codes using the configured limit.
    pub fn suggest(&self, query: &str) -> Vec<SuggestionMatch> {
        self.suggest_with_limit(query, self.options.limit)
    }

    pub fn suggest_with_limit(&self, query: &str, limit: usize) -> Vec<SuggestionMatch> {
        if query.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut ranked = self.scorer.rank(query, self.book.descriptions());
        ranked.sort_by_key(|&(_, score)| Reverse(score));
        ranked.truncate(limit);

        let mut matches = Vec::new();
        for (description, score) in ranked {
            if score <= self.options.min_confidence {
                continue;
            }
            for code in self.book.codes_for_description(description) {
                matches.push(SuggestionMatch::new(code.as_str(), description, score));
            }
        }
        matches.truncate(limit);

        debug!(
            query,
            limit,
            candidates = self.book.descriptions().len(),
            matches = matches.len(),
            top = matches.first().map(|m| m.confidence),
            "suggested codes"
        );
        matches
    }
}

impl fmt::Debug for Suggester<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suggester")
            .field("codes", &self.book.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use hsn_model::{CodeRecord, ScorerKind};

    use super::*;

    fn book() -> CodeBook {
        CodeBook::from_records(vec![
            CodeRecord::new("01", "Live animals"),
            CodeRecord::new("0101", "Live horses"),
            CodeRecord::new("010110", "Pure-bred breeding horses"),
        ])
    }

    /// Scores candidates by a fixed table, for exercising ordering rules.
    struct FixedScorer(Vec<(&'static str, u8)>);

    impl SimilarityScorer for FixedScorer {
        fn score(&self, _query: &str, candidate: &str) -> u8 {
            self.0
                .iter()
                .find(|(c, _)| *c == candidate)
                .map_or(0, |&(_, s)| s)
        }
    }

    #[test]
    fn breeding_horse_suggests_pure_bred() {
        let book = book();
        let matches = Suggester::new(&book).suggest("breeding horse");
        let top = matches.first().expect("at least one match");
        assert_eq!(top.code, "010110");
        assert_eq!(top.description, "Pure-bred breeding horses");
        assert!(top.confidence >= 61);
    }

    #[test]
    fn blank_queries_return_nothing() {
        let book = book();
        let suggester = Suggester::new(&book);
        assert!(suggester.suggest("").is_empty());
        assert!(suggester.suggest("  \t ").is_empty());
        assert!(suggester.suggest_with_limit("horses", 0).is_empty());
    }

    #[test]
    fn threshold_is_strict() {
        let book = book();
        let suggester = Suggester::new(&book).with_scorer(FixedScorer(vec![
            ("Live animals", 60),
            ("Live horses", 61),
        ]));
        let matches = suggester.suggest("anything");
        assert_eq!(matches, vec![SuggestionMatch::new("0101", "Live horses", 61)]);
    }

    #[test]
    fn limit_applies_before_threshold() {
        let book = book();
        // Only the top description survives the limit, and it is below the
        // threshold, so nothing is returned even though others would pass.
        let suggester = Suggester::new(&book).with_scorer(FixedScorer(vec![
            ("Live animals", 50),
            ("Live horses", 40),
        ]));
        assert!(suggester.suggest_with_limit("x", 1).is_empty());
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let book = book();
        let suggester = Suggester::new(&book).with_scorer(FixedScorer(vec![
            ("Live animals", 70),
            ("Live horses", 90),
            ("Pure-bred breeding horses", 70),
        ]));
        let codes: Vec<_> = suggester
            .suggest("x")
            .into_iter()
            .map(|m| m.code)
            .collect();
        assert_eq!(codes, vec!["0101", "01", "010110"]);
    }

    #[test]
    fn equal_scores_follow_table_row_order() {
        let book = CodeBook::from_records(vec![
            CodeRecord::new("9999", "Zebra"),
            CodeRecord::new("0101", "Alpha"),
        ]);
        let suggester =
            Suggester::new(&book).with_scorer(FixedScorer(vec![("Zebra", 80), ("Alpha", 80)]));
        let codes: Vec<_> = suggester
            .suggest("x")
            .into_iter()
            .map(|m| m.code)
            .collect();
        assert_eq!(codes, vec!["9999", "0101"]);
    }

    #[test]
    fn duplicate_descriptions_fan_out_by_code() {
        let book = CodeBook::from_records(vec![
            CodeRecord::new("8471", "Computers"),
            CodeRecord::new("847130", "Computers"),
            CodeRecord::new("0101", "Live horses"),
        ]);
        let matches = Suggester::new(&book).suggest("computers");
        assert_eq!(
            matches,
            vec![
                SuggestionMatch::new("8471", "Computers", 100),
                SuggestionMatch::new("847130", "Computers", 100),
            ]
        );
    }

    #[test]
    fn fan_out_never_exceeds_limit() {
        let book = CodeBook::from_records(vec![
            CodeRecord::new("8471", "Computers"),
            CodeRecord::new("847130", "Computers"),
            CodeRecord::new("847141", "Computers"),
        ]);
        let matches = Suggester::new(&book).suggest_with_limit("computers", 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].code, "847130");
    }

    #[test]
    fn options_select_scorer() {
        let book = book();
        let suggester = Suggester::new(&book).with_options(
            SuggestOptions::default()
                .with_scorer(ScorerKind::JaroWinkler)
                .with_limit(2),
        );
        assert_eq!(suggester.options().limit, 2);
        let matches = suggester.suggest("live horses");
        assert_eq!(matches[0].code, "0101");
        assert_eq!(matches[0].confidence, 100);
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(ConfidenceLevel::from_confidence(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(95), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(80), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(61), ConfidenceLevel::Low);
    }
}
