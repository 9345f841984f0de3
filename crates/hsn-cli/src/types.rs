use serde::Serialize;

use hsn_core::{Ancestor, CodeBook, CodeBookStats};
use hsn_model::{
    CodeError, HierarchyMode, ScorerKind, SuggestOptions, SuggestionMatch, ValidationResult,
    ValidationSummary,
};
use hsn_standards::TableSource;
use hsn_validate::Validator;

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub summary: ValidationSummary,
    pub results: Vec<ValidationResult>,
}

impl ValidateReport {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self {
            summary: ValidationSummary::from_results(&results),
            results,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestReport {
    pub query: String,
    pub limit: usize,
    pub min_confidence: u8,
    pub scorer: ScorerKind,
    pub matches: Vec<SuggestionMatch>,
}

impl SuggestReport {
    pub fn new(query: impl Into<String>, options: SuggestOptions, matches: Vec<SuggestionMatch>) -> Self {
        Self {
            query: query.into(),
            limit: options.limit,
            min_confidence: options.min_confidence,
            scorer: options.scorer,
            matches,
        }
    }
}

/// A single code with its full ancestry.
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub code: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CodeError>,
    pub ancestors: Vec<Ancestor>,
}

impl LookupReport {
    pub fn build(book: &CodeBook, code: &str) -> Self {
        let result = Validator::new(book)
            .with_hierarchy(HierarchyMode::Full)
            .validate(code);
        let ancestors = if result.valid {
            book.ancestors(code)
        } else {
            Vec::new()
        };
        Self {
            code: result.code,
            found: result.valid,
            description: result.description,
            error: result.error,
            ancestors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: CodeBookStats,
    pub source: Option<TableSource>,
}

impl StatsReport {
    pub fn build(book: &CodeBook) -> Self {
        Self {
            stats: book.stats(),
            source: book.source().cloned(),
        }
    }
}
