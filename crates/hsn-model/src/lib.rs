#![deny(unsafe_code)]

pub mod code;
pub mod error;
pub mod options;
pub mod record;
pub mod suggestion;
pub mod validation;

pub use code::{CodeError, HIERARCHY_LEVELS, HsnCode, MAX_CODE_LEN, MIN_CODE_LEN, check_structure};
pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_MIN_CONFIDENCE, DEFAULT_SUGGEST_LIMIT, HierarchyMode, ScorerKind, SuggestOptions,
    ValidateOptions,
};
pub use record::CodeRecord;
pub use suggestion::SuggestionMatch;
pub use validation::{ValidationResult, ValidationSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let results = vec![
            ValidationResult::valid("0101", "Live horses", vec!["01".to_string()]),
            ValidationResult::invalid("12A4", CodeError::Format),
            ValidationResult::invalid("99", CodeError::NotFound),
        ];
        let summary = ValidationSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.invalid, 2);
        assert!(summary.has_invalid());
    }

    #[test]
    fn invalid_result_serializes_error_message() {
        let result = ValidationResult::invalid("1", CodeError::Length);
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(json["valid"], false);
        assert_eq!(json["error"], "HSN code must be 2-8 digits long");
        assert!(json.get("description").is_none());

        let round: ValidationResult = serde_json::from_value(json).expect("deserialize result");
        assert_eq!(round, result);
    }

    #[test]
    fn options_defaults() {
        let options = SuggestOptions::default();
        assert_eq!(options.limit, 5);
        assert_eq!(options.min_confidence, 60);
        assert_eq!(options.scorer, ScorerKind::TokenSet);
        assert_eq!(ValidateOptions::default().hierarchy, HierarchyMode::Placeholder);
    }

    #[test]
    fn hsn_code_serde_rejects_bad_codes() {
        let code: HsnCode = serde_json::from_str("\"0101\"").expect("valid code");
        assert_eq!(code.as_str(), "0101");
        assert!(serde_json::from_str::<HsnCode>("\"01A1\"").is_err());
    }
}
