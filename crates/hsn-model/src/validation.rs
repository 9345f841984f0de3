//! Validation outcomes.
//!
//! Every call to the validator produces a fresh [`ValidationResult`]. Failed
//! checks are carried as values in `error`, never as `Err`.

use serde::{Deserialize, Serialize};

use crate::code::CodeError;

/// Outcome of validating a single code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// The code exactly as it was submitted.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CodeError>,
    /// Ancestor codes, shortest first.
    #[serde(default)]
    pub hierarchy: Vec<String>,
}

impl ValidationResult {
    pub fn valid(
        code: impl Into<String>,
        description: impl Into<String>,
        hierarchy: Vec<String>,
    ) -> Self {
        Self {
            valid: true,
            code: code.into(),
            description: Some(description.into()),
            error: None,
            hierarchy,
        }
    }

    pub fn invalid(code: impl Into<String>, error: CodeError) -> Self {
        Self {
            valid: false,
            code: code.into(),
            description: None,
            error: Some(error),
            hierarchy: Vec::new(),
        }
    }

    /// User-facing error text, if the code failed a check.
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

/// Aggregate counts over a bulk validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let valid = results.iter().filter(|r| r.valid).count();
        Self {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
        }
    }

    pub fn has_invalid(&self) -> bool {
        self.invalid > 0
    }
}
