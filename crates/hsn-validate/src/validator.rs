//! Code validation against a [`CodeBook`].
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. format: non-empty, ASCII digits only
//! 2. length: 2 to 8 digits
//! 3. existence: the code is in the code index
//!
//! A valid code also gets its ancestors, according to [`HierarchyMode`].

use tracing::debug;

use hsn_core::CodeBook;
use hsn_model::{
    CodeError, HierarchyMode, HsnCode, ValidateOptions, ValidationResult, ValidationSummary,
};

#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    book: &'a CodeBook,
    options: ValidateOptions,
}

impl<'a> Validator<'a> {
    pub fn new(book: &'a CodeBook) -> Self {
        Self {
            book,
            options: ValidateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyMode) -> Self {
        self.options.hierarchy = hierarchy;
        self
    }

    pub fn options(&self) -> ValidateOptions {
        self.options
    }

    /// Validate one code exactly as given (no trimming).
    pub fn validate(&self, code: &str) -> ValidationResult {
        let result = match self.check(code) {
            Ok((parsed, description)) => {
                ValidationResult::valid(code, description, self.hierarchy(&parsed))
            }
            Err(error) => ValidationResult::invalid(code, error),
        };
        debug!(
            code,
            valid = result.valid,
            error = result.error.map(CodeError::kind),
            "validated code"
        );
        result
    }

    /// Validate each code independently, preserving input order and
    /// duplicates.
    pub fn validate_bulk<I, S>(&self, codes: I) -> Vec<ValidationResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let results: Vec<_> = codes
            .into_iter()
            .map(|code| self.validate(code.as_ref()))
            .collect();
        let summary = ValidationSummary::from_results(&results);
        debug!(
            total = summary.total,
            valid = summary.valid,
            invalid = summary.invalid,
            "validated codes"
        );
        results
    }

    fn check(&self, code: &str) -> Result<(HsnCode, &'a str), CodeError> {
        let parsed = HsnCode::parse(code)?;
        let description = self
            .book
            .codes()
            .get(parsed.as_str())
            .ok_or(CodeError::NotFound)?;
        Ok((parsed, description))
    }

    fn hierarchy(&self, code: &HsnCode) -> Vec<String> {
        match self.options.hierarchy {
            HierarchyMode::Placeholder => code.chapter().map(str::to_string).into_iter().collect(),
            HierarchyMode::Full => self
                .book
                .ancestors(code.as_str())
                .into_iter()
                .map(|ancestor| ancestor.code)
                .collect(),
        }
    }
}
