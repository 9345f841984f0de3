//! The loaded reference table as one immutable context.
//!
//! A [`CodeBook`] is built once at startup and then only read. It owns the
//! code index, the hierarchy index and the description catalog used by the
//! suggester. It is `Send + Sync`; share it by reference or wrap it in an
//! [`Arc`] ([`SharedCodeBook`]). Replacing the table means building a new
//! `CodeBook` and swapping the whole handle.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info_span;

use hsn_model::{CodeRecord, HIERARCHY_LEVELS};
use hsn_standards::{TableError, TableLoader, TableSource};

use crate::index::{BuildReport, CodeIndex, HierarchyIndex, IndexBuilder};

/// Reference-counted handle for sharing across threads.
pub type SharedCodeBook = Arc<CodeBook>;

/// One ancestor of a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ancestor {
    pub code: String,
    /// The ancestor's own description, when the prefix is itself a code.
    pub description: Option<String>,
}

/// Summary counts, used for health checks and the `stats` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBookStats {
    pub codes: usize,
    pub hierarchy_prefixes: usize,
    pub resolved_prefixes: usize,
    pub unresolved_prefixes: usize,
    pub distinct_descriptions: usize,
    pub sample_code: Option<String>,
    pub build: BuildReport,
}

#[derive(Debug, Default)]
pub struct CodeBook {
    codes: CodeIndex,
    hierarchy: HierarchyIndex,
    /// Distinct non-empty descriptions, in table order of first appearance.
    descriptions: Vec<String>,
    /// Description -> codes carrying it, ascending.
    codes_by_description: HashMap<String, Vec<String>>,
    report: BuildReport,
    source: Option<TableSource>,
}

impl CodeBook {
    /// Build from rows in table order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CodeRecord>,
    {
        let mut builder = IndexBuilder::new();
        builder.extend(records);
        let (codes, hierarchy, report) = builder.finish();

        let mut descriptions = Vec::new();
        let mut codes_by_description: HashMap<String, Vec<String>> = HashMap::new();
        for (code, description) in codes.iter_load_order() {
            if description.is_empty() {
                continue;
            }
            let bucket = codes_by_description
                .entry(description.to_string())
                .or_insert_with(|| {
                    descriptions.push(description.to_string());
                    Vec::new()
                });
            bucket.push(code.to_string());
        }
        for bucket in codes_by_description.values_mut() {
            bucket.sort_unstable();
        }

        Self {
            codes,
            hierarchy,
            descriptions,
            codes_by_description,
            report,
            source: None,
        }
    }

    /// Load rows through a table loader and build from them.
    pub fn from_loader<L: TableLoader + ?Sized>(loader: &L) -> Result<Self, TableError> {
        let span = info_span!("load_code_book");
        let _guard = span.enter();
        let table = loader.load()?;
        Ok(Self::from_records(table.records).with_source(table.source))
    }

    pub fn with_source(mut self, source: TableSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn into_shared(self) -> SharedCodeBook {
        Arc::new(self)
    }

    pub fn codes(&self) -> &CodeIndex {
        &self.codes
    }

    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    pub fn source(&self) -> Option<&TableSource> {
        self.source.as_ref()
    }

    pub fn build_report(&self) -> BuildReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Description of an exact code. The lookup key is trimmed.
    pub fn description(&self, code: &str) -> Option<&str> {
        self.codes.get(code.trim())
    }

    /// The record for an exact code, if present.
    pub fn get(&self, code: &str) -> Option<CodeRecord> {
        let code = code.trim();
        self.codes
            .get(code)
            .map(|description| CodeRecord::new(code, description))
    }

    /// Candidate descriptions for fuzzy matching.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Every code whose description equals `description`, ascending.
    pub fn codes_for_description(&self, description: &str) -> &[String] {
        self.codes_by_description
            .get(description)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All registered hierarchy prefixes strictly shorter than `code`,
    /// shortest first.
    pub fn ancestors(&self, code: &str) -> Vec<Ancestor> {
        let code = code.trim();
        HIERARCHY_LEVELS
            .iter()
            .copied()
            .filter(|&level| code.len() > level && code.is_char_boundary(level))
            .filter_map(|level| {
                let prefix = &code[..level];
                self.hierarchy.get(prefix).map(|description| Ancestor {
                    code: prefix.to_string(),
                    description: description.map(str::to_string),
                })
            })
            .collect()
    }

    pub fn stats(&self) -> CodeBookStats {
        let resolved = self.hierarchy.resolved_count();
        CodeBookStats {
            codes: self.codes.len(),
            hierarchy_prefixes: self.hierarchy.len(),
            resolved_prefixes: resolved,
            unresolved_prefixes: self.hierarchy.len() - resolved,
            distinct_descriptions: self.descriptions.len(),
            sample_code: self.codes.codes().next().map(str::to_string),
            build: self.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CodeBook {
        CodeBook::from_records(vec![
            CodeRecord::new("01", "Live animals"),
            CodeRecord::new("0101", "Live horses"),
            CodeRecord::new("010110", "Pure-bred breeding horses"),
            CodeRecord::new("01011010", "Pure-bred breeding horses"),
            CodeRecord::new("0102", ""),
        ])
    }

    #[test]
    fn descriptions_are_distinct_and_non_empty() {
        let book = sample();
        assert_eq!(
            book.descriptions(),
            &["Live animals", "Live horses", "Pure-bred breeding horses"]
        );
        assert_eq!(
            book.codes_for_description("Pure-bred breeding horses"),
            &["010110", "01011010"]
        );
        assert!(book.codes_for_description("Unknown").is_empty());
    }

    #[test]
    fn descriptions_follow_table_order() {
        let book = CodeBook::from_records(vec![
            CodeRecord::new("9999", "Zebra"),
            CodeRecord::new("8471", "Computers"),
            CodeRecord::new("0101", "Alpha"),
            CodeRecord::new("847130", "Computers"),
            CodeRecord::new("0102", "Computers"),
        ]);
        assert_eq!(book.descriptions(), &["Zebra", "Computers", "Alpha"]);
        assert_eq!(
            book.codes_for_description("Computers"),
            &["0102", "8471", "847130"]
        );
    }

    #[test]
    fn empty_description_codes_still_resolve() {
        let book = sample();
        assert!(book.contains("0102"));
        assert_eq!(book.description("0102"), Some(""));
    }

    #[test]
    fn ancestors_use_hierarchy_index() {
        let book = sample();
        let ancestors = book.ancestors("01011010");
        let codes: Vec<_> = ancestors.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["01", "0101", "010110"]);
        assert_eq!(
            ancestors[2].description.as_deref(),
            Some("Pure-bred breeding horses")
        );
        assert!(book.ancestors("01").is_empty());
    }

    #[test]
    fn get_returns_record() {
        let book = sample();
        assert_eq!(
            book.get(" 0101 "),
            Some(CodeRecord::new("0101", "Live horses"))
        );
        assert_eq!(book.get("99"), None);
    }

    #[test]
    fn stats_summarize_indexes() {
        let stats = sample().stats();
        assert_eq!(stats.codes, 5);
        assert_eq!(stats.hierarchy_prefixes, 3);
        assert_eq!(stats.resolved_prefixes, 3);
        assert_eq!(stats.unresolved_prefixes, 0);
        assert_eq!(stats.distinct_descriptions, 3);
        assert_eq!(stats.sample_code.as_deref(), Some("01"));
    }

    #[test]
    fn code_book_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeBook>();
        assert_send_sync::<SharedCodeBook>();
    }
}
