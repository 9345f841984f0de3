//! Index construction from reference rows.
//!
//! Two structures come out of a build:
//!
//! - [`CodeIndex`]: code -> description, one entry per structurally valid
//!   code. Duplicate codes keep the description of the **last** row but the
//!   position of the **first**.
//! - [`HierarchyIndex`]: 2/4/6 digit prefix -> the prefix's own description
//!   when the prefix is itself a code, `None` otherwise.
//!
//! ```text
//! rows:       01 "Live animals", 0101 "Live horses", 010110 "Pure-bred ..."
//! hierarchy:  01 -> Some("Live animals"), 0101 -> Some("Live horses")
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;
use tracing::{debug, info};

use hsn_model::{CodeRecord, HsnCode, ModelError};

/// Code -> description lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeIndex {
    codes: BTreeMap<String, String>,
    /// Codes in the order they first appeared in the table.
    load_order: Vec<String>,
}

impl CodeIndex {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(c, d)| (c.as_str(), d.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    /// Entries in table order.
    pub fn iter_load_order(&self) -> impl Iterator<Item = (&str, &str)> {
        self.load_order.iter().filter_map(|code| {
            self.codes
                .get(code)
                .map(|description| (code.as_str(), description.as_str()))
        })
    }
}

/// Prefix -> optional description of the prefix code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyIndex {
    prefixes: BTreeMap<String, Option<String>>,
}

impl HierarchyIndex {
    /// Derive the hierarchy from a finished code index.
    ///
    /// An entry is only created when none exists, so a resolved prefix is
    /// never replaced by an unresolved one.
    pub fn from_codes(codes: &CodeIndex) -> Self {
        let mut prefixes = BTreeMap::new();
        for (code, _) in codes.iter() {
            let Ok(code) = HsnCode::parse(code) else {
                continue;
            };
            for prefix in code.ancestor_prefixes() {
                if let Entry::Vacant(slot) = prefixes.entry(prefix.to_string()) {
                    slot.insert(codes.get(prefix).map(str::to_string));
                }
            }
        }
        Self { prefixes }
    }

    /// `None` when the prefix is not in the hierarchy; `Some(None)` when it
    /// is but has no record of its own.
    pub fn get(&self, prefix: &str) -> Option<Option<&str>> {
        self.prefixes.get(prefix).map(Option::as_deref)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.prefixes.values().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.prefixes
            .iter()
            .map(|(p, d)| (p.as_str(), d.as_deref()))
    }
}

/// Counts gathered while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Rows offered to the builder.
    pub rows: usize,
    /// Rows dropped for a blank or malformed code.
    pub dropped: usize,
    /// Rows that replaced an earlier row with the same code.
    pub duplicates: usize,
}

/// Incremental index builder.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    codes: BTreeMap<String, String>,
    load_order: Vec<String>,
    report: BuildReport,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row. The code is trimmed; blank or malformed codes are
    /// rejected and counted as dropped.
    pub fn push(&mut self, record: CodeRecord) -> Result<(), ModelError> {
        self.report.rows += 1;
        let code = record.code.trim();
        if code.is_empty() {
            self.report.dropped += 1;
            return Err(ModelError::EmptyCode);
        }
        let code = match HsnCode::parse(code) {
            Ok(code) => code,
            Err(source) => {
                self.report.dropped += 1;
                return Err(ModelError::InvalidCode {
                    code: code.to_string(),
                    source,
                });
            }
        };
        match self.codes.insert(code.to_string(), record.description) {
            Some(previous) => {
                self.report.duplicates += 1;
                debug!(code = %code, replaced = %previous, "duplicate code, keeping last row");
            }
            None => self.load_order.push(code.into()),
        }
        Ok(())
    }

    /// Add many rows, logging and skipping the ones that are rejected.
    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = CodeRecord>,
    {
        for record in records {
            if let Err(error) = self.push(record) {
                debug!(%error, "dropped reference row");
            }
        }
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    pub fn finish(self) -> (CodeIndex, HierarchyIndex, BuildReport) {
        let codes = CodeIndex {
            codes: self.codes,
            load_order: self.load_order,
        };
        let hierarchy = HierarchyIndex::from_codes(&codes);
        info!(
            rows = self.report.rows,
            codes = codes.len(),
            prefixes = hierarchy.len(),
            dropped = self.report.dropped,
            duplicates = self.report.duplicates,
            "built code index"
        );
        (codes, hierarchy, self.report)
    }
}

/// Build both indexes from rows in one call.
pub fn build<I>(rows: I) -> (CodeIndex, HierarchyIndex)
where
    I: IntoIterator<Item = CodeRecord>,
{
    let mut builder = IndexBuilder::new();
    builder.extend(rows);
    let (codes, hierarchy, _) = builder.finish();
    (codes, hierarchy)
}
