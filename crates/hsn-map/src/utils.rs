//! Text normalization for fuzzy matching.

use std::collections::BTreeSet;

/// Lowercases, turns every non-alphanumeric character into a space and
/// collapses runs of whitespace.
///
/// `"Pure-bred  Breeding, horses"` becomes `"pure bred breeding horses"`.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct tokens of already normalized text, sorted.
pub fn tokens(normalized: &str) -> BTreeSet<&str> {
    normalized.split_whitespace().collect()
}
