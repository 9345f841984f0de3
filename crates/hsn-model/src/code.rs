//! HSN code identifiers and their structural rules.
//!
//! An HSN code is a string of 2 to 8 ASCII digits. Its ancestors are the
//! 2, 4 and 6 digit prefixes that are strictly shorter than the code:
//!
//! ```text
//! 01        chapter
//! 0101      heading      -> ancestor 01
//! 010110    sub-heading  -> ancestors 01, 0101
//! 01011010  tariff item  -> ancestors 01, 0101, 010110
//! ```

use std::fmt;

use thiserror::Error;

/// Shortest permitted code length.
pub const MIN_CODE_LEN: usize = 2;

/// Longest permitted code length.
pub const MAX_CODE_LEN: usize = 8;

/// Prefix lengths that form the classification hierarchy.
pub const HIERARCHY_LEVELS: [usize; 3] = [2, 4, 6];

/// Reasons a code fails structural or existence checks.
///
/// The `Display` text is the user-facing message carried in
/// validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum CodeError {
    #[error("HSN code must contain only digits")]
    Format,
    #[error("HSN code must be 2-8 digits long")]
    Length,
    #[error("HSN code not found in database")]
    NotFound,
}

impl CodeError {
    /// Stable machine-readable identifier.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Length => "length",
            Self::NotFound => "not_found",
        }
    }

    /// Inverse of the `Display` message.
    pub fn from_message(message: &str) -> Option<Self> {
        [Self::Format, Self::Length, Self::NotFound]
            .into_iter()
            .find(|e| e.to_string() == message)
    }
}

impl serde::Serialize for CodeError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CodeError {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_message(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown HSN code error: {s}")))
    }
}

/// Check the structure of a raw code without looking it up.
///
/// The input is not trimmed: surrounding whitespace is a format error.
pub fn check_structure(raw: &str) -> Result<(), CodeError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodeError::Format);
    }
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&raw.len()) {
        return Err(CodeError::Length);
    }
    Ok(())
}

/// A structurally valid HSN code.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct HsnCode(String);

impl HsnCode {
    /// Parse a code, rejecting anything that is not 2-8 ASCII digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, CodeError> {
        let value = value.into();
        check_structure(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Two-digit chapter prefix, if this code is longer than a chapter.
    pub fn chapter(&self) -> Option<&str> {
        (self.0.len() > MIN_CODE_LEN).then(|| &self.0[..MIN_CODE_LEN])
    }

    /// Hierarchy prefixes strictly shorter than this code, shortest first.
    pub fn ancestor_prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        HIERARCHY_LEVELS
            .iter()
            .copied()
            .filter(|&level| self.0.len() > level)
            .map(|level| &self.0[..level])
    }
}

impl TryFrom<String> for HsnCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<HsnCode> for String {
    fn from(code: HsnCode) -> Self {
        code.0
    }
}

impl AsRef<str> for HsnCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HsnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
