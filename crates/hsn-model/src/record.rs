use serde::{Deserialize, Serialize};

/// One row of the reference table after loading.
///
/// The code is stored as loaded (trimmed); structural checks happen when
/// the index is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub code: String,
    pub description: String,
}

impl CodeRecord {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

impl<C, D> From<(C, D)> for CodeRecord
where
    C: Into<String>,
    D: Into<String>,
{
    fn from((code, description): (C, D)) -> Self {
        Self::new(code, description)
    }
}
