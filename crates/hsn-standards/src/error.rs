#![deny(unsafe_code)]

use std::path::PathBuf;

/// Fatal failures while loading the reference table.
///
/// Any of these prevents the code book from being built.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    #[error("missing required column {column:?} in {path} (found: {found})")]
    MissingColumn {
        path: PathBuf,
        column: String,
        found: String,
    },
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, err: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            line: err.position().map(csv::Position::line),
            message: err.to_string(),
        }
    }
}
