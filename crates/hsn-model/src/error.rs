use thiserror::Error;

use crate::code::CodeError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid HSN code {code:?}: {source}")]
    InvalidCode {
        code: String,
        #[source]
        source: CodeError,
    },
    #[error("empty HSN code")]
    EmptyCode,
}

pub type Result<T> = std::result::Result<T, ModelError>;
