#![deny(unsafe_code)]

mod engine;
mod score;
mod utils;

pub use engine::{ConfidenceLevel, Suggester};
pub use score::{JaroWinklerScorer, SimilarityScorer, TokenSetScorer, scorer_for};
pub use utils::{normalize_text, tokens};
