//! JSON encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("non-finite float {0} has no JSON representation")]
    NonFiniteFloat(f64),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
