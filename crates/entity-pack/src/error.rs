//! Packing boundary errors.

use thiserror::Error;

use crate::codecs::CodecError;
use crate::{ContentType, ValueKind};

#[derive(Debug, Error)]
pub enum PackError {
    /// The format cannot carry this payload at all.
    #[error("{0}")]
    Content(String),
    #[error("cannot unpack {description}: {source}")]
    Unpack {
        description: String,
        #[source]
        source: CodecError,
    },
    #[error("{0}")]
    ContentTypeNotAllowed(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl PackError {
    pub(crate) fn unsupported(kind: ValueKind, format: ContentType) -> Self {
        PackError::Content(format!("{kind} cannot be {format}"))
    }

    pub(crate) fn not_allowed(format: ContentType, allowed: &[ContentType]) -> Self {
        let allowed: Vec<&str> = allowed.iter().map(|ct| ct.name()).collect();
        PackError::ContentTypeNotAllowed(format!(
            "content type {format} is not allowed here (accepted: [{}])",
            allowed.join(", ")
        ))
    }
}
