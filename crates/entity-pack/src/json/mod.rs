//! JSON codec.

pub mod binary;
mod error;

pub use binary::{parse_binary, stringify_binary, wrap_binary, BIN_URI_START};
pub use error::JsonError;

use crate::PackValue;

/// Encode `value` as compact JSON text.
pub fn encode(value: &PackValue) -> Result<Vec<u8>, JsonError> {
    let tree = wrap_binary(value)?;
    Ok(serde_json::to_vec(&tree)?)
}

/// Decode JSON text. Strings stay strings, including data URIs; typed
/// readers turn those into bytes where a bytes field expects them.
pub fn decode(bytes: &[u8]) -> Result<PackValue, JsonError> {
    let tree: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(PackValue::from(tree))
}
