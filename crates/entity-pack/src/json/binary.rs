//! Binary payloads embedded in JSON as data URI strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Number, Value as JsonValue};

use super::error::JsonError;
use crate::PackValue;

/// Binary data URI prefix: `data:application/octet-stream;base64,`
pub const BIN_URI_START: &str = "data:application/octet-stream;base64,";

/// Data URI for `bytes`.
pub fn stringify_binary(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(BIN_URI_START.len() + bytes.len() * 4 / 3 + 4);
    out.push_str(BIN_URI_START);
    STANDARD.encode_string(bytes, &mut out);
    out
}

/// Converts to a JSON tree, writing `Bytes` as data URI strings.
pub fn wrap_binary(value: &PackValue) -> Result<JsonValue, JsonError> {
    Ok(match value {
        PackValue::Null => JsonValue::Null,
        PackValue::Bool(b) => JsonValue::Bool(*b),
        PackValue::Integer(i) => JsonValue::Number((*i).into()),
        PackValue::UInteger(u) => JsonValue::Number((*u).into()),
        PackValue::Float(f) => {
            JsonValue::Number(Number::from_f64(*f).ok_or(JsonError::NonFiniteFloat(*f))?)
        }
        PackValue::Str(s) => JsonValue::String(s.clone()),
        PackValue::Bytes(b) => JsonValue::String(stringify_binary(b)),
        PackValue::Array(arr) => {
            JsonValue::Array(arr.iter().map(wrap_binary).collect::<Result<_, _>>()?)
        }
        PackValue::Object(obj) => {
            let mut map = Map::with_capacity(obj.len());
            for (key, val) in obj {
                map.insert(key.clone(), wrap_binary(val)?);
            }
            JsonValue::Object(map)
        }
    })
}

/// Bytes carried by a data URI string. `None` without the prefix or when
/// the base64 part is invalid.
pub fn parse_binary(s: &str) -> Option<Vec<u8>> {
    STANDARD.decode(s.strip_prefix(BIN_URI_START)?).ok()
}
