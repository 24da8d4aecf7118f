//! `pack` / `unpack` entry points.

use crate::codecs::Codecs;
use crate::{ContentType, PackError, PackValue};

/// Packs `value` into `format`. Only binary-map and JSON are supported.
pub fn pack(value: &PackValue, format: ContentType) -> Result<Vec<u8>, PackError> {
    Codecs::new().pack(value, format)
}

/// Unpacks `bytes` declared as `format`, after checking `format` against
/// `allowed`. Binary-map payloads have `null` array elements removed.
pub fn unpack(
    bytes: &[u8],
    format: ContentType,
    allowed: &[ContentType],
) -> Result<PackValue, PackError> {
    Codecs::new().unpack(bytes, format, allowed)
}

/// Drops `null` elements from every array in the tree. A `null` held
/// directly by an object key is kept.
pub fn strip_array_nulls(value: PackValue) -> PackValue {
    match value {
        PackValue::Array(arr) => PackValue::Array(
            arr.into_iter()
                .filter(|item| !item.is_null())
                .map(strip_array_nulls)
                .collect(),
        ),
        PackValue::Object(obj) => PackValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, strip_array_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}
