//! [`PackValue`]: the wire-neutral value every codec reads and writes.

use std::fmt;

use indexmap::IndexMap;

/// String-keyed map form of a [`PackValue`]. Equality ignores key order.
pub type Object = IndexMap<String, PackValue>;

/// Dynamically typed value sitting between entities and wire bytes.
///
/// A missing key inside an [`PackValue::Object`] is how "absent" is
/// expressed; there is no dedicated variant for it.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<PackValue>),
    Object(Object),
}

/// Coarse shape of a [`PackValue`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Str,
    Bytes,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "list",
            ValueKind::Object => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PackValue {
    /// Empty object.
    pub fn object() -> Self {
        PackValue::Object(Object::new())
    }

    /// Builds an integer value, keeping `UInteger` for the range `i64` cannot hold.
    pub fn from_u64(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => PackValue::Integer(i),
            Err(_) => PackValue::UInteger(u),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            PackValue::Null => ValueKind::Null,
            PackValue::Bool(_) => ValueKind::Bool,
            PackValue::Integer(_) | PackValue::UInteger(_) => ValueKind::Integer,
            PackValue::Float(_) => ValueKind::Float,
            PackValue::Str(_) => ValueKind::Str,
            PackValue::Bytes(_) => ValueKind::Bytes,
            PackValue::Array(_) => ValueKind::Array,
            PackValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PackValue::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            PackValue::Integer(_) | PackValue::UInteger(_) | PackValue::Float(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            PackValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Integer view; floats are not converted.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            PackValue::Integer(i) => Some(i),
            PackValue::UInteger(u) => i64::try_from(u).ok(),
            _ => None,
        }
    }

    /// Lossy floating view of any numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            PackValue::Integer(i) => Some(i as f64),
            PackValue::UInteger(u) => Some(u as f64),
            PackValue::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PackValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PackValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Binary content: `Bytes`, or a string holding a base64 data URI as
    /// JSON writes them.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            PackValue::Bytes(b) => Some(b.clone()),
            PackValue::Str(s) => crate::json::parse_binary(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PackValue]> {
        match self {
            PackValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            PackValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up `key` when this value is an object.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for PackValue {
            fn from(v: $ty) -> Self {
                PackValue::Integer(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for PackValue {
            fn from(v: $ty) -> Self {
                PackValue::from_u64(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<bool> for PackValue {
    fn from(b: bool) -> Self {
        PackValue::Bool(b)
    }
}

impl From<f32> for PackValue {
    fn from(f: f32) -> Self {
        PackValue::Float(f as f64)
    }
}

impl From<f64> for PackValue {
    fn from(f: f64) -> Self {
        PackValue::Float(f)
    }
}

impl From<String> for PackValue {
    fn from(s: String) -> Self {
        PackValue::Str(s)
    }
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        PackValue::Str(s.to_owned())
    }
}

impl From<Vec<u8>> for PackValue {
    fn from(b: Vec<u8>) -> Self {
        PackValue::Bytes(b)
    }
}

impl From<Vec<PackValue>> for PackValue {
    fn from(arr: Vec<PackValue>) -> Self {
        PackValue::Array(arr)
    }
}

impl From<Object> for PackValue {
    fn from(obj: Object) -> Self {
        PackValue::Object(obj)
    }
}

impl<T: Into<PackValue>> From<Option<T>> for PackValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(PackValue::Null, Into::into)
    }
}

/// Plain structural conversion. Strings stay strings, data URIs included.
impl From<serde_json::Value> for PackValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => PackValue::Null,
            J::Bool(b) => PackValue::Bool(b),
            J::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PackValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    PackValue::UInteger(u)
                } else {
                    PackValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            J::String(s) => PackValue::Str(s),
            J::Array(arr) => PackValue::Array(arr.into_iter().map(PackValue::from).collect()),
            J::Object(obj) => PackValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, PackValue::from(v)))
                    .collect(),
            ),
        }
    }
}
