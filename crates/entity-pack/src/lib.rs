//! Generic value model and content packing for entity contracts.
//!
//! - [`PackValue`] is the wire-neutral tree entities are converted to.
//! - [`pack`] / [`unpack`] move it to and from bytes under a negotiated
//!   [`ContentType`]: MessagePack ("binary-map") and JSON. `Xml` and
//!   `Plaintext` are reserved and always rejected.

mod content_type;
mod error;
mod pack_value;
mod packer;

pub mod codecs;
pub mod json;
pub mod msgpack;

pub use codecs::{CodecError, Codecs, ValueCodec};
pub use content_type::{ContentType, UnknownContentType};
pub use error::PackError;
pub use pack_value::{Object, PackValue, ValueKind};
pub use packer::{pack, strip_array_nulls, unpack};
