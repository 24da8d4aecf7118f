//! Codec wrappers and the per-content-type registry.

mod json;
mod msgpack;
mod registry;
mod types;

pub use json::JsonValueCodec;
pub use msgpack::MsgPackValueCodec;
pub use registry::Codecs;
pub use types::{CodecError, ValueCodec};
