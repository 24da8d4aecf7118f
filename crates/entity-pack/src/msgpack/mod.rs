//! MessagePack codec, the "binary-map" content type.

pub mod constants;
mod decoder;
mod encoder;
mod error;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::PackValue;

/// Encode `value` with a fresh encoder.
pub fn encode(value: &PackValue) -> Result<Vec<u8>, MsgPackError> {
    MsgPackEncoder::new().encode(value)
}

/// Decode one value; `nil` array elements are preserved.
pub fn decode(bytes: &[u8]) -> Result<PackValue, MsgPackError> {
    MsgPackDecoder::new().decode(bytes)
}
