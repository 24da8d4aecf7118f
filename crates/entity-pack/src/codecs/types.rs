//! Common codec trait and error.

use crate::{json::JsonError, msgpack::MsgPackError, ContentType, PackValue};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("MessagePack codec error: {0}")]
    MsgPack(#[from] MsgPackError),
    #[error("JSON codec error: {0}")]
    Json(#[from] JsonError),
}

/// A byte encoding for [`PackValue`] bound to one content type.
pub trait ValueCodec {
    fn id(&self) -> &'static str;
    fn content_type(&self) -> ContentType;
    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError>;
    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError>;
}
