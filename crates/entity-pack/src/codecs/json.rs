//! JSON codec wrapper.

use crate::{json, ContentType, PackValue};

use super::types::{CodecError, ValueCodec};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonValueCodec;

impl JsonValueCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ValueCodec for JsonValueCodec {
    fn id(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> ContentType {
        ContentType::Json
    }

    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(json::encode(value)?)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(json::decode(bytes)?)
    }
}
