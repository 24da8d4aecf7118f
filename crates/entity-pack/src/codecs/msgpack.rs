//! MessagePack codec wrapper.

use crate::msgpack::{MsgPackDecoder, MsgPackEncoder};
use crate::{ContentType, PackValue};

use super::types::{CodecError, ValueCodec};

#[derive(Default)]
pub struct MsgPackValueCodec {
    pub encoder: MsgPackEncoder,
    pub decoder: MsgPackDecoder,
}

impl MsgPackValueCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValueCodec for MsgPackValueCodec {
    fn id(&self) -> &'static str {
        "msgpack"
    }

    fn content_type(&self) -> ContentType {
        ContentType::BinaryMap
    }

    fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(value)?)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<PackValue, CodecError> {
        Ok(self.decoder.decode(bytes)?)
    }
}
