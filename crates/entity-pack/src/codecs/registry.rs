//! Aggregate codec holder and content-type dispatch.

use tracing::{trace, warn};

use super::{JsonValueCodec, MsgPackValueCodec, ValueCodec};
use crate::{strip_array_nulls, ContentType, PackError, PackValue};

#[derive(Default)]
pub struct Codecs {
    pub msgpack: MsgPackValueCodec,
    pub json: JsonValueCodec,
}

impl Codecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec for `format`; reserved formats have none.
    pub fn get_mut(&mut self, format: ContentType) -> Option<&mut dyn ValueCodec> {
        match format {
            ContentType::BinaryMap => Some(&mut self.msgpack),
            ContentType::Json => Some(&mut self.json),
            ContentType::Xml | ContentType::Plaintext => None,
        }
    }

    pub fn pack(&mut self, value: &PackValue, format: ContentType) -> Result<Vec<u8>, PackError> {
        let codec = self
            .get_mut(format)
            .ok_or_else(|| PackError::unsupported(value.kind(), format))?;
        let bytes = codec.encode(value)?;
        trace!(format = %format, kind = %value.kind(), bytes = bytes.len(), "packed value");
        Ok(bytes)
    }

    pub fn unpack(
        &mut self,
        bytes: &[u8],
        format: ContentType,
        allowed: &[ContentType],
    ) -> Result<PackValue, PackError> {
        if !allowed.contains(&format) {
            warn!(format = %format, "rejected content type outside the allow-list");
            return Err(PackError::not_allowed(format, allowed));
        }
        let codec = self.get_mut(format).ok_or_else(|| {
            PackError::Content(format!("{} bytes cannot be read as {format}", bytes.len()))
        })?;
        let value = codec.decode(bytes).map_err(|source| PackError::Unpack {
            description: format!("{} bytes as {format}", bytes.len()),
            source,
        })?;
        trace!(format = %format, bytes = bytes.len(), kind = %value.kind(), "unpacked value");
        Ok(match format {
            ContentType::BinaryMap => strip_array_nulls(value),
            _ => value,
        })
    }
}
