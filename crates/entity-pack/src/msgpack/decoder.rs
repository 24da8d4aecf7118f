//! `MsgPackDecoder`: reads one MessagePack value into a [`PackValue`].
//!
//! The decoder is faithful to the format: `nil` elements inside arrays are
//! kept. Callers that want the packer's array convention apply
//! [`crate::strip_array_nulls`] afterwards.

use crate::{Object, PackValue};

use super::constants::*;
use super::error::MsgPackError;

/// Bounds-checked cursor over the input bytes.
struct Reader<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    fn buf(&mut self, size: usize) -> Result<&'a [u8], MsgPackError> {
        if size > self.remaining() {
            return Err(MsgPackError::UnexpectedEof(self.x));
        }
        let bin = &self.data[self.x..self.x + size];
        self.x += size;
        Ok(bin)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], MsgPackError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.buf(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, MsgPackError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, MsgPackError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, MsgPackError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, MsgPackError> {
        Ok(u64::from_be_bytes(self.array()?))
    }
}

pub struct MsgPackDecoder {
    max_depth: usize,
}

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decode exactly one value; trailing bytes are an error.
    pub fn decode(&self, bytes: &[u8]) -> Result<PackValue, MsgPackError> {
        let mut reader = Reader::new(bytes);
        let value = self.read_any(&mut reader, 0)?;
        match reader.remaining() {
            0 => Ok(value),
            n => Err(MsgPackError::TrailingBytes(n)),
        }
    }

    fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<PackValue, MsgPackError> {
        let offset = r.x;
        let byte = r.u8()?;
        let value = match byte {
            0x00..=POSITIVE_FIXINT_MAX => PackValue::Integer(byte as i64),
            0x80..=0x8f => self.read_obj(r, (byte & 0x0f) as usize, depth)?,
            0x90..=0x9f => self.read_arr(r, (byte & 0x0f) as usize, depth)?,
            0xa0..=0xbf => self.read_str(r, (byte & 0x1f) as usize)?,
            NIL => PackValue::Null,
            FALSE => PackValue::Bool(false),
            TRUE => PackValue::Bool(true),
            BIN8 => {
                let size = r.u8()? as usize;
                PackValue::Bytes(r.buf(size)?.to_vec())
            }
            BIN16 => {
                let size = r.u16()? as usize;
                PackValue::Bytes(r.buf(size)?.to_vec())
            }
            BIN32 => {
                let size = r.u32()? as usize;
                PackValue::Bytes(r.buf(size)?.to_vec())
            }
            EXT8 | EXT16 | EXT32 => return Err(self.read_ext_type(r, byte)),
            FIXEXT1..=FIXEXT16 => {
                let tag = r.u8()? as i8;
                return Err(MsgPackError::UnsupportedExtension(tag));
            }
            FLOAT32 => PackValue::Float(f32::from_bits(r.u32()?) as f64),
            FLOAT64 => PackValue::Float(f64::from_bits(r.u64()?)),
            UINT8 => PackValue::Integer(r.u8()? as i64),
            UINT16 => PackValue::Integer(r.u16()? as i64),
            UINT32 => PackValue::Integer(r.u32()? as i64),
            UINT64 => PackValue::from_u64(r.u64()?),
            INT8 => PackValue::Integer(r.u8()? as i8 as i64),
            INT16 => PackValue::Integer(r.u16()? as i16 as i64),
            INT32 => PackValue::Integer(r.u32()? as i32 as i64),
            INT64 => PackValue::Integer(r.u64()? as i64),
            STR8 => {
                let size = r.u8()? as usize;
                self.read_str(r, size)?
            }
            STR16 => {
                let size = r.u16()? as usize;
                self.read_str(r, size)?
            }
            STR32 => {
                let size = r.u32()? as usize;
                self.read_str(r, size)?
            }
            ARRAY16 => {
                let size = r.u16()? as usize;
                self.read_arr(r, size, depth)?
            }
            ARRAY32 => {
                let size = r.u32()? as usize;
                self.read_arr(r, size, depth)?
            }
            MAP16 => {
                let size = r.u16()? as usize;
                self.read_obj(r, size, depth)?
            }
            MAP32 => {
                let size = r.u32()? as usize;
                self.read_obj(r, size, depth)?
            }
            NEGATIVE_FIXINT_MIN..=0xff => PackValue::Integer(byte as i8 as i64),
            NEVER_USED => return Err(MsgPackError::InvalidByte { byte, offset }),
        };
        Ok(value)
    }

    fn read_ext_type(&self, r: &mut Reader<'_>, marker: u8) -> MsgPackError {
        let skipped = match marker {
            EXT8 => r.u8().map(|_| ()),
            EXT16 => r.u16().map(|_| ()),
            _ => r.u32().map(|_| ()),
        };
        match skipped.and_then(|_| r.u8()) {
            Ok(tag) => MsgPackError::UnsupportedExtension(tag as i8),
            Err(err) => err,
        }
    }

    fn read_str(&self, r: &mut Reader<'_>, size: usize) -> Result<PackValue, MsgPackError> {
        let offset = r.x;
        let bytes = r.buf(size)?;
        let s = std::str::from_utf8(bytes).map_err(|_| MsgPackError::InvalidUtf8(offset))?;
        Ok(PackValue::Str(s.to_owned()))
    }

    fn read_arr(
        &self,
        r: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<PackValue, MsgPackError> {
        let depth = self.enter(depth)?;
        // Every element takes at least one byte.
        let mut arr = Vec::with_capacity(size.min(r.remaining()));
        for _ in 0..size {
            arr.push(self.read_any(r, depth)?);
        }
        Ok(PackValue::Array(arr))
    }

    fn read_obj(
        &self,
        r: &mut Reader<'_>,
        size: usize,
        depth: usize,
    ) -> Result<PackValue, MsgPackError> {
        let depth = self.enter(depth)?;
        let mut obj = Object::with_capacity(size.min(r.remaining() / 2));
        for _ in 0..size {
            let key_offset = r.x;
            let key = match self.read_any(r, depth)? {
                PackValue::Str(s) => s,
                _ => return Err(MsgPackError::NonStringKey(key_offset)),
            };
            if obj.contains_key(&key) {
                return Err(MsgPackError::DuplicateKey(key_offset));
            }
            let value = self.read_any(r, depth)?;
            obj.insert(key, value);
        }
        Ok(PackValue::Object(obj))
    }

    fn enter(&self, depth: usize) -> Result<usize, MsgPackError> {
        if depth >= self.max_depth {
            return Err(MsgPackError::DepthExceeded(self.max_depth));
        }
        Ok(depth + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(bytes: &[u8]) -> Result<PackValue, MsgPackError> {
        MsgPackDecoder::new().decode(bytes)
    }

    #[test]
    fn decodes_fixed_markers() {
        assert_eq!(dec(&[0xc0]).unwrap(), PackValue::Null);
        assert_eq!(dec(&[0xc3]).unwrap(), PackValue::Bool(true));
        assert_eq!(dec(&[0x2a]).unwrap(), PackValue::Integer(42));
        assert_eq!(dec(&[0xe0]).unwrap(), PackValue::Integer(-32));
        assert_eq!(dec(&[0xd0, 0x80]).unwrap(), PackValue::Integer(-128));
    }

    #[test]
    fn decodes_float32_as_float() {
        let mut bytes = vec![0xca];
        bytes.extend_from_slice(&2.5f32.to_be_bytes());
        assert_eq!(dec(&bytes).unwrap(), PackValue::Float(2.5));
    }

    #[test]
    fn keeps_nil_inside_arrays() {
        let value = dec(&[0x93, 0x01, 0xc0, 0x02]).unwrap();
        assert_eq!(
            value,
            PackValue::Array(vec![
                PackValue::Integer(1),
                PackValue::Null,
                PackValue::Integer(2)
            ])
        );
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(dec(&[0xa3, b'a']), Err(MsgPackError::UnexpectedEof(1)));
        assert_eq!(dec(&[]), Err(MsgPackError::UnexpectedEof(0)));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(dec(&[0xc0, 0xc0]), Err(MsgPackError::TrailingBytes(1)));
    }

    #[test]
    fn rejects_never_used_marker() {
        assert_eq!(
            dec(&[0xc1]),
            Err(MsgPackError::InvalidByte {
                byte: 0xc1,
                offset: 0
            })
        );
    }

    #[test]
    fn rejects_extensions_and_non_string_keys() {
        assert_eq!(
            dec(&[0xd4, 0x05, 0x00]),
            Err(MsgPackError::UnsupportedExtension(5))
        );
        assert_eq!(
            dec(&[0xc7, 0x01, 0x07, 0x00]),
            Err(MsgPackError::UnsupportedExtension(7))
        );
        assert_eq!(dec(&[0x81, 0x01, 0x02]), Err(MsgPackError::NonStringKey(1)));
    }

    #[test]
    fn rejects_repeated_map_keys() {
        // {"a": 1, "a": 2}
        let bytes = [0x82, 0xa1, b'a', 0x01, 0xa1, b'a', 0x02];
        assert_eq!(dec(&bytes), Err(MsgPackError::DuplicateKey(4)));
        assert!(dec(&[0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02]).is_ok());
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(dec(&[0xa1, 0xff]), Err(MsgPackError::InvalidUtf8(1)));
    }

    #[test]
    fn huge_declared_length_does_not_preallocate() {
        assert_eq!(
            dec(&[0xdd, 0xff, 0xff, 0xff, 0xff]),
            Err(MsgPackError::UnexpectedEof(5))
        );
    }

    #[test]
    fn depth_limit() {
        let decoder = MsgPackDecoder::with_max_depth(2);
        assert!(decoder.decode(&[0x91, 0x91, 0x90]).is_err());
        assert!(decoder.decode(&[0x91, 0x90]).is_ok());
    }
}
