//! `MsgPackEncoder`: writes a [`PackValue`] using the smallest fitting
//! MessagePack representation for each node.

use crate::PackValue;

use super::constants::*;
use super::error::MsgPackError;

pub struct MsgPackEncoder {
    buf: Vec<u8>,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Encode a value and return the MessagePack bytes.
    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, MsgPackError> {
        self.buf.clear();
        self.write_any(value)?;
        Ok(std::mem::take(&mut self.buf))
    }

    pub fn write_any(&mut self, value: &PackValue) -> Result<(), MsgPackError> {
        match value {
            PackValue::Null => self.write_null(),
            PackValue::Bool(b) => self.write_boolean(*b),
            PackValue::Integer(i) => self.write_integer(*i),
            PackValue::UInteger(u) => self.write_u_integer(*u),
            PackValue::Float(f) => self.write_float(*f),
            PackValue::Str(s) => self.write_str(s)?,
            PackValue::Bytes(b) => self.write_bin(b)?,
            PackValue::Array(arr) => {
                self.write_arr_hdr(arr.len())?;
                for item in arr {
                    self.write_any(item)?;
                }
            }
            PackValue::Object(obj) => {
                self.write_obj_hdr(obj.len())?;
                for (key, val) in obj {
                    self.write_str(key)?;
                    self.write_any(val)?;
                }
            }
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.buf.push(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.buf.push(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -32 {
            self.buf.push(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.buf.push(INT8);
            self.buf.push(int as i8 as u8);
        } else if int >= i16::MIN as i64 {
            self.buf.push(INT16);
            self.buf.extend_from_slice(&(int as i16).to_be_bytes());
        } else if int >= i32::MIN as i64 {
            self.buf.push(INT32);
            self.buf.extend_from_slice(&(int as i32).to_be_bytes());
        } else {
            self.buf.push(INT64);
            self.buf.extend_from_slice(&int.to_be_bytes());
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= POSITIVE_FIXINT_MAX as u64 {
            self.buf.push(uint as u8);
        } else if uint <= 0xff {
            self.buf.push(UINT8);
            self.buf.push(uint as u8);
        } else if uint <= 0xffff {
            self.buf.push(UINT16);
            self.buf.extend_from_slice(&(uint as u16).to_be_bytes());
        } else if uint <= 0xffff_ffff {
            self.buf.push(UINT32);
            self.buf.extend_from_slice(&(uint as u32).to_be_bytes());
        } else {
            self.buf.push(UINT64);
            self.buf.extend_from_slice(&uint.to_be_bytes());
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.buf.push(FLOAT64);
        self.buf.extend_from_slice(&float.to_be_bytes());
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), MsgPackError> {
        let length = s.len();
        if length <= 31 {
            self.buf.push(FIXSTR | length as u8);
        } else {
            self.write_len_hdr(length, STR8, STR16, STR32)?;
        }
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    pub fn write_bin(&mut self, bin: &[u8]) -> Result<(), MsgPackError> {
        self.write_len_hdr(bin.len(), BIN8, BIN16, BIN32)?;
        self.buf.extend_from_slice(bin);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 15 {
            self.buf.push(FIXARRAY | length as u8);
            return Ok(());
        }
        self.write_collection_hdr(length, ARRAY16, ARRAY32)
    }

    pub fn write_obj_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 15 {
            self.buf.push(FIXMAP | length as u8);
            return Ok(());
        }
        self.write_collection_hdr(length, MAP16, MAP32)
    }

    fn write_len_hdr(&mut self, length: usize, m8: u8, m16: u8, m32: u8) -> Result<(), MsgPackError> {
        if length <= 0xff {
            self.buf.push(m8);
            self.buf.push(length as u8);
            Ok(())
        } else {
            self.write_collection_hdr(length, m16, m32)
        }
    }

    fn write_collection_hdr(&mut self, length: usize, m16: u8, m32: u8) -> Result<(), MsgPackError> {
        if length <= 0xffff {
            self.buf.push(m16);
            self.buf.extend_from_slice(&(length as u16).to_be_bytes());
        } else {
            let length = u32::try_from(length).map_err(|_| MsgPackError::TooLarge(length))?;
            self.buf.push(m32);
            self.buf.extend_from_slice(&length.to_be_bytes());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: PackValue) -> Vec<u8> {
        MsgPackEncoder::new().encode(&value).unwrap()
    }

    #[test]
    fn integer_headers() {
        assert_eq!(enc(PackValue::Integer(0)), [0x00]);
        assert_eq!(enc(PackValue::Integer(127)), [0x7f]);
        assert_eq!(enc(PackValue::Integer(128)), [0xcc, 0x80]);
        assert_eq!(enc(PackValue::Integer(256)), [0xcd, 0x01, 0x00]);
        assert_eq!(enc(PackValue::Integer(-1)), [0xff]);
        assert_eq!(enc(PackValue::Integer(-32)), [0xe0]);
        assert_eq!(enc(PackValue::Integer(-33)), [0xd0, 0xdf]);
        assert_eq!(enc(PackValue::Integer(-129)), [0xd1, 0xff, 0x7f]);
        assert_eq!(enc(PackValue::UInteger(u64::MAX))[0], 0xcf);
        assert_eq!(enc(PackValue::Integer(i64::MIN))[0], 0xd3);
    }

    #[test]
    fn scalar_markers() {
        assert_eq!(enc(PackValue::Null), [0xc0]);
        assert_eq!(enc(PackValue::Bool(false)), [0xc2]);
        assert_eq!(enc(PackValue::Bool(true)), [0xc3]);
        let float = enc(PackValue::Float(1.5));
        assert_eq!(float[0], 0xcb);
        assert_eq!(&float[1..], &1.5f64.to_be_bytes());
    }

    #[test]
    fn string_and_binary_headers() {
        assert_eq!(enc(PackValue::Str("abc".into())), [0xa3, b'a', b'b', b'c']);
        let long = "x".repeat(40);
        assert_eq!(&enc(PackValue::Str(long))[..2], &[0xd9, 40]);
        assert_eq!(enc(PackValue::Bytes(vec![1, 2])), [0xc4, 0x02, 0x01, 0x02]);
        let big = vec![0u8; 300];
        assert_eq!(&enc(PackValue::Bytes(big))[..3], &[0xc5, 0x01, 0x2c]);
    }

    #[test]
    fn collection_headers() {
        let arr = PackValue::Array(vec![PackValue::Integer(1), PackValue::Null]);
        assert_eq!(enc(arr), [0x92, 0x01, 0xc0]);
        let mut obj = crate::Object::new();
        obj.insert("a".into(), PackValue::Integer(1));
        assert_eq!(enc(PackValue::Object(obj)), [0x81, 0xa1, b'a', 0x01]);
        let wide = PackValue::Array(vec![PackValue::Null; 16]);
        assert_eq!(&enc(wide)[..3], &[0xdc, 0x00, 0x10]);
    }
}
