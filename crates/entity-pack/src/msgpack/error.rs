//! MessagePack encoder/decoder error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),
    #[error("invalid UTF-8 in string at offset {0}")]
    InvalidUtf8(usize),
    #[error("invalid MessagePack byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },
    #[error("extension type {0} is not supported")]
    UnsupportedExtension(i8),
    #[error("map key at offset {0} is not a string")]
    NonStringKey(usize),
    #[error("map key at offset {0} repeats an earlier key")]
    DuplicateKey(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),
    #[error("length {0} does not fit a 32-bit header")]
    TooLarge(usize),
}
