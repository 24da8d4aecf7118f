//! Content-type tags negotiated at the transport boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte encoding a [`crate::PackValue`] is packed into.
///
/// `Xml` and `Plaintext` are reserved: they parse and compare like the
/// other tags but every pack/unpack attempt with them fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContentType {
    BinaryMap,
    Json,
    Xml,
    Plaintext,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown content type `{0}`")]
pub struct UnknownContentType(pub String);

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::BinaryMap,
        ContentType::Json,
        ContentType::Xml,
        ContentType::Plaintext,
    ];

    /// Short name used in messages and configuration.
    pub fn name(self) -> &'static str {
        match self {
            ContentType::BinaryMap => "binary-map",
            ContentType::Json => "json",
            ContentType::Xml => "xml",
            ContentType::Plaintext => "plaintext",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ContentType::BinaryMap => "application/msgpack",
            ContentType::Json => "application/json",
            ContentType::Xml => "application/xml",
            ContentType::Plaintext => "text/plain",
        }
    }

    /// Reserved formats have no codec.
    pub fn is_reserved(self) -> bool {
        matches!(self, ContentType::Xml | ContentType::Plaintext)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts short names and MIME types; MIME parameters after `;` are ignored.
impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "binary-map" | "msgpack" | "application/msgpack" | "application/x-msgpack"
            | "application/vnd.msgpack" => Ok(ContentType::BinaryMap),
            "json" | "application/json" => Ok(ContentType::Json),
            "xml" | "application/xml" | "text/xml" => Ok(ContentType::Xml),
            "plaintext" | "text/plain" => Ok(ContentType::Plaintext),
            _ => Err(UnknownContentType(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ContentType {
    type Error = UnknownContentType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> Self {
        ct.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matrix() {
        let cases = [
            ("binary-map", ContentType::BinaryMap),
            ("application/msgpack", ContentType::BinaryMap),
            ("application/x-msgpack", ContentType::BinaryMap),
            ("Application/JSON; charset=utf-8", ContentType::Json),
            ("text/xml", ContentType::Xml),
            ("text/plain", ContentType::Plaintext),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<ContentType>().unwrap(), expected, "{input}");
        }
        assert!("application/cbor".parse::<ContentType>().is_err());
    }

    #[test]
    fn name_and_mime_roundtrip() {
        for ct in ContentType::ALL {
            assert_eq!(ct.name().parse::<ContentType>().unwrap(), ct);
            assert_eq!(ct.mime().parse::<ContentType>().unwrap(), ct);
        }
    }

    #[test]
    fn reserved_formats() {
        assert!(ContentType::Xml.is_reserved());
        assert!(ContentType::Plaintext.is_reserved());
        assert!(!ContentType::Json.is_reserved());
        assert!(!ContentType::BinaryMap.is_reserved());
    }

    #[test]
    fn serde_uses_names() {
        let s = serde_json::to_string(&ContentType::BinaryMap).unwrap();
        assert_eq!(s, "\"binary-map\"");
        let ct: ContentType = serde_json::from_str("\"application/json\"").unwrap();
        assert_eq!(ct, ContentType::Json);
    }
}
