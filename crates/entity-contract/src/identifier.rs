//! Opaque string-backed identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable identifier compared and hashed by its string value. No format
/// is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_and_hash_by_value() {
        let a = Identifier::new("user-1");
        let b = Identifier::from(String::from("user-1"));
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b, Identifier::from("user-2")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn any_string_is_accepted() {
        for raw in ["", " ", "🙂", "a/b?c"] {
            assert_eq!(Identifier::new(raw).as_str(), raw);
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Identifier::new("x")).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
