//! Error taxonomy for extraction, validation and the request pipeline.

use std::collections::BTreeMap;
use std::fmt;

use entity_pack::{PackError, PackValue, ValueKind};
use thiserror::Error;

/// Error returned by a business handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a single field could not be extracted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractCause {
    #[error("value is missing")]
    Missing,
    #[error("expected {expected}")]
    Incompatible { expected: &'static str },
    #[error("unrecognized enumeration value")]
    UnknownCase,
}

impl ExtractCause {
    pub fn category(self) -> ErrorCategory {
        match self {
            ExtractCause::Missing => ErrorCategory::Missing,
            ExtractCause::Incompatible { .. } => ErrorCategory::Incompatible,
            ExtractCause::UnknownCase => ErrorCategory::UnknownCase,
        }
    }
}

/// A required presence/shape check failed for one field.
///
/// `raw` is `None` when the key was absent and carries the stored value
/// otherwise.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("field `{field}` (wire key `{wire_key}`): {cause}")]
pub struct ExtractError {
    pub field: String,
    pub wire_key: String,
    pub raw: Option<PackValue>,
    pub cause: ExtractCause,
}

impl ExtractError {
    pub fn missing(field: &str, wire_key: &str) -> Self {
        Self {
            field: field.to_owned(),
            wire_key: wire_key.to_owned(),
            raw: None,
            cause: ExtractCause::Missing,
        }
    }

    pub fn incompatible(field: &str, wire_key: &str, raw: &PackValue, expected: &'static str) -> Self {
        Self {
            field: field.to_owned(),
            wire_key: wire_key.to_owned(),
            raw: Some(raw.clone()),
            cause: ExtractCause::Incompatible { expected },
        }
    }

    pub fn unknown_case(field: &str, wire_key: &str, raw: &PackValue) -> Self {
        Self {
            field: field.to_owned(),
            wire_key: wire_key.to_owned(),
            raw: Some(raw.clone()),
            cause: ExtractCause::UnknownCase,
        }
    }
}

/// Machine-readable code returned by a custom validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RejectionCode(String);

impl RejectionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RejectionCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for RejectionCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Missing,
    Incompatible,
    UnknownCase,
    Rejected,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Missing => "missing",
            ErrorCategory::Incompatible => "incompatible",
            ErrorCategory::UnknownCase => "unknown_case",
            ErrorCategory::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reportable problem with one field: what went wrong, the wire key
/// and raw value it was read from, and the locale any localized message
/// for it must be rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescriptor {
    pub category: ErrorCategory,
    pub code: Option<RejectionCode>,
    pub wire_key: String,
    /// `None` when the key was absent.
    pub raw: Option<PackValue>,
    pub locale: String,
}

impl ErrorDescriptor {
    pub fn new(
        category: ErrorCategory,
        wire_key: &str,
        raw: Option<&PackValue>,
        locale: &str,
    ) -> Self {
        Self {
            category,
            code: None,
            wire_key: wire_key.to_owned(),
            raw: raw.cloned(),
            locale: locale.to_owned(),
        }
    }

    pub fn rejected(code: RejectionCode, wire_key: &str, raw: &PackValue, locale: &str) -> Self {
        Self {
            code: Some(code),
            ..Self::new(ErrorCategory::Rejected, wire_key, Some(raw), locale)
        }
    }
}

/// Aggregate validation failure: every failing field with all of its
/// descriptors, ordered by field path.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("`{entity}` failed validation for {}", field_list(.errors))]
pub struct DecodeError {
    pub entity: &'static str,
    pub errors: BTreeMap<String, Vec<ErrorDescriptor>>,
}

fn field_list(errors: &BTreeMap<String, Vec<ErrorDescriptor>>) -> String {
    errors
        .iter()
        .map(|(field, descriptors)| {
            let categories: Vec<&str> = descriptors.iter().map(|d| d.category.as_str()).collect();
            format!("{field} ({})", categories.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl DecodeError {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&[ErrorDescriptor]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// A nested entity, list element or keyed-collection value failed.
    #[error("field `{field}`{}: {source}", position_suffix(.position))]
    Nested {
        field: String,
        position: Option<String>,
        source: Box<ContractError>,
    },
    #[error("`{entity}` expects a map, found {found}")]
    NotAMap {
        entity: &'static str,
        found: ValueKind,
    },
    #[error("encode failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),
}

fn position_suffix(position: &Option<String>) -> String {
    position.as_deref().map(|p| format!(" at {p}")).unwrap_or_default()
}

impl ContractError {
    pub(crate) fn nested(field: &str, position: Option<String>, source: ContractError) -> Self {
        ContractError::Nested {
            field: field.to_owned(),
            position,
            source: Box::new(source),
        }
    }

    /// Report path and descriptor for a field-level failure, using the
    /// same paths as the validation report (`address.street`,
    /// `previous[1]`).
    pub fn field_error(&self, locale: &str) -> Option<(String, ErrorDescriptor)> {
        match self {
            ContractError::Extract(err) => Some((
                err.field.clone(),
                ErrorDescriptor::new(err.cause.category(), &err.wire_key, err.raw.as_ref(), locale),
            )),
            ContractError::Nested {
                field,
                position,
                source,
            } => {
                let prefix = format!("{field}{}", position.as_deref().unwrap_or_default());
                Some(match source.field_error(locale) {
                    Some((path, descriptor)) => (join_path(&prefix, &path), descriptor),
                    None => (
                        prefix,
                        ErrorDescriptor::new(ErrorCategory::Incompatible, field, None, locale),
                    ),
                })
            }
            _ => None,
        }
    }

    /// Field and category this error should be reported under, when it is
    /// a field-level failure.
    pub fn field_category(&self) -> Option<(&str, ErrorCategory)> {
        match self {
            ContractError::Extract(err) => Some((err.field.as_str(), err.cause.category())),
            ContractError::Nested { field, source, .. } => {
                let category = source
                    .field_category()
                    .map(|(_, category)| category)
                    .unwrap_or(ErrorCategory::Incompatible);
                Some((field.as_str(), category))
            }
            _ => None,
        }
    }
}

/// Appends a nested report path to `prefix`: positions attach directly,
/// field names after a dot.
pub(crate) fn join_path(prefix: &str, path: &str) -> String {
    if path.starts_with('[') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}.{path}")
    }
}
