//! Fan-in of field units into one [`ValidationReport`].

use std::collections::BTreeMap;
use std::future::Future;

use entity_pack::PackValue;
use futures::future::join_all;
use tracing::debug;

use super::field::Scope;
use super::{check_field, FieldOutcome, ValidatorRegistry};
use crate::entity::Entity;
use crate::error::join_path;
use crate::wire::wire_key;
use crate::{CodecOptions, ContractError, DecodeError, ErrorCategory, ErrorDescriptor};

/// Failures of one validation pass keyed by field path: a field name, or
/// a dotted/indexed path into nested entities (`address.street`,
/// `previous[1].street`, `labels["work"].street`). Empty means success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<String, Vec<ErrorDescriptor>>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&[ErrorDescriptor]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub(super) fn push(&mut self, path: String, descriptor: ErrorDescriptor) {
        self.errors.entry(path).or_default().push(descriptor);
    }

    /// Moves every entry of `nested` under `prefix`.
    pub(super) fn absorb(&mut self, prefix: &str, nested: ValidationReport) {
        for (path, descriptors) in nested.errors {
            self.errors
                .entry(join_path(prefix, &path))
                .or_default()
                .extend(descriptors);
        }
    }

    fn merge(&mut self, other: ValidationReport) {
        for (path, descriptors) in other.errors {
            self.errors.entry(path).or_default().extend(descriptors);
        }
    }

    /// Report of one field unit: empty for a passing outcome, the nested
    /// entries under `field` for [`FieldOutcome::Nested`], otherwise one
    /// descriptor carrying `wire_key` and `raw`.
    pub fn from_outcome(
        field: &str,
        wire_key: &str,
        raw: Option<&PackValue>,
        outcome: FieldOutcome,
        locale: &str,
    ) -> Self {
        let mut report = Self::default();
        let category = match outcome {
            FieldOutcome::Valid | FieldOutcome::Skip => return report,
            FieldOutcome::Nested(nested) => {
                report.absorb(field, nested);
                return report;
            }
            FieldOutcome::Rejected(code) => {
                let descriptor = match raw {
                    Some(raw) => ErrorDescriptor::rejected(code, wire_key, raw, locale),
                    None => ErrorDescriptor {
                        code: Some(code),
                        ..ErrorDescriptor::new(ErrorCategory::Rejected, wire_key, None, locale)
                    },
                };
                report.push(field.to_owned(), descriptor);
                return report;
            }
            FieldOutcome::Missing => ErrorCategory::Missing,
            FieldOutcome::Incompatible => ErrorCategory::Incompatible,
            FieldOutcome::UnknownCase => ErrorCategory::UnknownCase,
        };
        report.push(
            field.to_owned(),
            ErrorDescriptor::new(category, wire_key, raw, locale),
        );
        report
    }

    pub fn into_result(self, entity: &'static str) -> Result<(), DecodeError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(DecodeError {
            entity,
            errors: self.errors,
        })
    }
}

/// Joins validation units and folds their reports.
pub struct ValidationReducer;

impl ValidationReducer {
    /// Awaits every unit concurrently. Nothing short-circuits: a failing
    /// unit never cancels its siblings, and the report order depends only
    /// on field paths, not on completion order.
    pub async fn join<I, F>(units: I) -> ValidationReport
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = ValidationReport>,
    {
        let mut report = ValidationReport::default();
        for unit in join_all(units).await {
            report.merge(unit);
        }
        report
    }
}

/// Validates every declared field of `E` in `value`, descending into
/// nested entities, entity lists and keyed collections. Validators
/// registered for nested entity types run on the nested values too.
pub async fn validate_entity<E: Entity>(
    value: &PackValue,
    options: &CodecOptions,
    registry: &ValidatorRegistry,
    locale: &str,
) -> Result<ValidationReport, ContractError> {
    let map = value.as_object().ok_or(ContractError::NotAMap {
        entity: E::NAME,
        found: value.kind(),
    })?;
    let scope = Scope {
        options,
        registry,
        locale,
    };
    let units = E::FIELDS.iter().map(|spec| {
        let key = wire_key(E::WIRE_KEYS, spec.name, options.remap_wire_keys);
        let raw = map.get(key);
        let validator = registry.get::<E>(spec.name);
        async move {
            let outcome = check_field(spec, key, raw, validator, scope).await;
            ValidationReport::from_outcome(spec.name, key, raw, outcome, locale)
        }
    });
    let report = ValidationReducer::join(units).await;
    if !report.is_empty() {
        debug!(entity = E::NAME, failing = report.len(), "validation failed");
    }
    Ok(report)
}
