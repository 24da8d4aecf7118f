//! Field declarations and the single-field validation unit.

use std::fmt;

use entity_pack::PackValue;
use futures::future::{join_all, BoxFuture, FutureExt};

use super::{validate_entity, ValidationReport, ValidatorFn, ValidatorRegistry};
use crate::entity::Entity;
use crate::scalar::{Scalar, WireEnum};
use crate::{CodecOptions, ContractError, ErrorCategory, ErrorDescriptor, RejectionCode};

/// Inputs shared by every unit of one validation pass, nested entities
/// included.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub options: &'a CodecOptions,
    pub registry: &'a ValidatorRegistry,
    pub locale: &'a str,
}

/// Validates a value as one nested entity, with that entity's own field
/// declarations and registered validators.
pub type NestedCheck =
    for<'a> fn(&'a PackValue, Scope<'a>) -> BoxFuture<'a, Result<ValidationReport, ContractError>>;

/// Value shape a field accepts before any custom validator runs.
///
/// The nested variants are built with [`Shape::enumeration`],
/// [`Shape::entity`], [`Shape::entity_list`], [`Shape::entity_map`] and
/// [`Shape::list_of`], so that failures deeper in the value are reported
/// under their own paths instead of surfacing during construction.
#[derive(Clone, Copy)]
pub enum Shape {
    /// Any non-null value.
    Any,
    Bool,
    /// Integer or float; width coercion happens at construction.
    Number,
    Str,
    /// `Bytes`, or a string holding a base64 data URI.
    Bytes,
    List,
    Map,
    /// List whose elements must each pass the check.
    ListOf(fn(&PackValue) -> bool),
    /// Raw value that must name a known enumeration case.
    Enum(fn(&PackValue) -> FieldOutcome),
    Entity(NestedCheck),
    EntityList(NestedCheck),
    /// String-keyed map of entities.
    EntityMap(NestedCheck),
}

impl Shape {
    pub const fn list_of<T: Scalar>() -> Self {
        Shape::ListOf(accepts_scalar::<T>)
    }

    pub const fn enumeration<T: WireEnum>() -> Self {
        Shape::Enum(match_case::<T>)
    }

    pub const fn entity<E: Entity>() -> Self {
        Shape::Entity(validate_nested::<E>)
    }

    pub const fn entity_list<E: Entity>() -> Self {
        Shape::EntityList(validate_nested::<E>)
    }

    pub const fn entity_map<E: Entity>() -> Self {
        Shape::EntityMap(validate_nested::<E>)
    }

    /// Top-level test only; element and nested content is checked by
    /// [`check_field`].
    pub fn accepts(self, value: &PackValue) -> bool {
        match self {
            Shape::Any | Shape::Enum(_) => !value.is_null(),
            Shape::Bool => matches!(value, PackValue::Bool(_)),
            Shape::Number => value.is_number(),
            Shape::Str => matches!(value, PackValue::Str(_)),
            Shape::Bytes => value.to_bytes().is_some(),
            Shape::List | Shape::ListOf(_) | Shape::EntityList(_) => {
                matches!(value, PackValue::Array(_))
            }
            Shape::Map | Shape::Entity(_) | Shape::EntityMap(_) => {
                matches!(value, PackValue::Object(_))
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            Shape::Any => "Any",
            Shape::Bool => "Bool",
            Shape::Number => "Number",
            Shape::Str => "Str",
            Shape::Bytes => "Bytes",
            Shape::List => "List",
            Shape::Map => "Map",
            Shape::ListOf(_) => "ListOf",
            Shape::Enum(_) => "Enum",
            Shape::Entity(_) => "Entity",
            Shape::EntityList(_) => "EntityList",
            Shape::EntityMap(_) => "EntityMap",
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn accepts_scalar<T: Scalar>(value: &PackValue) -> bool {
    T::from_value(value).is_some()
}

fn match_case<T: WireEnum>(value: &PackValue) -> FieldOutcome {
    match T::Raw::from_value(value) {
        None => FieldOutcome::Incompatible,
        Some(raw) => match T::from_raw(raw) {
            Some(_) => FieldOutcome::Valid,
            None => FieldOutcome::UnknownCase,
        },
    }
}

fn validate_nested<'a, E: Entity>(
    value: &'a PackValue,
    scope: Scope<'a>,
) -> BoxFuture<'a, Result<ValidationReport, ContractError>> {
    validate_entity::<E>(value, scope.options, scope.registry, scope.locale).boxed()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Declaration of one entity field, by logical name.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Optional,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.presence == Presence::Optional
    }
}

/// Result of one validation unit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Valid,
    /// Optional field absent or null; no further checks ran.
    Skip,
    Missing,
    Incompatible,
    UnknownCase,
    Rejected(RejectionCode),
    /// Failures inside the value, keyed by path relative to the field
    /// (`street`, `[1]`, `[1].street`).
    Nested(ValidationReport),
}

impl FieldOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, FieldOutcome::Valid | FieldOutcome::Skip)
    }

    fn from_report(report: ValidationReport) -> Self {
        if report.is_empty() {
            FieldOutcome::Valid
        } else {
            FieldOutcome::Nested(report)
        }
    }
}

/// Runs one unit against `raw`, the value stored under `wire_key`.
///
/// Presence and shape come first, including every element of a list or
/// keyed field and every field of a nested entity. The custom validator
/// only sees values that passed them.
pub async fn check_field(
    spec: &FieldSpec,
    wire_key: &str,
    raw: Option<&PackValue>,
    validator: Option<ValidatorFn>,
    scope: Scope<'_>,
) -> FieldOutcome {
    let value = match raw {
        None if spec.is_optional() => return FieldOutcome::Skip,
        None => return FieldOutcome::Missing,
        Some(PackValue::Null) if spec.is_optional() => return FieldOutcome::Skip,
        Some(value) => value,
    };
    let outcome = check_shape(spec.shape, wire_key, value, scope).await;
    if outcome.is_failure() {
        return outcome;
    }
    match validator {
        Some(validate) => match validate(value.clone()).await {
            Some(code) => FieldOutcome::Rejected(code),
            None => FieldOutcome::Valid,
        },
        None => FieldOutcome::Valid,
    }
}

async fn check_shape(shape: Shape, wire_key: &str, value: &PackValue, scope: Scope<'_>) -> FieldOutcome {
    if !shape.accepts(value) {
        return FieldOutcome::Incompatible;
    }
    match (shape, value) {
        (Shape::Enum(matches_case), _) => matches_case(value),
        (Shape::ListOf(accepts), PackValue::Array(items)) => {
            let mut report = ValidationReport::default();
            for (i, item) in items.iter().enumerate() {
                if !accepts(item) {
                    report.push(
                        format!("[{i}]"),
                        ErrorDescriptor::new(ErrorCategory::Incompatible, wire_key, Some(item), scope.locale),
                    );
                }
            }
            FieldOutcome::from_report(report)
        }
        (Shape::Entity(check), _) => match check(value, scope).await {
            Ok(report) => FieldOutcome::from_report(report),
            Err(_) => FieldOutcome::Incompatible,
        },
        (Shape::EntityList(check), PackValue::Array(items)) => {
            let elements = items
                .iter()
                .enumerate()
                .map(|(i, item)| (format!("[{i}]"), item));
            FieldOutcome::from_report(check_elements(check, elements, wire_key, scope).await)
        }
        (Shape::EntityMap(check), PackValue::Object(entries)) => {
            let elements = entries.iter().map(|(key, item)| (format!("[{key:?}]"), item));
            FieldOutcome::from_report(check_elements(check, elements, wire_key, scope).await)
        }
        _ => FieldOutcome::Valid,
    }
}

/// Validates every element concurrently. An element that is not a map is
/// reported at its own position.
async fn check_elements<'a, I>(
    check: NestedCheck,
    elements: I,
    wire_key: &str,
    scope: Scope<'a>,
) -> ValidationReport
where
    I: IntoIterator<Item = (String, &'a PackValue)>,
{
    let results = join_all(
        elements
            .into_iter()
            .map(|(position, item)| async move { (position, item, check(item, scope).await) }),
    )
    .await;
    let mut report = ValidationReport::default();
    for (position, item, result) in results {
        match result {
            Ok(nested) => report.absorb(&position, nested),
            Err(_) => report.push(
                position,
                ErrorDescriptor::new(ErrorCategory::Incompatible, wire_key, Some(item), scope.locale),
            ),
        }
    }
    report
}
