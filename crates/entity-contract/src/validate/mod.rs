//! Concurrent per-field validation.
//!
//! Every declared field becomes one unit: a presence/shape check followed
//! by the field's custom validator, if one is registered. Units run
//! concurrently on the caller's task and every outcome is kept; the
//! [`ValidationReport`] lists exactly the fields that failed. Fields that
//! hold entities, lists or keyed collections descend into their values,
//! so nested failures are reported under paths like `address.street`.

mod field;
mod reducer;
mod registry;

pub use field::{check_field, FieldOutcome, FieldSpec, NestedCheck, Presence, Scope, Shape};
pub use reducer::{validate_entity, ValidationReducer, ValidationReport};
pub use registry::{ValidatorFn, ValidatorRegistry};
