//! Per-entity, per-field custom validators, registered before serving.

use std::any::TypeId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use entity_pack::PackValue;
use futures::future::{BoxFuture, FutureExt};
use tracing::warn;

use crate::entity::Entity;
use crate::{ContractError, RejectionCode};

/// Custom content check for one field. `Some(code)` rejects the value.
pub type ValidatorFn =
    Arc<dyn Fn(PackValue) -> BoxFuture<'static, Option<RejectionCode>> + Send + Sync>;

/// Custom validators keyed by entity type and field name.
///
/// Filled once at startup, then moved into an
/// [`EntityCodec`](crate::EntityCodec) which holds it behind an `Arc`;
/// there is no way to register after that.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TypeId, HashMap<&'static str, ValidatorFn>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for `E`'s field `field`. The field must be
    /// declared in `E::FIELDS` and must not already have a validator.
    pub fn register<E, F, Fut>(&mut self, field: &str, validator: F) -> Result<&mut Self, ContractError>
    where
        E: Entity,
        F: Fn(PackValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<RejectionCode>> + Send + 'static,
    {
        let Some(spec) = E::FIELDS.iter().find(|spec| spec.name == field) else {
            warn!(entity = E::NAME, field, "validator for undeclared field rejected");
            return Err(ContractError::Configuration(format!(
                "`{}` declares no field `{field}`",
                E::NAME
            )));
        };
        let fields = self.validators.entry(TypeId::of::<E>()).or_default();
        if fields.contains_key(spec.name) {
            warn!(entity = E::NAME, field, "duplicate validator rejected");
            return Err(ContractError::Configuration(format!(
                "validator for `{}.{field}` is already registered",
                E::NAME
            )));
        }
        let boxed: ValidatorFn = Arc::new(move |value: PackValue| validator(value).boxed());
        fields.insert(spec.name, boxed);
        Ok(self)
    }

    pub fn get<E: Entity>(&self, field: &str) -> Option<ValidatorFn> {
        self.validators
            .get(&TypeId::of::<E>())
            .and_then(|fields| fields.get(field))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.validators.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.len())
            .finish()
    }
}
