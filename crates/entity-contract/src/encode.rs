//! Object-map builder used by [`Entity::encode`].

use entity_pack::{Object, PackValue};
use indexmap::IndexMap;

use crate::entity::{encode_entity, Entity};
use crate::scalar::{Scalar, WireEnum};
use crate::wire::{wire_key, WireKeys};
use crate::{CodecOptions, ContractError};

/// Collects the fields of one entity into an [`Object`].
///
/// Writers chain and never fail in place; the first problem (a duplicate
/// wire key or a nested encode failure) is kept and returned by
/// [`MapEncoder::finish`].
pub struct MapEncoder<'a> {
    entity: &'static str,
    keys: WireKeys,
    options: &'a CodecOptions,
    entries: Object,
    error: Option<ContractError>,
}

impl<'a> MapEncoder<'a> {
    pub fn new(entity: &'static str, keys: WireKeys, options: &'a CodecOptions) -> Self {
        Self {
            entity,
            keys,
            options,
            entries: Object::new(),
            error: None,
        }
    }

    pub fn options(&self) -> &'a CodecOptions {
        self.options
    }

    fn put(&mut self, name: &str, value: PackValue) -> &mut Self {
        let key = wire_key(self.keys, name, self.options.remap_wire_keys);
        if self.entries.contains_key(key) {
            self.fail(ContractError::Encode(format!(
                "`{}` writes wire key `{key}` more than once",
                self.entity
            )));
            return self;
        }
        self.entries.insert(key.to_owned(), value);
        self
    }

    fn fail(&mut self, err: ContractError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn nested<E: Entity>(&mut self, name: &str, position: Option<String>, entity: &E) -> PackValue {
        match encode_entity(entity, self.options) {
            Ok(value) => value,
            Err(err) => {
                self.fail(ContractError::nested(name, position, err));
                PackValue::Null
            }
        }
    }

    pub fn scalar<T: Scalar>(&mut self, name: &str, value: &T) -> &mut Self {
        self.put(name, value.to_value())
    }

    /// `None` is written as an explicit null; the key is never omitted.
    pub fn optional<T: Scalar>(&mut self, name: &str, value: Option<&T>) -> &mut Self {
        let value = value.map_or(PackValue::Null, Scalar::to_value);
        self.put(name, value)
    }

    pub fn entity<E: Entity>(&mut self, name: &str, value: &E) -> &mut Self {
        let value = self.nested(name, None, value);
        self.put(name, value)
    }

    pub fn optional_entity<E: Entity>(&mut self, name: &str, value: Option<&E>) -> &mut Self {
        let value = match value {
            Some(entity) => self.nested(name, None, entity),
            None => PackValue::Null,
        };
        self.put(name, value)
    }

    pub fn list<E: Entity>(&mut self, name: &str, items: &[E]) -> &mut Self {
        let items = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.nested(name, Some(format!("[{i}]")), item))
            .collect();
        self.put(name, PackValue::Array(items))
    }

    pub fn scalar_list<T: Scalar>(&mut self, name: &str, items: &[T]) -> &mut Self {
        let items = items.iter().map(Scalar::to_value).collect();
        self.put(name, PackValue::Array(items))
    }

    pub fn keyed<E: Entity>(&mut self, name: &str, entries: &IndexMap<String, E>) -> &mut Self {
        let mut obj = Object::with_capacity(entries.len());
        for (key, item) in entries {
            let value = self.nested(name, Some(format!("[{key:?}]")), item);
            obj.insert(key.clone(), value);
        }
        self.put(name, PackValue::Object(obj))
    }

    pub fn enumeration<T: WireEnum>(&mut self, name: &str, value: &T) -> &mut Self {
        self.put(name, value.to_raw().to_value())
    }

    pub fn optional_enumeration<T: WireEnum>(&mut self, name: &str, value: Option<&T>) -> &mut Self {
        let value = value.map_or(PackValue::Null, |case| case.to_raw().to_value());
        self.put(name, value)
    }

    pub fn finish(self) -> Result<PackValue, ContractError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(PackValue::Object(self.entries)),
        }
    }
}
