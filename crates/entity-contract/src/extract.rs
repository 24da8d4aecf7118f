//! Typed field reads against one object map.

use entity_pack::{Object, PackValue};
use indexmap::IndexMap;

use crate::entity::{decode_entity, Entity};
use crate::scalar::{Scalar, WireEnum};
use crate::wire::{wire_key, WireKeys};
use crate::{CodecOptions, ContractError, ExtractError};

/// Three-way result of looking a field up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Present(&'a PackValue),
    Null,
    Absent,
}

/// Reads fields of one entity out of its object map. Every read resolves
/// the field name through the entity's wire-key table under the pass's
/// [`CodecOptions`].
pub struct Extractor<'a> {
    map: &'a Object,
    keys: WireKeys,
    options: &'a CodecOptions,
}

impl<'a> Extractor<'a> {
    pub fn new(map: &'a Object, keys: WireKeys, options: &'a CodecOptions) -> Self {
        Self { map, keys, options }
    }

    pub fn options(&self) -> &'a CodecOptions {
        self.options
    }

    pub fn wire_key<'n>(&self, name: &'n str) -> &'n str {
        wire_key(self.keys, name, self.options.remap_wire_keys)
    }

    pub fn lookup(&self, name: &str) -> Lookup<'a> {
        match self.map.get(self.wire_key(name)) {
            None => Lookup::Absent,
            Some(PackValue::Null) => Lookup::Null,
            Some(value) => Lookup::Present(value),
        }
    }

    fn raw(&self, name: &str) -> Result<&'a PackValue, ExtractError> {
        let key = self.wire_key(name);
        self.map.get(key).ok_or_else(|| ExtractError::missing(name, key))
    }

    fn incompatible(&self, name: &str, raw: &PackValue, expected: &'static str) -> ExtractError {
        ExtractError::incompatible(name, self.wire_key(name), raw, expected)
    }

    /// Required scalar. Fails when absent or not coercible to `T`.
    pub fn required<T: Scalar>(&self, name: &str) -> Result<T, ExtractError> {
        let raw = self.raw(name)?;
        T::from_value(raw).ok_or_else(|| self.incompatible(name, raw, T::EXPECTED))
    }

    /// Optional scalar: `None` on absence, null or shape mismatch.
    pub fn optional<T: Scalar>(&self, name: &str) -> Option<T> {
        match self.lookup(name) {
            Lookup::Present(raw) => T::from_value(raw),
            Lookup::Null | Lookup::Absent => None,
        }
    }

    pub fn entity<E: Entity>(&self, name: &str) -> Result<E, ContractError> {
        let raw = self.raw(name)?;
        self.nested(name, raw)
    }

    /// `None` when absent, null or not a map; a present map must decode.
    pub fn optional_entity<E: Entity>(&self, name: &str) -> Result<Option<E>, ContractError> {
        match self.lookup(name) {
            Lookup::Present(raw @ PackValue::Object(_)) => self.nested(name, raw).map(Some),
            _ => Ok(None),
        }
    }

    fn nested<E: Entity>(&self, name: &str, raw: &PackValue) -> Result<E, ContractError> {
        if raw.as_object().is_none() {
            return Err(self.incompatible(name, raw, "map").into());
        }
        decode_entity(raw, self.options).map_err(|err| ContractError::nested(name, None, err))
    }

    /// List of entities. A non-list value is an [`ExtractError`]; the first
    /// failing element is reported with its index.
    pub fn list<E: Entity>(&self, name: &str) -> Result<Vec<E>, ContractError> {
        let raw = self.raw(name)?;
        self.decode_list(name, raw)
    }

    pub fn optional_list<E: Entity>(&self, name: &str) -> Result<Option<Vec<E>>, ContractError> {
        match self.lookup(name) {
            Lookup::Present(raw @ PackValue::Array(_)) => self.decode_list(name, raw).map(Some),
            _ => Ok(None),
        }
    }

    fn decode_list<E: Entity>(&self, name: &str, raw: &PackValue) -> Result<Vec<E>, ContractError> {
        let items = raw
            .as_array()
            .ok_or_else(|| self.incompatible(name, raw, "list"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                decode_entity(item, self.options)
                    .map_err(|err| ContractError::nested(name, Some(format!("[{i}]")), err))
            })
            .collect()
    }

    /// List of scalars, e.g. `Vec<String>`.
    pub fn scalar_list<T: Scalar>(&self, name: &str) -> Result<Vec<T>, ContractError> {
        let raw = self.raw(name)?;
        let items = raw
            .as_array()
            .ok_or_else(|| self.incompatible(name, raw, "list"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::from_value(item).ok_or_else(|| {
                    let err = self.incompatible(name, item, T::EXPECTED);
                    ContractError::nested(name, Some(format!("[{i}]")), err.into())
                })
            })
            .collect()
    }

    /// String-keyed collection of entities, in wire order.
    pub fn keyed<E: Entity>(&self, name: &str) -> Result<IndexMap<String, E>, ContractError> {
        let raw = self.raw(name)?;
        self.decode_keyed(name, raw)
    }

    pub fn optional_keyed<E: Entity>(
        &self,
        name: &str,
    ) -> Result<Option<IndexMap<String, E>>, ContractError> {
        match self.lookup(name) {
            Lookup::Present(raw @ PackValue::Object(_)) => self.decode_keyed(name, raw).map(Some),
            _ => Ok(None),
        }
    }

    fn decode_keyed<E: Entity>(
        &self,
        name: &str,
        raw: &PackValue,
    ) -> Result<IndexMap<String, E>, ContractError> {
        let entries = raw
            .as_object()
            .ok_or_else(|| self.incompatible(name, raw, "map"))?;
        entries
            .iter()
            .map(|(key, item)| {
                decode_entity(item, self.options)
                    .map(|entity| (key.clone(), entity))
                    .map_err(|err| ContractError::nested(name, Some(format!("[{key:?}]")), err))
            })
            .collect()
    }

    /// Enumeration: the raw representation is read first, then matched.
    /// An absent field and an unknown raw value are distinct causes.
    pub fn enumeration<T: WireEnum>(&self, name: &str) -> Result<T, ExtractError> {
        let raw = self.raw(name)?;
        self.match_case(name, raw)
    }

    /// `None` when absent or null; a present value must be a known case.
    pub fn optional_enumeration<T: WireEnum>(&self, name: &str) -> Result<Option<T>, ExtractError> {
        match self.lookup(name) {
            Lookup::Present(raw) => self.match_case(name, raw).map(Some),
            Lookup::Null | Lookup::Absent => Ok(None),
        }
    }

    fn match_case<T: WireEnum>(&self, name: &str, raw: &PackValue) -> Result<T, ExtractError> {
        let repr = T::Raw::from_value(raw).ok_or_else(|| self.incompatible(name, raw, T::Raw::EXPECTED))?;
        T::from_raw(repr).ok_or_else(|| ExtractError::unknown_case(name, self.wire_key(name), raw))
    }
}
