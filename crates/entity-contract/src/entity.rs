//! The entity contract and its unvalidated decode/encode entry points.

use entity_pack::PackValue;

use crate::encode::MapEncoder;
use crate::extract::Extractor;
use crate::validate::FieldSpec;
use crate::wire::WireKeys;
use crate::{CodecOptions, ContractError};

/// A record convertible to and from an object [`PackValue`].
///
/// Implementations list their fields in [`Entity::FIELDS`] (used by the
/// validation pass) and read/write them through [`Extractor`] and
/// [`MapEncoder`], which apply [`Entity::WIRE_KEYS`] when remapping is on.
///
/// ```
/// use entity_contract::{Entity, Extractor, FieldSpec, MapEncoder, Shape, ContractError};
///
/// struct Ping {
///     seq: u32,
///     note: Option<String>,
/// }
///
/// impl Entity for Ping {
///     const NAME: &'static str = "Ping";
///     const WIRE_KEYS: entity_contract::WireKeys = &[("seq", "sequence")];
///     const FIELDS: &'static [FieldSpec] = &[
///         FieldSpec::required("seq", Shape::Number),
///         FieldSpec::optional("note", Shape::Str),
///     ];
///
///     fn decode(fields: &Extractor<'_>) -> Result<Self, ContractError> {
///         Ok(Self {
///             seq: fields.required("seq")?,
///             note: fields.optional("note"),
///         })
///     }
///
///     fn encode(&self, out: &mut MapEncoder<'_>) {
///         out.scalar("seq", &self.seq).optional("note", self.note.as_ref());
///     }
/// }
/// ```
pub trait Entity: Sized + 'static {
    const NAME: &'static str;
    const WIRE_KEYS: WireKeys = &[];
    const FIELDS: &'static [FieldSpec];

    fn decode(fields: &Extractor<'_>) -> Result<Self, ContractError>;
    fn encode(&self, out: &mut MapEncoder<'_>);
}

/// Builds `E` from an object value without running field validators.
pub fn decode_entity<E: Entity>(value: &PackValue, options: &CodecOptions) -> Result<E, ContractError> {
    let map = value.as_object().ok_or(ContractError::NotAMap {
        entity: E::NAME,
        found: value.kind(),
    })?;
    E::decode(&Extractor::new(map, E::WIRE_KEYS, options))
}

/// Converts `entity` into an object value.
pub fn encode_entity<E: Entity>(entity: &E, options: &CodecOptions) -> Result<PackValue, ContractError> {
    let mut out = MapEncoder::new(E::NAME, E::WIRE_KEYS, options);
    entity.encode(&mut out);
    out.finish()
}
