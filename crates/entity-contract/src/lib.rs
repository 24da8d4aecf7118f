//! Entity contracts over the generic [`PackValue`](entity_pack::PackValue)
//! model.
//!
//! An [`Entity`] declares its fields and reads/writes them through an
//! [`Extractor`] and a [`MapEncoder`]. [`EntityCodec`] runs the validated
//! path: every declared field is checked concurrently, failures are
//! gathered into one [`DecodeError`], and only then is the entity built.
//! Packing to bytes is delegated to `entity-pack`.

mod config;
mod context;
mod encode;
mod entity;
mod error;
mod extract;
mod identifier;
mod pipeline;
mod scalar;
mod wire;

pub mod validate;

pub use config::{CodecOptions, ContractConfig};
pub use context::{RequestContext, TransportKind};
pub use encode::MapEncoder;
pub use entity::{decode_entity, encode_entity, Entity};
pub use error::{
    ContractError, DecodeError, ErrorCategory, ErrorDescriptor, ExtractCause, ExtractError,
    HandlerError, RejectionCode,
};
pub use extract::{Extractor, Lookup};
pub use identifier::Identifier;
pub use pipeline::{EntityCodec, Handler};
pub use scalar::{Scalar, WireEnum};
pub use validate::{FieldSpec, Presence, Shape, ValidationReport, ValidatorRegistry};
pub use wire::{wire_key, WireKeys};

pub use entity_pack::{ContentType, PackError, PackValue, ValueKind};
