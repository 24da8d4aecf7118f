//! Decode/validate/encode steps around a business handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use entity_pack::{ContentType, PackValue};
use tracing::debug;

use crate::context::RequestContext;
use crate::entity::{decode_entity, encode_entity, Entity};
use crate::validate::{validate_entity, ValidationReport, ValidatorRegistry};
use crate::{CodecOptions, ContractConfig, ContractError, DecodeError, HandlerError};

/// Business logic invoked with a decoded, validated request.
#[async_trait]
pub trait Handler<Req, Resp>: Send + Sync {
    async fn handle(&self, request: Req, context: &RequestContext) -> Result<Resp, HandlerError>;
}

/// Shared, read-only codec state: options, the frozen validator registry
/// and the configured content negotiation defaults. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EntityCodec {
    options: CodecOptions,
    validators: Arc<ValidatorRegistry>,
    accept: Arc<[ContentType]>,
    respond_with: ContentType,
    default_locale: Arc<str>,
}

impl EntityCodec {
    pub fn new(config: &ContractConfig, validators: ValidatorRegistry) -> Result<Self, ContractError> {
        config.validate()?;
        Ok(Self {
            options: config.codec_options(),
            validators: Arc::new(validators),
            accept: config.accept.as_slice().into(),
            respond_with: config.respond_with,
            default_locale: config.default_locale.as_str().into(),
        })
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn accept(&self) -> &[ContentType] {
        &self.accept
    }

    pub fn respond_with(&self) -> ContentType {
        self.respond_with
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// A local context in the configured default locale.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(&*self.default_locale)
    }

    fn locale<'a>(&'a self, locale: &'a str) -> &'a str {
        if locale.is_empty() {
            &self.default_locale
        } else {
            locale
        }
    }

    pub async fn validate<E: Entity>(
        &self,
        value: &PackValue,
        locale: &str,
    ) -> Result<ValidationReport, ContractError> {
        validate_entity::<E>(value, &self.options, &self.validators, self.locale(locale)).await
    }

    /// Validates every field, then constructs `E`. A non-empty report is
    /// returned whole as [`ContractError::Decode`]; a field-level failure
    /// during construction is reported the same way.
    pub async fn decode<E: Entity>(&self, value: &PackValue, locale: &str) -> Result<E, ContractError> {
        let locale = self.locale(locale);
        self.validate::<E>(value, locale).await?.into_result(E::NAME)?;
        decode_entity::<E>(value, &self.options).map_err(|err| {
            let Some((path, descriptor)) = err.field_error(locale) else {
                return err;
            };
            debug!(
                entity = E::NAME,
                field = %path,
                category = %descriptor.category,
                "construction failed after validation"
            );
            let mut errors = BTreeMap::new();
            errors.insert(path, vec![descriptor]);
            ContractError::Decode(DecodeError {
                entity: E::NAME,
                errors,
            })
        })
    }

    pub fn encode<E: Entity>(&self, entity: &E) -> Result<PackValue, ContractError> {
        encode_entity(entity, &self.options)
    }

    pub async fn unpack<E: Entity>(
        &self,
        bytes: &[u8],
        format: ContentType,
        allowed: &[ContentType],
        locale: &str,
    ) -> Result<E, ContractError> {
        let value = entity_pack::unpack(bytes, format, allowed)?;
        self.decode::<E>(&value, locale).await
    }

    pub fn pack<E: Entity>(&self, entity: &E, format: ContentType) -> Result<Vec<u8>, ContractError> {
        let value = self.encode(entity)?;
        Ok(entity_pack::pack(&value, format)?)
    }

    /// Full request cycle on the caller's task: unpack, validate and decode
    /// the request, run `handler`, then encode and pack its response.
    pub async fn serve<Req, Resp, H>(
        &self,
        handler: &H,
        bytes: &[u8],
        request_format: ContentType,
        allowed: &[ContentType],
        response_format: ContentType,
        context: &RequestContext,
    ) -> Result<Vec<u8>, ContractError>
    where
        Req: Entity,
        Resp: Entity,
        H: Handler<Req, Resp> + ?Sized,
    {
        debug!(
            request = Req::NAME,
            format = %request_format,
            bytes = bytes.len(),
            transport = %context.transport,
            "decoding request"
        );
        let request = self
            .unpack::<Req>(bytes, request_format, allowed, &context.locale)
            .await?;
        let response = handler
            .handle(request, context)
            .await
            .map_err(ContractError::Handler)?;
        debug!(response = Resp::NAME, format = %response_format, "encoding response");
        self.pack(&response, response_format)
    }

    /// [`EntityCodec::serve`] with the configured allow-list and response
    /// format.
    pub async fn respond<Req, Resp, H>(
        &self,
        handler: &H,
        bytes: &[u8],
        request_format: ContentType,
        context: &RequestContext,
    ) -> Result<Vec<u8>, ContractError>
    where
        Req: Entity,
        Resp: Entity,
        H: Handler<Req, Resp> + ?Sized,
    {
        self.serve(
            handler,
            bytes,
            request_format,
            &self.accept,
            self.respond_with,
            context,
        )
        .await
    }
}
