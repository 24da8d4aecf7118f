//! Process-level configuration, loaded once and then read-only.

use entity_pack::ContentType;
use serde::Deserialize;

use crate::ContractError;

/// Settings read at startup, usually from a TOML file:
///
/// ```toml
/// remap_wire_keys = true
/// default_locale = "en"
/// accept = ["binary-map", "application/json"]
/// respond_with = "binary-map"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    pub remap_wire_keys: bool,
    pub default_locale: String,
    pub accept: Vec<ContentType>,
    pub respond_with: ContentType,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            remap_wire_keys: true,
            default_locale: "en".to_owned(),
            accept: vec![ContentType::BinaryMap, ContentType::Json],
            respond_with: ContentType::BinaryMap,
        }
    }
}

impl ContractConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ContractError> {
        let config: ContractConfig =
            toml::from_str(source).map_err(|err| ContractError::Configuration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every exchange fail.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.accept.is_empty() {
            return Err(ContractError::Configuration(
                "`accept` must list at least one content type".into(),
            ));
        }
        if let Some(reserved) = self.accept.iter().find(|ct| ct.is_reserved()) {
            return Err(ContractError::Configuration(format!(
                "`accept` lists reserved content type {reserved}"
            )));
        }
        if self.respond_with.is_reserved() {
            return Err(ContractError::Configuration(format!(
                "`respond_with` is reserved content type {}",
                self.respond_with
            )));
        }
        if self.default_locale.trim().is_empty() {
            return Err(ContractError::Configuration(
                "`default_locale` must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            remap_wire_keys: self.remap_wire_keys,
        }
    }
}

/// Options threaded through every decode/encode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Apply each entity's wire-key override table. When off, wire keys
    /// equal field names.
    pub remap_wire_keys: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            remap_wire_keys: true,
        }
    }
}

impl CodecOptions {
    pub fn without_remapping() -> Self {
        Self {
            remap_wire_keys: false,
        }
    }
}
