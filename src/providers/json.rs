use crate::domain::model_kind::resolve_list_kind;
use crate::domain::model_kind::resolve_object_kind;
use crate::domain::model_kind::Decoded;
use crate::domain::model_kind::JsonModel;
use crate::domain::model_kind::Model;
use crate::domain::model_kind::Shape;
use crate::domain::model_kind::TypeDescriptor;
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::env;
use thiserror::Error;

pub const SERIALIZE_NULLS_ENV: &str = "JSON_SERIALIZE_NULLS";
pub const PRETTY_PRINT_ENV: &str = "JSON_PRETTY_PRINT";

#[derive(Debug, Error)]
pub enum JsonCodecError {
    #[error("error encoding value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("error decoding {target}: {source}")]
    Decode {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonCodecConfigError {
    #[error("{name} must be true or false, got {value:?}")]
    InvalidFlag { name: String, value: String },
}

/// Formatting options shared by every call on one codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JsonCodecConfig {
    /// Write `None` members as explicit `null` instead of leaving them out.
    /// When off, values go through `serde_json::Value` first, which rejects
    /// integers outside the `i64`/`u64` range (such as a large `u128`).
    pub serialize_nulls: bool,
    pub pretty_print: bool,
}

impl Default for JsonCodecConfig {
    fn default() -> Self {
        Self {
            serialize_nulls: true,
            pretty_print: false,
        }
    }
}

impl JsonCodecConfig {
    pub fn from_env() -> Result<Self, JsonCodecConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from `lookup`, keeping the default for every unset flag.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JsonCodecConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            serialize_nulls: parse_flag(SERIALIZE_NULLS_ENV, lookup(SERIALIZE_NULLS_ENV))?
                .unwrap_or(defaults.serialize_nulls),
            pretty_print: parse_flag(PRETTY_PRINT_ENV, lookup(PRETTY_PRINT_ENV))?
                .unwrap_or(defaults.pretty_print),
        })
    }
}

fn parse_flag(name: &str, value: Option<String>) -> Result<Option<bool>, JsonCodecConfigError> {
    match value {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(JsonCodecConfigError::InvalidFlag {
                name: name.to_string(),
                value: raw,
            }),
        },
        None => Ok(None),
    }
}

#[derive(Clone, Debug, Default)]
pub struct JsonCodecImpl {
    config: JsonCodecConfig,
}

impl JsonCodecImpl {
    pub fn new(config: JsonCodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JsonCodecConfig {
        &self.config
    }
}

impl JsonCodecImpl {
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, JsonCodecError> {
        let result = if self.config.serialize_nulls {
            self.write(value)
        } else {
            serde_json::to_value(value).and_then(|mut tree| {
                strip_null_members(&mut tree);
                self.write(&tree)
            })
        };

        result.map_err(JsonCodecError::Encode)
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.config.pretty_print {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

// Null array elements are kept, only object members are dropped
fn strip_null_members(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(strip_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_null_members),
        _ => {}
    }
}

impl JsonCodecImpl {
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T, JsonCodecError> {
        serde_json::from_str(text).map_err(|source| JsonCodecError::Decode {
            target: std::any::type_name::<T>().to_string(),
            source,
        })
    }

    pub fn deserialize_as<M: JsonModel>(&self, text: &str) -> Result<M, JsonCodecError> {
        serde_json::from_str(text).map_err(|source| JsonCodecError::Decode {
            target: M::KIND.name().to_string(),
            source,
        })
    }

    pub fn deserialize_list_as<M: JsonModel>(&self, text: &str) -> Result<Vec<M>, JsonCodecError> {
        let descriptor = TypeDescriptor {
            shape: Shape::List,
            kind: M::KIND,
        };

        serde_json::from_str(text).map_err(|source| decode_error(&descriptor, source))
    }
}

impl JsonCodecImpl {
    /// Decodes `text` as a single value of the kind named by `kind_name`.
    /// Unrecognized names decode into `Model::Untyped`.
    pub fn deserialize_to_object(
        &self,
        text: &str,
        kind_name: &str,
    ) -> Result<Model, JsonCodecError> {
        let descriptor = resolve_object_kind(kind_name);
        trace!("decoding {} from {} bytes", descriptor, text.len());

        (descriptor.kind.decoder().decode_one)(text)
            .map_err(|source| decode_error(&descriptor, source))
    }

    /// Decodes `text` as a JSON array whose elements are of the kind named by `kind_name`.
    pub fn deserialize_to_list(
        &self,
        text: &str,
        kind_name: &str,
    ) -> Result<Vec<Model>, JsonCodecError> {
        let descriptor = resolve_list_kind(kind_name);
        trace!("decoding {} from {} bytes", descriptor, text.len());

        (descriptor.kind.decoder().decode_list)(text)
            .map_err(|source| decode_error(&descriptor, source))
    }

    pub fn decode(
        &self,
        descriptor: TypeDescriptor,
        text: &str,
    ) -> Result<Decoded, JsonCodecError> {
        trace!("decoding {} from {} bytes", descriptor, text.len());

        descriptor
            .decode(text)
            .map_err(|source| decode_error(&descriptor, source))
    }
}

fn decode_error(descriptor: &TypeDescriptor, source: serde_json::Error) -> JsonCodecError {
    JsonCodecError::Decode {
        target: descriptor.to_string(),
        source,
    }
}
