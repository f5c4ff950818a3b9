//! JSON codec for the Swagger Petstore client models.
//!
//! Payloads are decoded by kind name (`"pet"`, `"Order"`, ...) through a closed lookup table.
//! Names outside the table fall back to an untyped `serde_json::Value`.

pub mod domain;
pub mod providers;

pub use crate::domain::model_kind::resolve_list_kind;
pub use crate::domain::model_kind::resolve_object_kind;
pub use crate::domain::model_kind::Decoded;
pub use crate::domain::model_kind::JsonModel;
pub use crate::domain::model_kind::Model;
pub use crate::domain::model_kind::ModelKind;
pub use crate::domain::model_kind::Shape;
pub use crate::domain::model_kind::TypeDescriptor;
pub use crate::domain::petstore_model::Category;
pub use crate::domain::petstore_model::Order;
pub use crate::domain::petstore_model::OrderStatus;
pub use crate::domain::petstore_model::Pet;
pub use crate::domain::petstore_model::PetStatus;
pub use crate::domain::petstore_model::Tag;
pub use crate::domain::petstore_model::User;
pub use crate::providers::date_format::format_timestamp;
pub use crate::providers::date_format::parse_timestamp;
pub use crate::providers::date_format::DATE_FORMAT;
pub use crate::providers::json::JsonCodecConfig;
pub use crate::providers::json::JsonCodecConfigError;
pub use crate::providers::json::JsonCodecError;
pub use crate::providers::json::JsonCodecImpl;
