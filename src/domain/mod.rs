pub mod model_kind;
pub mod petstore_model;
