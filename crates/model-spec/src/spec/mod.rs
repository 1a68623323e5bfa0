pub mod field;
pub mod model;

pub use field::{ControlType, DisplayCondition, EnumOption, FieldSpec, FieldType, Validation};
pub use model::{FieldGroup, ModelSpec, ModelType};

use serde_json::Value;

/// JSON Schema of the model descriptor format itself.
pub fn descriptor_schema() -> Value {
    schemars::schema_for!(ModelSpec).into()
}
