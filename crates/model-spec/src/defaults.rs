use serde_json::{Map, Value};

use crate::spec::ModelSpec;

/// Instance object holding every declared default of `model`.
pub fn generate(model: &ModelSpec) -> Value {
    let values = model
        .fields
        .iter()
        .filter_map(|field| {
            field
                .default_value
                .clone()
                .map(|value| (field.name.clone(), value))
        })
        .collect::<Map<String, Value>>();
    Value::Object(values)
}
