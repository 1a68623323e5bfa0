use serde_json::{Map, Value, json};

use crate::spec::{FieldSpec, FieldType, ModelSpec};

const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Build a JSON Schema describing stored instances of `model`.
pub fn generate(model: &ModelSpec) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &model.fields {
        properties.insert(field.name.clone(), field_schema(field));
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
    }

    json!({
        "$schema": SCHEMA_DIALECT,
        "title": model.label,
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = Map::new();
    schema.insert("title".into(), Value::String(field.label.clone()));
    if let Some(description) = &field.description {
        schema.insert("description".into(), Value::String(description.clone()));
    }

    match field.kind {
        FieldType::String => {
            schema.insert("type".into(), json!("string"));
            if let Some(pattern) = field
                .validation
                .as_ref()
                .and_then(|validation| validation.pattern.clone())
            {
                schema.insert("pattern".into(), Value::String(pattern));
            }
        }
        FieldType::Boolean => {
            schema.insert("type".into(), json!("boolean"));
        }
        FieldType::Number => {
            schema.insert("type".into(), json!("number"));
            if let Some(min) = field.min {
                schema.insert("minimum".into(), json!(min));
            }
            if let Some(max) = field.max {
                schema.insert("maximum".into(), json!(max));
            }
            // Only exact when the grid starts at zero.
            if let Some(step) = field.step
                && step > 0.0
                && field.min.unwrap_or(0.0) == 0.0
            {
                schema.insert("multipleOf".into(), json!(step));
            }
        }
        FieldType::Enum => {
            schema.insert("type".into(), json!("string"));
            schema.insert(
                "enum".into(),
                Value::Array(field.option_values().map(|value| json!(value)).collect()),
            );
        }
        FieldType::Image => {
            schema.insert("type".into(), json!("string"));
            schema.insert("format".into(), json!("uri-reference"));
        }
        FieldType::Object => {
            schema.insert("type".into(), json!("object"));
        }
    }

    if let Some(default) = &field.default_value {
        schema.insert("default".into(), default.clone());
    }

    Value::Object(schema)
}
