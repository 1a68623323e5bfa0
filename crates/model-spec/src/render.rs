use serde_json::{Map, Value, json};

use crate::spec::{FieldSpec, ModelSpec};

/// Section title used for fields that declare no group.
const CONTENT_SECTION: &str = "Content";

/// Editor section with its fields, in model order.
struct Section<'a> {
    name: Option<&'a str>,
    label: &'a str,
    icon: Option<&'a str>,
    fields: Vec<&'a FieldSpec>,
}

fn sections(model: &ModelSpec) -> Vec<Section<'_>> {
    let mut sections = Vec::new();

    let ungrouped = model.fields_in_group(None).collect::<Vec<_>>();
    if !ungrouped.is_empty() {
        sections.push(Section {
            name: None,
            label: CONTENT_SECTION,
            icon: None,
            fields: ungrouped,
        });
    }

    for group in &model.field_groups {
        sections.push(Section {
            name: Some(group.name.as_str()),
            label: group.label.as_str(),
            icon: group.icon.as_deref(),
            fields: model.fields_in_group(Some(group.name.as_str())).collect(),
        });
    }

    sections
}

/// Describe the model as a JSON structure grouped by editor section.
pub fn render_json_ui(model: &ModelSpec) -> Value {
    let groups = sections(model)
        .into_iter()
        .map(|section| {
            json!({
                "name": section.name,
                "label": section.label,
                "icon": section.icon,
                "fields": section.fields.iter().map(|field| field_json(field)).collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "name": model.name,
        "label": model.label,
        "type": model.kind,
        "label_field": model.label_field,
        "groups": groups,
    })
}

fn field_json(field: &FieldSpec) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(field.name.clone()));
    map.insert("label".into(), Value::String(field.label.clone()));
    map.insert("type".into(), Value::String(field.kind.as_str().into()));
    map.insert("required".into(), Value::Bool(field.required));
    map.insert(
        "description".into(),
        field
            .description
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    if let Some(default) = &field.default_value {
        map.insert("default".into(), default.clone());
    }
    if let Some(control) = &field.control_type {
        map.insert("control".into(), Value::String(control.as_str().into()));
    }
    if field.options.is_some() {
        map.insert(
            "options".into(),
            Value::Array(field.option_values().map(|value| json!(value)).collect()),
        );
    }
    if field.has_number_attributes() {
        map.insert(
            "range".into(),
            json!({
                "min": field.min,
                "max": field.max,
                "step": field.step,
                "unit": field.unit,
            }),
        );
    }
    if let Some(condition) = &field.display_condition {
        map.insert(
            "display_condition".into(),
            Value::String(condition.as_str().into()),
        );
    }
    if let Some(validation) = &field.validation {
        map.insert(
            "validation_message".into(),
            Value::String(validation.message.clone()),
        );
    }
    Value::Object(map)
}

/// Describe the model as human-friendly text.
pub fn render_text(model: &ModelSpec) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Model: {} ({})", model.label, model.name));
    if let Some(label_field) = &model.label_field {
        lines.push(format!("Label field: {}", label_field));
    }

    for section in sections(model) {
        match section.icon {
            Some(icon) => lines.push(format!("{} [{}]:", section.label, icon)),
            None => lines.push(format!("{}:", section.label)),
        }
        for field in section.fields {
            let mut entry = format!(" - {} ({}) {}", field.name, field.label, field.kind);
            if field.required {
                entry.push_str(" [required]");
            }
            if let Some(default) = &field.default_value {
                entry.push_str(&format!(" = {}", default));
            }
            lines.push(entry);
            if field.options.is_some() {
                lines.push(format!(
                    "   options: {}",
                    field.option_values().collect::<Vec<_>>().join(", ")
                ));
            }
            if let (Some(min), Some(max)) = (field.min, field.max) {
                lines.push(format!(
                    "   range: {}..={}{}",
                    min,
                    max,
                    field.unit.as_deref().unwrap_or_default()
                ));
            }
            if let Some(condition) = &field.display_condition {
                lines.push(format!("   shown when: {}", condition.as_str()));
            }
        }
    }

    lines.join("\n")
}
