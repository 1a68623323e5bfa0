use std::{
    collections::{BTreeSet, HashMap},
    sync::{LazyLock, Mutex, PoisonError},
};

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::{FieldSpec, FieldType, ModelSpec};

/// A single rule violation for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field: String,
    pub path: String,
    pub message: String,
    pub code: String,
}

/// Outcome of validating a stored model instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

/// File metadata of an image upload awaiting acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub mime_type: String,
    pub size: u64,
}

impl Upload {
    pub fn new(mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Apply every declared rule of `model` to an instance object.
///
/// Absent and `null` values count as unset. Keys the model does not declare
/// are reported in `unknown_fields`. A non-object instance is a single
/// `type_mismatch` at `/`.
pub fn validate(model: &ModelSpec, instance: &Value) -> ValidationResult {
    let Some(values) = instance.as_object() else {
        tracing::debug!(model = %model.name, "instance is not an object");
        return ValidationResult {
            valid: false,
            errors: vec![ValidationError {
                field: String::new(),
                path: "/".into(),
                message: "instance must be an object".into(),
                code: "type_mismatch".into(),
            }],
            missing_required: Vec::new(),
            unknown_fields: Vec::new(),
        };
    };

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for field in &model.fields {
        match values.get(&field.name).filter(|value| !value.is_null()) {
            None => {
                if field.required {
                    missing_required.push(field.name.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_field(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    let declared: BTreeSet<&str> = model.fields.iter().map(|field| field.name.as_str()).collect();
    let unknown_fields: Vec<String> = values
        .keys()
        .filter(|key| !declared.contains(key.as_str()))
        .cloned()
        .collect();

    let valid = errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty();
    tracing::debug!(
        model = %model.name,
        valid,
        errors = errors.len(),
        missing = missing_required.len(),
        unknown = unknown_fields.len(),
        "validated instance"
    );

    ValidationResult {
        valid,
        errors,
        missing_required,
        unknown_fields,
    }
}

/// Check one stored value against its field's type and rules.
pub fn validate_field(field: &FieldSpec, value: &Value) -> Option<ValidationError> {
    if !matches_type(field.kind, value) {
        return Some(field_error(field, "type mismatch", "type_mismatch"));
    }

    if let Some(validation) = &field.validation
        && let Some(pattern) = &validation.pattern
        && let Some(text) = value.as_str()
    {
        match compiled_pattern(pattern) {
            Ok(regex) if !regex.is_match(text) => {
                return Some(field_error(field, &validation.message, "pattern_mismatch"));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(field = %field.name, %err, "field pattern does not compile");
                return Some(field_error(
                    field,
                    "field pattern does not compile",
                    "invalid_pattern",
                ));
            }
        }
    }

    if field.kind == FieldType::Enum
        && let Some(text) = value.as_str()
        && !field.option_values().any(|option| option == text)
    {
        return Some(field_error(field, "invalid enum option", "enum_mismatch"));
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = field.min
            && number < min
        {
            return Some(field_error(field, "value below minimum", "min"));
        }
        if let Some(max) = field.max
            && number > max
        {
            return Some(field_error(field, "value above maximum", "max"));
        }
        if let Some(step) = field.step
            && !on_step(number, field.min.unwrap_or(0.0), step)
        {
            return Some(field_error(field, "value is not a multiple of step", "step"));
        }
    }

    None
}

/// Apply an image field's upload rules (MIME allow-list and size ceiling).
///
/// Fields without upload rules accept any file.
pub fn validate_upload(field: &FieldSpec, upload: &Upload) -> Result<(), ValidationError> {
    let Some(validation) = &field.validation else {
        return Ok(());
    };

    if !validation.accept.is_empty()
        && !validation
            .accept
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&upload.mime_type))
    {
        return Err(field_error(field, &validation.message, "mime_type"));
    }

    if let Some(max_size) = validation.max_size
        && upload.size > max_size
    {
        return Err(field_error(field, &validation.message, "max_size"));
    }

    Ok(())
}

static PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern` once per process; failures are not cached.
fn compiled_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let mut patterns = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = patterns.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern)?;
    patterns.insert(pattern.to_owned(), regex.clone());
    Ok(regex)
}

/// Whether `number` lies on the grid `base + k * step`.
fn on_step(number: f64, base: f64, step: f64) -> bool {
    if step <= 0.0 {
        return true;
    }
    let steps = (number - base) / step;
    (steps - steps.round()).abs() < 1e-9
}

fn matches_type(kind: FieldType, value: &Value) -> bool {
    match kind {
        FieldType::String | FieldType::Enum | FieldType::Image => value.is_string(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Number => value.is_number(),
        FieldType::Object => value.is_object(),
    }
}

fn field_error(field: &FieldSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        field: field.name.clone(),
        path: format!("/{}", field.name),
        message: message.into(),
        code: code.into(),
    }
}
