//! Structural consistency checks for model descriptors.

use std::collections::HashSet;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::spec::{FieldSpec, FieldType, ModelSpec};

/// A configuration error in a model descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelIssue {
    #[error("model name cannot be empty")]
    EmptyModelName,
    #[error("field name cannot be empty")]
    EmptyFieldName,
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("field group '{0}' is declared more than once")]
    DuplicateGroup(String),
    #[error("field '{field}' references undeclared group '{group}'")]
    UnknownGroup { field: String, group: String },
    #[error("labelField '{0}' does not name a field")]
    UnknownLabelField(String),
    #[error("enum field '{0}' declares no options")]
    MissingOptions(String),
    #[error("enum field '{field}' lists option '{value}' more than once")]
    DuplicateOption { field: String, value: String },
    #[error("{kind} field '{field}' cannot declare {attribute}")]
    MisplacedAttribute {
        field: String,
        kind: FieldType,
        attribute: &'static str,
    },
    #[error("field '{field}' has min {min} greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },
    #[error("field '{0}' must use a positive step")]
    InvalidStep(String),
    #[error("field '{field}' has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },
    #[error("default of field '{field}' is invalid: {reason}")]
    InvalidDefault { field: String, reason: String },
}

/// Run every structural rule against `model`.
pub fn check_model(model: &ModelSpec) -> Vec<ModelIssue> {
    let mut issues = Vec::new();

    if model.name.trim().is_empty() {
        issues.push(ModelIssue::EmptyModelName);
    }

    let mut groups = HashSet::new();
    for group in &model.field_groups {
        if !groups.insert(group.name.as_str()) {
            issues.push(ModelIssue::DuplicateGroup(group.name.clone()));
        }
    }

    let mut names = HashSet::new();
    for field in &model.fields {
        if field.name.trim().is_empty() {
            issues.push(ModelIssue::EmptyFieldName);
        } else if !names.insert(field.name.as_str()) {
            issues.push(ModelIssue::DuplicateField(field.name.clone()));
        }

        if let Some(group) = &field.group
            && !groups.contains(group.as_str())
        {
            issues.push(ModelIssue::UnknownGroup {
                field: field.name.clone(),
                group: group.clone(),
            });
        }

        check_field(field, &mut issues);
    }

    if let Some(label_field) = &model.label_field
        && !names.contains(label_field.as_str())
    {
        issues.push(ModelIssue::UnknownLabelField(label_field.clone()));
    }

    tracing::debug!(model = %model.name, issues = issues.len(), "checked model");
    issues
}

fn check_field(field: &FieldSpec, issues: &mut Vec<ModelIssue>) {
    let misplaced = |attribute: &'static str| ModelIssue::MisplacedAttribute {
        field: field.name.clone(),
        kind: field.kind,
        attribute,
    };

    match &field.options {
        Some(options) if field.kind == FieldType::Enum => {
            if options.is_empty() {
                issues.push(ModelIssue::MissingOptions(field.name.clone()));
            }
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option.value.as_str()) {
                    issues.push(ModelIssue::DuplicateOption {
                        field: field.name.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }
        Some(_) => issues.push(misplaced("options")),
        None if field.kind == FieldType::Enum => {
            issues.push(ModelIssue::MissingOptions(field.name.clone()));
        }
        None => {}
    }

    if field.kind == FieldType::Number {
        if let (Some(min), Some(max)) = (field.min, field.max)
            && min > max
        {
            issues.push(ModelIssue::InvalidRange {
                field: field.name.clone(),
                min,
                max,
            });
        }
        if let Some(step) = field.step
            && step <= 0.0
        {
            issues.push(ModelIssue::InvalidStep(field.name.clone()));
        }
    } else if field.has_number_attributes() {
        issues.push(misplaced("min/max/step/unit"));
    }

    let mut pattern = None;
    if let Some(validation) = &field.validation {
        if let Some(source) = &validation.pattern {
            if field.kind != FieldType::String {
                issues.push(misplaced("a pattern"));
            }
            match Regex::new(source) {
                Ok(regex) => pattern = Some(regex),
                Err(err) => issues.push(ModelIssue::InvalidPattern {
                    field: field.name.clone(),
                    reason: err.to_string(),
                }),
            }
        }
        if validation.has_upload_rules() && field.kind != FieldType::Image {
            issues.push(misplaced("upload rules"));
        }
    }

    if let Some(default) = &field.default_value
        && let Err(reason) = check_default(field, default, pattern.as_ref())
    {
        issues.push(ModelIssue::InvalidDefault {
            field: field.name.clone(),
            reason,
        });
    }
}

fn check_default(
    field: &FieldSpec,
    default: &Value,
    pattern: Option<&Regex>,
) -> Result<(), String> {
    match field.kind {
        FieldType::String | FieldType::Image => {
            let text = default.as_str().ok_or("expected a string")?;
            if let Some(regex) = pattern
                && !regex.is_match(text)
            {
                return Err(format!("'{}' does not match the field pattern", text));
            }
            Ok(())
        }
        FieldType::Boolean => default
            .is_boolean()
            .then_some(())
            .ok_or_else(|| "expected a boolean".into()),
        FieldType::Number => {
            let number = default.as_f64().ok_or("expected a number")?;
            let below = field.min.is_some_and(|min| number < min);
            let above = field.max.is_some_and(|max| number > max);
            if below || above {
                return Err(format!("{} is outside the allowed range", number));
            }
            Ok(())
        }
        FieldType::Enum => {
            let text = default.as_str().ok_or("expected a string")?;
            if field.option_values().any(|value| value == text) {
                Ok(())
            } else {
                Err(format!("'{}' is not one of the declared options", text))
            }
        }
        FieldType::Object => default
            .is_object()
            .then_some(())
            .ok_or_else(|| "expected an object".into()),
    }
}
