use std::{borrow::Cow, fmt};

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of field kinds understood by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Number,
    Enum,
    Image,
    Object,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::Enum => "enum",
            FieldType::Image => "image",
            FieldType::Object => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor widget hint for a field.
///
/// Control names the host adds beyond the known ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlType {
    ButtonGroup,
    Slider,
    Other(String),
}

impl ControlType {
    pub fn as_str(&self) -> &str {
        match self {
            ControlType::ButtonGroup => "button-group",
            ControlType::Slider => "slider",
            ControlType::Other(name) => name,
        }
    }
}

impl JsonSchema for ControlType {
    fn schema_name() -> Cow<'static, str> {
        "ControlType".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "examples": ["button-group", "slider"]
        })
    }
}

impl From<String> for ControlType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "button-group" => ControlType::ButtonGroup,
            "slider" => ControlType::Slider,
            _ => ControlType::Other(value),
        }
    }
}

impl From<ControlType> for String {
    fn from(control: ControlType) -> Self {
        match control {
            ControlType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// One entry of an enum field's option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Declarative validation rule enforced by the host.
///
/// `pattern` applies to string fields, `accept` and `max_size` to image
/// uploads. `message` is the fixed text shown when the rule is violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accept: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    pub message: String,
}

impl Validation {
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            accept: Vec::new(),
            max_size: None,
            message: message.into(),
        }
    }

    pub fn upload<I, S>(accept: I, max_size: u64, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: None,
            accept: accept.into_iter().map(Into::into).collect(),
            max_size: Some(max_size),
            message: message.into(),
        }
    }

    pub fn has_upload_rules(&self) -> bool {
        !self.accept.is_empty() || self.max_size.is_some()
    }
}

/// Host-evaluated visibility expression such as `url !== undefined`.
///
/// The grammar belongs to the host editor; the string is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DisplayCondition(String);

impl DisplayCondition {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single editable property of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<EnumOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<DisplayCondition>,
}

impl FieldSpec {
    pub fn new(kind: FieldType, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: label.into(),
            group: None,
            description: None,
            default_value: None,
            required: false,
            validation: None,
            options: None,
            control_type: None,
            min: None,
            max: None,
            step: None,
            unit: None,
            display_condition: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_options(mut self, options: Vec<EnumOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_control(mut self, control: ControlType) -> Self {
        self.control_type = Some(control);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_display_condition(mut self, condition: DisplayCondition) -> Self {
        self.display_condition = Some(condition);
        self
    }

    /// Wire values of the enum options, in declaration order.
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flatten()
            .map(|option| option.value.as_str())
    }

    pub fn has_number_attributes(&self) -> bool {
        self.min.is_some() || self.max.is_some() || self.step.is_some() || self.unit.is_some()
    }
}
