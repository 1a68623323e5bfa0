use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::{EnumOption, FieldGroup, FieldSpec, FieldType, ModelSpec, ModelType, Validation};

pub const MODEL_NAME: &str = "CheckboxFormControl";
pub const STYLES_GROUP: &str = "styles";
pub const SETTINGS_GROUP: &str = "settings";

pub const DEFAULT_NAME: &str = "updates";
pub const DEFAULT_LABEL: &str = "Sign me up to receive updates";
pub const DEFAULT_IS_REQUIRED: bool = false;

pub const NAME_PATTERN: &str = "^[a-zA-Z][a-zA-Z0-9_]*$";
pub const NAME_VALIDATION_MESSAGE: &str =
    "Name must start with a letter and contain only letters, numbers, and underscores";

/// Layout width of the checkbox inside its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum CheckboxWidth {
    #[default]
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "1/2")]
    Half,
}

impl CheckboxWidth {
    pub const ALL: [CheckboxWidth; 2] = [CheckboxWidth::Full, CheckboxWidth::Half];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckboxWidth::Full => "full",
            CheckboxWidth::Half => "1/2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckboxWidth::Full => "Full Width",
            CheckboxWidth::Half => "Half Width",
        }
    }
}

/// Stored instance of the checkbox form control model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxFormControl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub width: CheckboxWidth,
    #[serde(default)]
    pub is_required: bool,
}

impl Default for CheckboxFormControl {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            label: Some(DEFAULT_LABEL.into()),
            width: CheckboxWidth::default(),
            is_required: DEFAULT_IS_REQUIRED,
        }
    }
}

static MODEL: LazyLock<ModelSpec> = LazyLock::new(build_model);

/// The checkbox form control model descriptor.
pub fn model() -> &'static ModelSpec {
    &MODEL
}

fn build_model() -> ModelSpec {
    let width_options = CheckboxWidth::ALL
        .iter()
        .map(|width| EnumOption::new(width.label(), width.as_str()))
        .collect();

    ModelSpec {
        kind: ModelType::Object,
        name: MODEL_NAME.into(),
        label: "Checkbox".into(),
        label_field: Some("label".into()),
        field_groups: vec![
            FieldGroup::new(STYLES_GROUP, "Styles").with_icon("palette"),
            FieldGroup::new(SETTINGS_GROUP, "Settings").with_icon("gear"),
        ],
        fields: vec![
            FieldSpec::new(FieldType::String, "name", "Name")
                .with_default(DEFAULT_NAME)
                .required()
                .with_description(
                    "Must be unique - this is the property name that will be sent to the server with this field's value.",
                )
                .with_validation(Validation::pattern(NAME_PATTERN, NAME_VALIDATION_MESSAGE)),
            FieldSpec::new(FieldType::String, "label", "Label")
                .with_default(DEFAULT_LABEL)
                .with_description("The text displayed next to the checkbox"),
            FieldSpec::new(FieldType::Enum, "width", "Width")
                .in_group(STYLES_GROUP)
                .with_options(width_options)
                .with_default(CheckboxWidth::default().as_str())
                .required()
                .with_description("Controls the width of the checkbox field in the form layout"),
            FieldSpec::new(FieldType::Boolean, "isRequired", "Required Field")
                .in_group(SETTINGS_GROUP)
                .with_default(DEFAULT_IS_REQUIRED)
                .with_description(
                    "When enabled, the form cannot be submitted without checking this box",
                ),
        ],
    }
}
