#![allow(missing_docs)]

pub mod catalog;
pub mod check;
pub mod defaults;
pub mod instance_schema;
pub mod models;
pub mod render;
pub mod spec;
pub mod validate;

pub use catalog::{CatalogError, ModelCatalog, parse_definitions};
pub use check::{ModelIssue, check_model};
pub use defaults::generate as default_instance;
pub use instance_schema::generate as instance_schema;
pub use models::background_image::{
    BackgroundImage, BackgroundPosition, BackgroundRepeat, BackgroundSize, BackgroundStyles,
    css_position, generate_background_styles, position_options,
};
pub use models::checkbox_form_control::{CheckboxFormControl, CheckboxWidth};
pub use models::{builtin_models, find_builtin};
pub use render::{render_json_ui, render_text};
pub use spec::{
    ControlType, DisplayCondition, EnumOption, FieldGroup, FieldSpec, FieldType, ModelSpec,
    ModelType, Validation, descriptor_schema,
};
pub use validate::{
    Upload, ValidationError, ValidationResult, validate, validate_field, validate_upload,
};
