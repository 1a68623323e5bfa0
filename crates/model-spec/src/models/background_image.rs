use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::{
    ControlType, DisplayCondition, EnumOption, FieldGroup, FieldSpec, FieldType, ModelSpec,
    ModelType, Validation,
};

pub const MODEL_NAME: &str = "BackgroundImage";
pub const STYLES_GROUP: &str = "styles";

pub const DEFAULT_IMAGE_URL: &str = "/images/bg2.jpg";
pub const DEFAULT_OPACITY: u8 = 100;

pub const OPACITY_MIN: u8 = 0;
pub const OPACITY_MAX: u8 = 100;
pub const OPACITY_STEP: u8 = 1;
pub const OPACITY_UNIT: &str = "%";

pub const ACCEPTED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/svg+xml"];
/// Upload ceiling of 5 MB.
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;
pub const IMAGE_VALIDATION_MESSAGE: &str =
    "Please upload an image file (JPEG, PNG, WebP, or SVG) under 5MB";

/// CSS `background-size` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundSize {
    Auto,
    #[default]
    Cover,
    Contain,
}

impl BackgroundSize {
    pub const ALL: [BackgroundSize; 3] = [
        BackgroundSize::Auto,
        BackgroundSize::Cover,
        BackgroundSize::Contain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundSize::Auto => "auto",
            BackgroundSize::Cover => "cover",
            BackgroundSize::Contain => "contain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackgroundSize::Auto => "Auto",
            BackgroundSize::Cover => "Cover",
            BackgroundSize::Contain => "Contain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BackgroundSize::Auto => "Original size",
            BackgroundSize::Cover => "Cover entire container",
            BackgroundSize::Contain => "Fit within container",
        }
    }
}

/// Directional keyword for `background-position`, in hyphenated wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundPosition {
    Top,
    Bottom,
    #[default]
    Center,
    Left,
    Right,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl BackgroundPosition {
    pub const ALL: [BackgroundPosition; 9] = [
        BackgroundPosition::Top,
        BackgroundPosition::Bottom,
        BackgroundPosition::Center,
        BackgroundPosition::Left,
        BackgroundPosition::Right,
        BackgroundPosition::LeftTop,
        BackgroundPosition::LeftBottom,
        BackgroundPosition::RightTop,
        BackgroundPosition::RightBottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundPosition::Top => "top",
            BackgroundPosition::Bottom => "bottom",
            BackgroundPosition::Center => "center",
            BackgroundPosition::Left => "left",
            BackgroundPosition::Right => "right",
            BackgroundPosition::LeftTop => "left-top",
            BackgroundPosition::LeftBottom => "left-bottom",
            BackgroundPosition::RightTop => "right-top",
            BackgroundPosition::RightBottom => "right-bottom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackgroundPosition::Top => "Top",
            BackgroundPosition::Bottom => "Bottom",
            BackgroundPosition::Center => "Center",
            BackgroundPosition::Left => "Left",
            BackgroundPosition::Right => "Right",
            BackgroundPosition::LeftTop => "Left Top",
            BackgroundPosition::LeftBottom => "Left Bottom",
            BackgroundPosition::RightTop => "Right Top",
            BackgroundPosition::RightBottom => "Right Bottom",
        }
    }

    /// Space-separated CSS form, e.g. `left top`.
    pub fn to_css(&self) -> String {
        css_position(self.as_str())
    }
}

/// CSS `background-repeat` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundRepeat {
    Repeat,
    RepeatX,
    RepeatY,
    #[default]
    NoRepeat,
}

impl BackgroundRepeat {
    /// Editor display order.
    pub const ALL: [BackgroundRepeat; 4] = [
        BackgroundRepeat::NoRepeat,
        BackgroundRepeat::Repeat,
        BackgroundRepeat::RepeatX,
        BackgroundRepeat::RepeatY,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundRepeat::Repeat => "repeat",
            BackgroundRepeat::RepeatX => "repeat-x",
            BackgroundRepeat::RepeatY => "repeat-y",
            BackgroundRepeat::NoRepeat => "no-repeat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackgroundRepeat::Repeat => "Repeat",
            BackgroundRepeat::RepeatX => "Repeat X",
            BackgroundRepeat::RepeatY => "Repeat Y",
            BackgroundRepeat::NoRepeat => "No Repeat",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BackgroundRepeat::Repeat => "Tile both directions",
            BackgroundRepeat::RepeatX => "Tile horizontally",
            BackgroundRepeat::RepeatY => "Tile vertically",
            BackgroundRepeat::NoRepeat => "Display once",
        }
    }
}

/// Stored instance of the background image model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub background_size: BackgroundSize,
    #[serde(default)]
    pub background_position: BackgroundPosition,
    #[serde(default)]
    pub background_repeat: BackgroundRepeat,
    /// Percentage in `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
}

/// Style properties projected from a [`BackgroundImage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub background_size: BackgroundSize,
    pub background_position: String,
    pub background_repeat: BackgroundRepeat,
    pub opacity: f64,
}

impl BackgroundStyles {
    /// Render as a CSS declaration list.
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::new();
        if let Some(image) = &self.background_image {
            declarations.push(format!("background-image: {}", image));
        }
        declarations.push(format!("background-size: {}", self.background_size.as_str()));
        declarations.push(format!("background-position: {}", self.background_position));
        declarations.push(format!(
            "background-repeat: {}",
            self.background_repeat.as_str()
        ));
        declarations.push(format!("opacity: {}", self.opacity));
        declarations.join("; ")
    }
}

/// Convert a hyphenated position keyword to its space-separated CSS form.
pub fn css_position(keyword: &str) -> String {
    keyword.replacen('-', " ", 1)
}

/// Project a stored background image into renderable style properties.
pub fn generate_background_styles(bg: &BackgroundImage) -> BackgroundStyles {
    let background_image = bg
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| format!("url({})", url));

    let opacity = bg
        .opacity
        .map(|percent| f64::from(percent) / 100.0)
        .unwrap_or(1.0);

    BackgroundStyles {
        background_image,
        background_size: bg.background_size,
        background_position: bg.background_position.to_css(),
        background_repeat: bg.background_repeat,
        opacity,
    }
}

/// Options list for the position field.
pub fn position_options() -> Vec<EnumOption> {
    BackgroundPosition::ALL
        .iter()
        .map(|position| EnumOption::new(position.label(), position.as_str()))
        .collect()
}

fn size_options() -> Vec<EnumOption> {
    BackgroundSize::ALL
        .iter()
        .map(|size| {
            EnumOption::new(size.label(), size.as_str()).with_description(size.description())
        })
        .collect()
}

fn repeat_options() -> Vec<EnumOption> {
    BackgroundRepeat::ALL
        .iter()
        .map(|repeat| {
            EnumOption::new(repeat.label(), repeat.as_str()).with_description(repeat.description())
        })
        .collect()
}

static MODEL: LazyLock<ModelSpec> = LazyLock::new(build_model);

/// The background image model descriptor.
pub fn model() -> &'static ModelSpec {
    &MODEL
}

fn build_model() -> ModelSpec {
    ModelSpec {
        kind: ModelType::Object,
        name: MODEL_NAME.into(),
        label: "Background Image".into(),
        label_field: Some("url".into()),
        field_groups: vec![FieldGroup::new(STYLES_GROUP, "Styles").with_icon("palette")],
        fields: vec![
            FieldSpec::new(FieldType::Image, "url", "Background Image")
                .with_description("Select or upload a background image")
                .with_default(DEFAULT_IMAGE_URL)
                .with_validation(Validation::upload(
                    ACCEPTED_IMAGE_TYPES,
                    MAX_IMAGE_SIZE,
                    IMAGE_VALIDATION_MESSAGE,
                )),
            FieldSpec::new(FieldType::Enum, "backgroundSize", "Image Size")
                .in_group(STYLES_GROUP)
                .with_description("How the background image should be sized")
                .with_control(ControlType::ButtonGroup)
                .with_options(size_options())
                .with_default(BackgroundSize::default().as_str())
                .required(),
            FieldSpec::new(FieldType::Enum, "backgroundPosition", "Image Position")
                .in_group(STYLES_GROUP)
                .with_description("Where the background image should be positioned")
                .with_options(position_options())
                .with_default(BackgroundPosition::default().as_str())
                .required(),
            FieldSpec::new(FieldType::Enum, "backgroundRepeat", "Image Repeat")
                .in_group(STYLES_GROUP)
                .with_description("How the background image should repeat")
                .with_control(ControlType::ButtonGroup)
                .with_options(repeat_options())
                .with_default(BackgroundRepeat::default().as_str())
                .required(),
            FieldSpec::new(FieldType::Number, "opacity", "Opacity")
                .in_group(STYLES_GROUP)
                .with_description("Transparency level of the background image")
                .with_control(ControlType::Slider)
                .with_range(
                    f64::from(OPACITY_MIN),
                    f64::from(OPACITY_MAX),
                    f64::from(OPACITY_STEP),
                )
                .with_unit(OPACITY_UNIT)
                .with_default(DEFAULT_OPACITY)
                .with_display_condition(DisplayCondition::new("url !== undefined")),
        ],
    }
}
