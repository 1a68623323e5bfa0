use serde_json::json;

use model_spec::models::background_image::{
    self, ACCEPTED_IMAGE_TYPES, IMAGE_VALIDATION_MESSAGE, MAX_IMAGE_SIZE,
};
use model_spec::{
    BackgroundImage, BackgroundPosition, BackgroundRepeat, BackgroundSize, ControlType, FieldType,
    Upload, check_model, css_position, generate_background_styles, position_options,
    validate_upload,
};

#[test]
fn styles_without_url_omit_background_image() {
    let bg = BackgroundImage {
        url: None,
        background_size: BackgroundSize::Cover,
        background_position: BackgroundPosition::LeftTop,
        background_repeat: BackgroundRepeat::NoRepeat,
        opacity: None,
    };
    let styles = generate_background_styles(&bg);

    assert_eq!(styles.background_image, None);
    assert_eq!(styles.background_size, BackgroundSize::Cover);
    assert_eq!(styles.background_position, "left top");
    assert_eq!(styles.background_repeat, BackgroundRepeat::NoRepeat);
    assert_eq!(styles.opacity, 1.0);

    let value = serde_json::to_value(&styles).expect("serialize");
    assert_eq!(
        value,
        json!({
            "backgroundSize": "cover",
            "backgroundPosition": "left top",
            "backgroundRepeat": "no-repeat",
            "opacity": 1.0
        })
    );
}

#[test]
fn styles_wrap_url_and_scale_opacity() {
    let bg = BackgroundImage {
        url: Some("/a.png".into()),
        background_size: BackgroundSize::Cover,
        background_position: BackgroundPosition::Center,
        background_repeat: BackgroundRepeat::NoRepeat,
        opacity: Some(50),
    };
    let styles = generate_background_styles(&bg);

    assert_eq!(styles.background_image.as_deref(), Some("url(/a.png)"));
    assert_eq!(styles.background_position, "center");
    assert_eq!(styles.opacity, 0.5);
    assert_eq!(
        styles.to_css(),
        "background-image: url(/a.png); background-size: cover; background-position: center; background-repeat: no-repeat; opacity: 0.5"
    );
}

#[test]
fn empty_url_counts_as_absent() {
    let bg = BackgroundImage {
        url: Some(String::new()),
        ..BackgroundImage::default()
    };
    assert_eq!(generate_background_styles(&bg).background_image, None);
}

#[test]
fn zero_opacity_is_fully_transparent() {
    let bg = BackgroundImage {
        opacity: Some(0),
        ..BackgroundImage::default()
    };
    assert_eq!(generate_background_styles(&bg).opacity, 0.0);
}

#[test]
fn opacity_scales_without_clamping() {
    let bg = BackgroundImage {
        opacity: Some(150),
        ..BackgroundImage::default()
    };
    assert_eq!(generate_background_styles(&bg).opacity, 1.5);
}

#[test]
fn position_conversion_keeps_plain_keywords() {
    for keyword in ["top", "bottom", "center", "left", "right"] {
        assert_eq!(css_position(keyword), keyword);
    }
    assert_eq!(css_position("right-bottom"), "right bottom");
    assert_eq!(BackgroundPosition::LeftBottom.to_css(), "left bottom");
}

#[test]
fn instance_deserializes_with_model_defaults() {
    let bg: BackgroundImage = serde_json::from_value(json!({ "url": "/hero.jpg" })).expect("parse");
    assert_eq!(bg.background_size, BackgroundSize::Cover);
    assert_eq!(bg.background_position, BackgroundPosition::Center);
    assert_eq!(bg.background_repeat, BackgroundRepeat::NoRepeat);
    assert_eq!(bg.opacity, None);

    let bg: BackgroundImage = serde_json::from_value(json!({
        "backgroundPosition": "right-top",
        "backgroundRepeat": "repeat-x",
        "backgroundSize": "contain",
        "opacity": 25
    }))
    .expect("parse");
    assert_eq!(bg.background_position, BackgroundPosition::RightTop);
    assert_eq!(bg.background_repeat, BackgroundRepeat::RepeatX);
    assert_eq!(bg.background_size, BackgroundSize::Contain);
    assert_eq!(generate_background_styles(&bg).opacity, 0.25);
}

#[test]
fn model_declares_expected_fields() {
    let model = background_image::model();
    assert_eq!(model.name, "BackgroundImage");
    assert_eq!(model.label_field.as_deref(), Some("url"));
    let names = model
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "url",
            "backgroundSize",
            "backgroundPosition",
            "backgroundRepeat",
            "opacity"
        ]
    );

    let size = model.field("backgroundSize").expect("size field");
    assert_eq!(size.kind, FieldType::Enum);
    assert_eq!(size.control_type, Some(ControlType::ButtonGroup));
    assert_eq!(size.default_value, Some(json!("cover")));
    assert_eq!(
        size.option_values().collect::<Vec<_>>(),
        ["auto", "cover", "contain"]
    );

    let repeat = model.field("backgroundRepeat").expect("repeat field");
    assert_eq!(
        repeat.option_values().collect::<Vec<_>>(),
        ["no-repeat", "repeat", "repeat-x", "repeat-y"]
    );
    assert_eq!(repeat.default_value, Some(json!("no-repeat")));

    let opacity = model.field("opacity").expect("opacity field");
    assert_eq!(opacity.min, Some(0.0));
    assert_eq!(opacity.max, Some(100.0));
    assert_eq!(opacity.step, Some(1.0));
    assert_eq!(opacity.unit.as_deref(), Some("%"));
    assert_eq!(opacity.default_value, Some(json!(100)));
    assert_eq!(
        opacity.display_condition.as_ref().map(|c| c.as_str()),
        Some("url !== undefined")
    );
}

#[test]
fn position_options_cover_every_keyword() {
    let options = position_options();
    assert_eq!(options.len(), 9);
    assert_eq!(options[0].label, "Top");
    assert_eq!(options[5].value, "left-top");
    assert_eq!(options[8].label, "Right Bottom");
    let model = background_image::model();
    let field = model.field("backgroundPosition").expect("position field");
    assert_eq!(field.options.as_ref(), Some(&options));
    assert_eq!(field.default_value, Some(json!("center")));
}

#[test]
fn url_upload_rules_enforce_type_and_size() {
    let model = background_image::model();
    let url = model.field("url").expect("url field");

    let too_large = validate_upload(url, &Upload::new("image/png", 6 * 1024 * 1024))
        .expect_err("6MB rejected");
    assert_eq!(too_large.code, "max_size");
    assert_eq!(too_large.message, IMAGE_VALIDATION_MESSAGE);

    let wrong_type =
        validate_upload(url, &Upload::new("text/plain", 1024)).expect_err("text rejected");
    assert_eq!(wrong_type.code, "mime_type");
    assert_eq!(wrong_type.message, IMAGE_VALIDATION_MESSAGE);

    assert!(validate_upload(url, &Upload::new("image/png", 4 * 1024 * 1024)).is_ok());
    assert!(validate_upload(url, &Upload::new("image/svg+xml", MAX_IMAGE_SIZE)).is_ok());
    assert_eq!(ACCEPTED_IMAGE_TYPES.len(), 4);
}

#[test]
fn model_passes_structural_checks() {
    assert!(check_model(background_image::model()).is_empty());
}
