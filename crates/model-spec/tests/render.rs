use model_spec::{find_builtin, render_json_ui, render_text};

#[test]
fn render_text_lists_sections_and_fields() {
    let model = find_builtin("BackgroundImage").expect("builtin");
    let text = render_text(model);

    assert!(text.starts_with("Model: Background Image (BackgroundImage)"));
    assert!(text.contains("Label field: url"));
    assert!(text.contains("Content:"));
    assert!(text.contains("Styles [palette]:"));
    assert!(text.contains(" - backgroundSize (Image Size) enum [required] = \"cover\""));
    assert!(text.contains("   options: auto, cover, contain"));
    assert!(text.contains("   range: 0..=100%"));
    assert!(text.contains("   shown when: url !== undefined"));
}

#[test]
fn render_json_ui_groups_fields() {
    let model = find_builtin("CheckboxFormControl").expect("builtin");
    let ui = render_json_ui(model);

    assert_eq!(ui["name"], "CheckboxFormControl");
    assert_eq!(ui["type"], "object");
    assert_eq!(ui["label_field"], "label");

    let groups = ui["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 3);
    assert!(groups[0]["name"].is_null());
    assert_eq!(groups[0]["label"], "Content");
    let content = groups[0]["fields"].as_array().expect("fields");
    assert_eq!(content.len(), 2);
    assert_eq!(content[0]["name"], "name");
    assert_eq!(content[0]["required"], true);

    assert_eq!(groups[1]["name"], "styles");
    assert_eq!(groups[1]["fields"][0]["options"][1], "1/2");
    assert_eq!(groups[2]["icon"], "gear");
    assert_eq!(groups[2]["fields"][0]["default"], false);
}
