pub mod background_image;
pub mod checkbox_form_control;

use crate::spec::ModelSpec;

/// Every model shipped with the crate, in a stable order.
pub fn builtin_models() -> [&'static ModelSpec; 2] {
    [background_image::model(), checkbox_form_control::model()]
}

pub fn find_builtin(name: &str) -> Option<&'static ModelSpec> {
    builtin_models()
        .into_iter()
        .find(|model| model.name == name)
}
