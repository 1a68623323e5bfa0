use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use model_spec::{ModelCatalog, ModelSpec, default_instance, instance_schema};

/// Files written for one model.
pub struct ExportedModel {
    pub name: String,
    pub model_path: PathBuf,
    pub schema_path: PathBuf,
    pub defaults_path: PathBuf,
}

/// Serialize every catalog model, its instance schema and its defaults.
pub fn write_catalog(catalog: &ModelCatalog, bundle_dir: &Path) -> io::Result<Vec<ExportedModel>> {
    let models_dir = bundle_dir.join("models");
    let schemas_dir = bundle_dir.join("schemas");
    let defaults_dir = bundle_dir.join("defaults");

    fs::create_dir_all(&models_dir)?;
    fs::create_dir_all(&schemas_dir)?;
    fs::create_dir_all(&defaults_dir)?;

    let mut exported = Vec::new();
    for model in catalog.iter() {
        let base_name = sanitize_file_name(&model.name);
        let model_path = models_dir.join(format!("{}.model.json", base_name));
        let schema_path = schemas_dir.join(format!("{}.instance.schema.json", base_name));
        let defaults_path = defaults_dir.join(format!("{}.defaults.json", base_name));

        write_json(&model_path, model)?;
        write_json(&schema_path, &instance_schema(model))?;
        write_json(&defaults_path, &default_instance(model))?;
        tracing::debug!(model = %model.name, path = %model_path.display(), "exported model");

        exported.push(ExportedModel {
            name: model.name.clone(),
            model_path,
            schema_path,
            defaults_path,
        });
    }

    fs::write(bundle_dir.join("README.md"), build_readme(catalog.iter()))?;
    Ok(exported)
}

fn sanitize_file_name(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "model".into()
    } else {
        cleaned
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> io::Result<()> {
    let contents = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, contents)
}

fn build_readme<'a>(models: impl Iterator<Item = &'a ModelSpec>) -> String {
    let mut readme = String::from("# Content models\n\n");
    for model in models {
        let base = sanitize_file_name(&model.name);
        readme.push_str(&format!(
            "## {label}\n\n- `models/{base}.model.json`\n- `schemas/{base}.instance.schema.json`\n- `defaults/{base}.defaults.json`\n\n",
            label = model.label,
            base = base,
        ));
    }
    readme.push_str(
        "Validate a stored instance with:\n\n```\nsite-models validate --model <NAME> --instance <FILE>\n```\n",
    );
    readme
}
