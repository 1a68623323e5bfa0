mod export;

use clap::{Parser, Subcommand, ValueEnum};
use model_spec::{
    BackgroundImage, FieldType, ModelCatalog, ModelSpec, Upload, ValidationResult, builtin_models,
    check_model, default_instance, descriptor_schema, generate_background_styles, instance_schema,
    parse_definitions, render_json_ui, render_text, validate, validate_upload,
};
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const LOG_ENV: &str = "SITE_MODELS_LOG";
const OUTPUT_DIR_ENV: &str = "SITE_MODELS_OUTPUT_DIR";
const DEFAULT_BUNDLE_NAME: &str = "site-models";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Content model helper CLI",
    long_about = "Lists, checks, validates and exports site builder content models"
)]
struct Cli {
    /// JSON file with extra model definitions (one model or an array).
    #[arg(long, global = true, value_name = "FILE")]
    models: Option<PathBuf>,
    /// Emit debug logs on stderr (overridden by SITE_MODELS_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DescribeFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StyleFormat {
    Json,
    Css,
}

#[derive(Subcommand)]
enum Command {
    /// List every model in the catalog.
    List,
    /// Describe a model's fields grouped by editor section.
    Describe {
        #[arg(long, value_name = "NAME")]
        model: String,
        #[arg(long, value_enum, default_value_t = DescribeFormat::Text)]
        format: DescribeFormat,
    },
    /// Run structural checks over the built-in models and any --models definitions.
    Check,
    /// Print the JSON Schema of a model's stored instances.
    Schema {
        #[arg(long, value_name = "NAME")]
        model: String,
    },
    /// Print the JSON Schema of the model descriptor format.
    MetaSchema,
    /// Print an instance populated with every field default.
    Defaults {
        #[arg(long, value_name = "NAME")]
        model: String,
    },
    /// Validate a stored instance against a model.
    Validate {
        #[arg(long, value_name = "NAME")]
        model: String,
        /// Path to the instance JSON file.
        #[arg(long, value_name = "INSTANCE")]
        instance: PathBuf,
    },
    /// Check an image upload against an image field's rules.
    Upload {
        #[arg(long, value_name = "NAME")]
        model: String,
        #[arg(long, value_name = "FIELD")]
        field: String,
        /// MIME type of the uploaded file.
        #[arg(long, value_name = "TYPE")]
        mime: String,
        /// Size of the uploaded file in bytes.
        #[arg(long, value_name = "BYTES")]
        size: u64,
    },
    /// Project a background image instance into style properties.
    Styles {
        /// Path to the BackgroundImage instance JSON file.
        #[arg(long, value_name = "INSTANCE")]
        instance: PathBuf,
        #[arg(long, value_enum, default_value_t = StyleFormat::Json)]
        format: StyleFormat,
    },
    /// Write models, instance schemas and defaults to disk.
    Export {
        /// Root directory for the bundle (defaults to SITE_MODELS_OUTPUT_DIR or the current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Bundle directory name under the root.
        #[arg(long, default_value = DEFAULT_BUNDLE_NAME)]
        name: String,
        /// Overwrite an existing bundle.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let models = cli.models.as_deref();

    match cli.command {
        Command::List => run_list(&load_catalog(models)?),
        Command::Describe { model, format } => {
            run_describe(&load_catalog(models)?, &model, format)
        }
        // Definitions are checked as written, without the catalog's load-time rejection.
        Command::Check => run_check(models),
        Command::Schema { model } => {
            print_json(&instance_schema(load_catalog(models)?.get(&model)?))
        }
        Command::MetaSchema => print_json(&descriptor_schema()),
        Command::Defaults { model } => {
            print_json(&default_instance(load_catalog(models)?.get(&model)?))
        }
        Command::Validate { model, instance } => {
            run_validate(&load_catalog(models)?, &model, &instance)
        }
        Command::Upload {
            model,
            field,
            mime,
            size,
        } => run_upload(&load_catalog(models)?, &model, &field, Upload::new(mime, size)),
        Command::Styles { instance, format } => run_styles(&instance, format),
        Command::Export { out, name, force } => {
            run_export(&load_catalog(models)?, out, &name, force)
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_catalog(models: Option<&Path>) -> CliResult<ModelCatalog> {
    let mut catalog = ModelCatalog::builtin();
    if let Some(path) = models {
        let contents = fs::read_to_string(path)?;
        let added = catalog.load_json(&contents)?;
        tracing::info!(path = %path.display(), added, "loaded model definitions");
    }
    Ok(catalog)
}

fn print_json(value: &impl Serialize) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_list(catalog: &ModelCatalog) -> CliResult<()> {
    for model in catalog.iter() {
        println!(
            "{}\t{}\t{} field(s)",
            model.name,
            model.label,
            model.fields.len()
        );
    }
    Ok(())
}

fn run_describe(catalog: &ModelCatalog, name: &str, format: DescribeFormat) -> CliResult<()> {
    let model = catalog.get(name)?;
    match format {
        DescribeFormat::Text => {
            println!("{}", render_text(model));
            Ok(())
        }
        DescribeFormat::Json => print_json(&render_json_ui(model)),
    }
}

fn run_check(models: Option<&Path>) -> CliResult<()> {
    let mut definitions: Vec<ModelSpec> = builtin_models().into_iter().cloned().collect();
    if let Some(path) = models {
        let contents = fs::read_to_string(path)?;
        definitions.extend(parse_definitions(&contents)?);
    }

    let mut failures = 0;
    for model in &definitions {
        let issues = check_model(model);
        if issues.is_empty() {
            println!("ok: {}", model.name);
            continue;
        }
        failures += 1;
        println!("invalid: {}", model.name);
        for issue in issues {
            println!("  - {}", issue);
        }
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(format!("{} model(s) failed structural checks", failures).into())
    }
}

fn run_validate(catalog: &ModelCatalog, name: &str, instance_path: &Path) -> CliResult<()> {
    let model = catalog.get(name)?;
    let instance_json = fs::read_to_string(instance_path)?;
    let instance: Value = serde_json::from_str(&instance_json)?;

    let result = validate(model, &instance);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {} - {} ({})", error.path, error.message, error.code);
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required fields: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!("Unknown fields: {}", result.unknown_fields.join(", "));
    }
}

fn run_upload(
    catalog: &ModelCatalog,
    name: &str,
    field_name: &str,
    upload: Upload,
) -> CliResult<()> {
    let model = catalog.get(name)?;
    let field = model
        .field(field_name)
        .ok_or_else(|| format!("model '{}' has no field '{}'", name, field_name))?;
    if field.kind != FieldType::Image {
        return Err(format!(
            "field '{}' is a {} field, not an image",
            field_name, field.kind
        )
        .into());
    }

    match validate_upload(field, &upload) {
        Ok(()) => {
            println!("accepted: {} ({} bytes)", upload.mime_type, upload.size);
            Ok(())
        }
        Err(error) => {
            println!("rejected: {}", error.message);
            Err(format!("upload rejected ({})", error.code).into())
        }
    }
}

fn run_styles(instance_path: &Path, format: StyleFormat) -> CliResult<()> {
    let contents = fs::read_to_string(instance_path)?;
    let background: BackgroundImage = serde_json::from_str(&contents)?;
    let styles = generate_background_styles(&background);
    match format {
        StyleFormat::Json => print_json(&styles),
        StyleFormat::Css => {
            println!("{}", styles.to_css());
            Ok(())
        }
    }
}

fn run_export(
    catalog: &ModelCatalog,
    out: Option<PathBuf>,
    name: &str,
    force: bool,
) -> CliResult<()> {
    ensure_bundle_name(name)?;
    let out_root = resolve_output_root(out)?;
    let bundle_dir = out_root.join(name);
    if bundle_dir.exists() {
        if force {
            fs::remove_dir_all(&bundle_dir)?;
        } else {
            return Err(format!(
                "bundle {} already exists; rerun with --force to overwrite",
                bundle_dir.display()
            )
            .into());
        }
    }

    let exported = export::write_catalog(catalog, &bundle_dir)?;
    for model in &exported {
        tracing::debug!(
            model = %model.name,
            schema = %model.schema_path.display(),
            defaults = %model.defaults_path.display(),
            "wrote bundle entry"
        );
        println!("{} -> {}", model.name, model.model_path.display());
    }
    println!(
        "Exported {} model(s) to {}",
        exported.len(),
        bundle_dir.display()
    );
    Ok(())
}

/// Bundle names must be a single plain path segment under the output root.
fn ensure_bundle_name(name: &str) -> CliResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(format!(
            "bundle name '{}' must be a single directory name without separators or '..'",
            name
        )
        .into()),
    }
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os(OUTPUT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use assert_fs::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn stdout_of(output: &std::process::Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    #[test]
    fn resolve_output_root_prefers_explicit_path() {
        let root = resolve_output_root(Some(PathBuf::from("bundle-root"))).expect("root");
        assert_eq!(root, PathBuf::from("bundle-root"));
        assert!(resolve_output_root(Some(PathBuf::new())).is_err());
    }

    #[test]
    fn check_reports_builtin_models_clean() {
        assert!(run_check(None).is_ok());
    }

    #[test]
    fn bundle_name_must_be_a_single_segment() {
        assert!(ensure_bundle_name("site-models").is_ok());
        assert!(ensure_bundle_name("v2_bundle").is_ok());
        for name in ["", ".", "..", "../victim", "nested/bundle", "/tmp/bundle"] {
            assert!(ensure_bundle_name(name).is_err(), "{name} accepted");
        }
    }

    #[test]
    fn export_refuses_names_outside_the_root() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let root = workspace.child("root");
        root.create_dir_all()?;
        workspace.child("victim").create_dir_all()?;
        let kept = workspace.child("victim/important.txt");
        kept.write_str("keep me")?;

        Command::cargo_bin("site-models")?
            .arg("export")
            .arg("--out")
            .arg(root.path())
            .args(["--name", "../victim", "--force"])
            .assert()
            .failure();

        assert_eq!(fs::read_to_string(kept.path())?, "keep me");
        assert!(!workspace.path().join("victim/models").exists());
        Ok(())
    }

    #[test]
    fn upload_rejects_non_image_fields() {
        let catalog = ModelCatalog::builtin();
        let err = run_upload(
            &catalog,
            "CheckboxFormControl",
            "name",
            Upload::new("image/png", 10),
        )
        .expect_err("string field");
        assert!(err.to_string().contains("not an image"));
    }

    #[test]
    fn list_prints_builtin_models() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("site-models")?
            .arg("list")
            .assert()
            .success()
            .get_output()
            .clone();
        let stdout = stdout_of(&output);
        assert!(stdout.contains("BackgroundImage\tBackground Image\t5 field(s)"));
        assert!(stdout.contains("CheckboxFormControl\tCheckbox\t4 field(s)"));
        Ok(())
    }

    #[test]
    fn describe_json_exposes_groups() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("site-models")?
            .args(["describe", "--model", "BackgroundImage", "--format", "json"])
            .assert()
            .success()
            .get_output()
            .clone();
        let ui: Value = serde_json::from_str(&stdout_of(&output))?;
        assert_eq!(ui["label_field"], "url");
        assert_eq!(ui["groups"][1]["name"], "styles");
        Ok(())
    }

    #[test]
    fn describe_unknown_model_fails() -> Result<(), Box<dyn std::error::Error>> {
        Command::cargo_bin("site-models")?
            .args(["describe", "--model", "Missing"])
            .assert()
            .failure();
        Ok(())
    }

    #[test]
    fn validate_rejects_bad_checkbox_name() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = TempDir::new()?;
        let instance = workspace.path().join("checkbox.json");
        fs::write(
            &instance,
            serde_json::to_string(&json!({ "name": "sign-up", "width": "full" }))?,
        )?;

        let output = Command::cargo_bin("site-models")?
            .args(["validate", "--model", "CheckboxFormControl", "--instance"])
            .arg(&instance)
            .assert()
            .failure()
            .get_output()
            .clone();
        let stdout = stdout_of(&output);
        assert!(stdout.contains("Validation result: invalid"));
        assert!(stdout.contains("/name - Name must start with a letter"));
        Ok(())
    }

    #[test]
    fn validate_accepts_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = TempDir::new()?;
        let instance = workspace.path().join("checkbox.json");
        fs::write(
            &instance,
            serde_json::to_string(&json!({
                "name": "sign_up2",
                "width": "1/2",
                "isRequired": true
            }))?,
        )?;

        Command::cargo_bin("site-models")?
            .args(["validate", "--model", "CheckboxFormControl", "--instance"])
            .arg(&instance)
            .assert()
            .success();
        Ok(())
    }

    #[test]
    fn upload_command_enforces_size_ceiling() -> Result<(), Box<dyn std::error::Error>> {
        Command::cargo_bin("site-models")?
            .args([
                "upload", "--model", "BackgroundImage", "--field", "url", "--mime", "image/png",
                "--size", "6291456",
            ])
            .assert()
            .failure();

        let output = Command::cargo_bin("site-models")?
            .args([
                "upload", "--model", "BackgroundImage", "--field", "url", "--mime", "image/png",
                "--size", "4194304",
            ])
            .assert()
            .success()
            .get_output()
            .clone();
        assert!(stdout_of(&output).starts_with("accepted: image/png"));
        Ok(())
    }

    #[test]
    fn styles_renders_css_declarations() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let instance = workspace.child("background.json");
        instance.write_str(
            r#"{ "url": "/a.png", "backgroundPosition": "left-top", "opacity": 50 }"#,
        )?;

        let output = Command::cargo_bin("site-models")?
            .args(["styles", "--format", "css", "--instance"])
            .arg(instance.path())
            .assert()
            .success()
            .get_output()
            .clone();
        assert_eq!(
            stdout_of(&output).trim_end(),
            "background-image: url(/a.png); background-size: cover; background-position: left top; background-repeat: no-repeat; opacity: 0.5"
        );
        Ok(())
    }

    #[test]
    fn export_writes_bundle_and_respects_force() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let definitions = workspace.child("extra.json");
        definitions.write_str(
            &json!({
                "name": "Quote",
                "label": "Quote",
                "labelField": "text",
                "fields": [
                    { "type": "string", "name": "text", "label": "Text", "required": true }
                ]
            })
            .to_string(),
        )?;

        Command::cargo_bin("site-models")?
            .arg("export")
            .arg("--out")
            .arg(workspace.path())
            .arg("--models")
            .arg(definitions.path())
            .assert()
            .success();

        let bundle = workspace.path().join(DEFAULT_BUNDLE_NAME);
        assert!(bundle.join("README.md").exists());
        assert!(bundle.join("models/Quote.model.json").exists());
        assert!(
            bundle
                .join("schemas/BackgroundImage.instance.schema.json")
                .exists()
        );
        let defaults: Value = serde_json::from_str(&fs::read_to_string(
            bundle.join("defaults/CheckboxFormControl.defaults.json"),
        )?)?;
        assert_eq!(defaults["name"], "updates");

        Command::cargo_bin("site-models")?
            .arg("export")
            .arg("--out")
            .arg(workspace.path())
            .assert()
            .failure();

        Command::cargo_bin("site-models")?
            .arg("export")
            .arg("--out")
            .arg(workspace.path())
            .arg("--force")
            .assert()
            .success();
        assert!(!bundle.join("models/Quote.model.json").exists());
        Ok(())
    }

    #[test]
    fn check_fails_for_broken_definitions() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = TempDir::new()?;
        let definitions = workspace.path().join("broken.json");
        fs::write(
            &definitions,
            json!({
                "name": "Broken",
                "label": "Broken",
                "fields": [ { "type": "enum", "name": "size", "label": "Size" } ]
            })
            .to_string(),
        )?;

        let output = Command::cargo_bin("site-models")?
            .arg("check")
            .arg("--models")
            .arg(&definitions)
            .assert()
            .failure()
            .get_output()
            .clone();
        let stdout = stdout_of(&output);
        assert!(stdout.contains("ok: BackgroundImage"));
        assert!(stdout.contains("ok: CheckboxFormControl"));
        assert!(stdout.contains("invalid: Broken"));
        assert!(stdout.contains("  - enum field 'size' declares no options"));
        Ok(())
    }
}
