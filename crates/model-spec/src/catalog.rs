use serde_json::Value;
use thiserror::Error;

use crate::check::{ModelIssue, check_model};
use crate::models::builtin_models;
use crate::spec::ModelSpec;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse model definitions: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("model '{0}' is not available")]
    UnknownModel(String),
    #[error("model '{model}' failed structural checks: {}", join_issues(.issues))]
    InvalidModel {
        model: String,
        issues: Vec<ModelIssue>,
    },
}

fn join_issues(issues: &[ModelIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a definitions file holding one model or an array of models.
///
/// Models are returned unchecked; run [`check_model`] or
/// [`ModelCatalog::insert`] before use.
pub fn parse_definitions(json: &str) -> Result<Vec<ModelSpec>, CatalogError> {
    let value: Value = serde_json::from_str(json).map_err(CatalogError::Parse)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(CatalogError::Parse)
    } else {
        serde_json::from_value(value)
            .map(|model| vec![model])
            .map_err(CatalogError::Parse)
    }
}

/// Ordered set of models addressable by name.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<ModelSpec>,
}

impl ModelCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in models.
    pub fn builtin() -> Self {
        Self {
            models: builtin_models().into_iter().cloned().collect(),
        }
    }

    /// Add a model, replacing any existing model with the same name.
    ///
    /// Models with structural issues are rejected.
    pub fn insert(&mut self, model: ModelSpec) -> Result<(), CatalogError> {
        let issues = check_model(&model);
        if !issues.is_empty() {
            tracing::warn!(model = %model.name, issues = issues.len(), "rejected model definition");
            return Err(CatalogError::InvalidModel {
                model: model.name,
                issues,
            });
        }

        match self.models.iter_mut().find(|existing| existing.name == model.name) {
            Some(existing) => {
                tracing::debug!(model = %model.name, "replacing model definition");
                *existing = model;
            }
            None => self.models.push(model),
        }
        Ok(())
    }

    /// Load definitions from JSON; returns the number of models added.
    ///
    /// Nothing is added when any definition fails to parse or check.
    pub fn load_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let models = parse_definitions(json)?;

        let mut staged = self.clone();
        for model in &models {
            staged.insert(model.clone())?;
        }
        *self = staged;
        Ok(models.len())
    }

    pub fn get(&self, name: &str) -> Result<&ModelSpec, CatalogError> {
        self.models
            .iter()
            .find(|model| model.name == name)
            .ok_or_else(|| CatalogError::UnknownModel(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|model| model.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
