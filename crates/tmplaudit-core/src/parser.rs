//! Catalog document loader.
//!
//! Reads the JSON catalog (an object keyed by collection name) and validates
//! it. Entries with missing or mistyped fields are repaired, not rejected.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AuditError;
use crate::model::{Catalog, Collection, Template};
use crate::rules::RuleSet;

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a JSON string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let document: Value = serde_json::from_str(content)
        .with_context(|| format!("failed to parse catalog JSON: {}", source_path.display()))?;

    let entries = match document {
        Value::Object(entries) => entries,
        other => {
            return Err(AuditError::NotAMapping(json_kind(&other)))
                .with_context(|| format!("invalid catalog: {}", source_path.display()));
        }
    };

    let catalog = entries
        .into_iter()
        .map(|(key, value)| {
            let collection = match Collection::deserialize(&value) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("repairing collection {key}: {e}");
                    lenient_collection(&value)
                }
            };
            (key, collection)
        })
        .collect();

    Ok(catalog)
}

/// Field-by-field decode that keeps whatever is usable and defaults the rest.
fn lenient_collection(value: &Value) -> Collection {
    let Some(fields) = value.as_object() else {
        return Collection::default();
    };

    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let list = |key: &str| -> Vec<String> {
        match fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    };

    Collection {
        name: text("name"),
        curriculum_topics: list("curriculumTopics"),
        age_groups: list("ageGroups"),
        thematic_categories: list("thematicCategories"),
        primary_objects: list("primaryObjects"),
        question_templates: list("questionTemplates")
            .into_iter()
            .map(Template::from)
            .collect(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The collection key (if applicable).
    pub collection: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a catalog for entries that will audit with degraded results.
pub fn validate_catalog(catalog: &Catalog, rules: &RuleSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(ValidationWarning {
            collection: None,
            message: "catalog has no collections".into(),
        });
    }

    for (key, c) in catalog.iter() {
        let mut warn = |message: &str| {
            warnings.push(ValidationWarning {
                collection: Some(key.to_string()),
                message: message.to_string(),
            })
        };

        if c.name.trim().is_empty() {
            warn("name is empty");
        }

        if c.curriculum_topics.is_empty() && c.age_groups.is_empty() {
            warn("no curriculum topics or age groups; only the fallback template can be suggested");
        }

        let all_excluded = c.primary_objects.iter().all(|obj| {
            let lower = obj.to_lowercase();
            rules.excluded_objects.iter().any(|e| *e == lower)
        });
        if !c.primary_objects.is_empty() && all_excluded {
            warn("every primary object is excluded; object noun falls back to the name");
        }
    }

    warnings
}
