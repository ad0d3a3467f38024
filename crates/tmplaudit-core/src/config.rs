//! Audit configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::{Topic, OBJECT_PLACEHOLDER};
use crate::error::AuditError;
use crate::model::Template;
use crate::rules::RuleSet;

/// Top-level tmplaudit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Keyword sets, template bank and suggestion cap. Unset fields keep the
    /// built-in values.
    pub rules: RuleSet,
}

impl AuditConfig {
    /// Reject settings that would break the "at least one suggestion" rule.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.rules.max_suggestions == 0 {
            return Err(AuditError::InvalidConfig(
                "rules.max_suggestions must be at least 1".into(),
            ));
        }
        if self.rules.bank.fallback.as_str().trim().is_empty() {
            return Err(AuditError::InvalidConfig(
                "rules.bank.fallback must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Bank templates with no `{objects}` placeholder. The collection's noun
    /// never appears in suggestions built from these.
    pub fn templates_without_object(&self) -> Vec<&Template> {
        let bank = &self.rules.bank;
        Topic::ALL
            .iter()
            .flat_map(|topic| bank.templates(*topic))
            .chain(std::iter::once(&bank.fallback))
            .filter(|t| !t.placeholders().contains(&OBJECT_PLACEHOLDER))
            .collect()
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tmplaudit.toml` in the current directory
/// 2. `~/.config/tmplaudit/config.toml`
///
/// Environment variable override: `TMPLAUDIT_MAX_SUGGESTIONS`.
pub fn load_config() -> Result<AuditConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AuditConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let found = candidate_paths().into_iter().find(|candidate| {
            let exists = candidate.exists();
            if !exists {
                tracing::debug!("no config at {}, skipping", candidate.display());
            }
            exists
        });
        if found.is_none() {
            tracing::debug!("no config file found, using built-in rules");
        }
        found
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => AuditConfig::default(),
    };

    if let Ok(value) = std::env::var("TMPLAUDIT_MAX_SUGGESTIONS") {
        match value.trim().parse::<usize>() {
            Ok(n) => config.rules.max_suggestions = n,
            Err(e) => tracing::warn!("ignoring TMPLAUDIT_MAX_SUGGESTIONS={value}: {e}"),
        }
    }

    config.validate()?;
    for template in config.templates_without_object() {
        tracing::warn!("template has no {{{OBJECT_PLACEHOLDER}}} placeholder: {template}");
    }
    Ok(config)
}

/// Parse a TOML string into an `AuditConfig` without validating it.
///
/// Keyword lists are lower-cased on the way in.
pub fn parse_config_str(content: &str) -> Result<AuditConfig> {
    let mut config: AuditConfig = toml::from_str(content)?;
    config.rules.normalize_case();
    Ok(config)
}

/// Default locations in search order.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("tmplaudit.toml")];
    if let Some(dir) = dirs_path() {
        paths.push(dir.join("config.toml"));
    }
    paths
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tmplaudit"))
}
