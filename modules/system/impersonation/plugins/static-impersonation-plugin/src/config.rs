//! Configuration for the static impersonation plugin.

use std::path::Path;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix for environment overrides, e.g.
/// `IMPERSONATION__TOKENS='[{name="t", user_id="impUser"}]'`.
pub const ENV_PREFIX: &str = "IMPERSONATION__";

/// Matches any value in a rule list.
pub const WILDCARD: &str = "*";

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticImpersonationPluginConfig {
    /// Who may impersonate what. No rules means nobody may impersonate.
    pub rules: Vec<ImpersonationRule>,

    /// Request tokens known to the token store.
    pub tokens: Vec<TokenEntry>,
}

/// Grants one caller (or every caller, with `subject: "*"`) the right to
/// impersonate the listed targets.
///
/// Each list accepts exact values and `*`. Service accounts additionally
/// accept `system:serviceaccount:<namespace>:*`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImpersonationRule {
    /// Caller user name the rule applies to.
    pub subject: String,
    pub users: Vec<String>,
    pub groups: Vec<String>,
    /// Allowed extra keys (lowercase).
    pub extras: Vec<String>,
    pub service_accounts: Vec<String>,
}

/// A request token and the user that owns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenEntry {
    pub name: String,
    pub user_id: String,
}

/// Rejected configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("rule #{0} has an empty subject")]
    EmptySubject(usize),

    #[error("token #{0} has an empty name")]
    EmptyTokenName(usize),

    #[error("token \"{0}\" is configured more than once")]
    DuplicateToken(String),
}

impl StaticImpersonationPluginConfig {
    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for empty rule subjects, empty token names or
    /// duplicate token names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(idx) = self.rules.iter().position(|r| r.subject.is_empty()) {
            return Err(ConfigError::EmptySubject(idx));
        }

        let mut seen = std::collections::HashSet::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            if token.name.is_empty() {
                return Err(ConfigError::EmptyTokenName(idx));
            }
            if !seen.insert(token.name.as_str()) {
                return Err(ConfigError::DuplicateToken(token.name.clone()));
            }
        }
        Ok(())
    }
}

/// Load the plugin configuration from an optional YAML file, then apply
/// `IMPERSONATION__`-prefixed environment overrides (`__` separates nested
/// keys).
///
/// # Errors
///
/// Fails if the file cannot be parsed, a value has the wrong type, an unknown
/// key is present, or [`StaticImpersonationPluginConfig::validate`] rejects
/// the result.
pub fn load(path: Option<&Path>) -> anyhow::Result<StaticImpersonationPluginConfig> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Yaml::file_exact(path));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let cfg: StaticImpersonationPluginConfig = figment
        .extract()
        .context("failed to load static impersonation plugin configuration")?;
    cfg.validate()?;

    tracing::debug!(
        rules = cfg.rules.len(),
        tokens = cfg.tokens.len(),
        "Loaded static impersonation plugin configuration"
    );
    Ok(cfg)
}
