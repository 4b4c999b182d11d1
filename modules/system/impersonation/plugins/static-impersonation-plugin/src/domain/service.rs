//! Service implementation for the static impersonation plugin.

use std::collections::HashMap;

use impersonation_sdk::{Dimension, Extras, RequestToken};
use request_identity::{ServiceAccountName, UserInfo};

use crate::config::{ImpersonationRule, StaticImpersonationPluginConfig, WILDCARD};

/// Static impersonation service.
///
/// Answers capability checks from the configured rules and resolves request
/// tokens from the configured token list. A caller may impersonate a target
/// when any rule whose subject matches the caller lists that target.
pub struct Service {
    rules: Vec<ImpersonationRule>,
    tokens: HashMap<String, RequestToken>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticImpersonationPluginConfig) -> Self {
        let tokens = cfg
            .tokens
            .iter()
            .map(|t| {
                (
                    t.name.clone(),
                    RequestToken {
                        name: t.name.clone(),
                        user_id: t.user_id.clone(),
                    },
                )
            })
            .collect();

        Self {
            rules: cfg.rules.clone(),
            tokens,
        }
    }

    fn rules_for<'a>(&'a self, actor: &'a UserInfo) -> impl Iterator<Item = &'a ImpersonationRule> {
        self.rules
            .iter()
            .filter(move |r| r.subject == WILDCARD || r.subject == actor.name())
    }

    #[must_use]
    pub fn allows_user(&self, actor: &UserInfo, user: &str) -> bool {
        let allowed = self.rules_for(actor).any(|r| matches_any(&r.users, user));
        log_decision(actor, Dimension::User, user, allowed);
        allowed
    }

    #[must_use]
    pub fn allows_group(&self, actor: &UserInfo, group: &str) -> bool {
        let allowed = self.rules_for(actor).any(|r| matches_any(&r.groups, group));
        log_decision(actor, Dimension::Group, group, allowed);
        allowed
    }

    /// Every requested key must be granted by a single rule.
    #[must_use]
    pub fn allows_extras(&self, actor: &UserInfo, extras: &Extras) -> bool {
        let allowed = self
            .rules_for(actor)
            .any(|r| extras.keys().all(|key| matches_any(&r.extras, key)));
        let keys = extras.keys().cloned().collect::<Vec<_>>().join(",");
        log_decision(actor, Dimension::Extras, &keys, allowed);
        allowed
    }

    #[must_use]
    pub fn allows_service_account(&self, actor: &UserInfo, sa: &ServiceAccountName) -> bool {
        let allowed = self
            .rules_for(actor)
            .any(|r| r.service_accounts.iter().any(|p| service_account_matches(p, sa)));
        log_decision(actor, Dimension::ServiceAccount, &sa.username(), allowed);
        allowed
    }

    /// Look up a configured request token.
    #[must_use]
    pub fn token(&self, token_id: &str) -> Option<&RequestToken> {
        self.tokens.get(token_id)
    }
}

fn matches_any(patterns: &[String], value: &str) -> bool {
    patterns.iter().any(|p| p == WILDCARD || p == value)
}

/// `*`, an exact `system:serviceaccount:<ns>:<name>`, or `system:serviceaccount:<ns>:*`.
fn service_account_matches(pattern: &str, sa: &ServiceAccountName) -> bool {
    if pattern == WILDCARD {
        return true;
    }
    match pattern.rsplit_once(':') {
        Some((prefix, WILDCARD)) => {
            prefix
                .strip_prefix(request_identity::constants::SERVICE_ACCOUNT_USERNAME_PREFIX)
                == Some(sa.namespace())
        }
        _ => pattern == sa.username(),
    }
}

fn log_decision(actor: &UserInfo, dimension: Dimension, target: &str, allowed: bool) {
    tracing::trace!(
        actor = %actor.name(),
        dimension = %dimension,
        target = %target,
        allowed,
        "Static impersonation rule evaluated"
    );
}
