#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Impersonation Plugin
//!
//! Configuration-driven [`CapabilityChecker`](impersonation_sdk::CapabilityChecker)
//! and [`TokenLookup`](impersonation_sdk::TokenLookup) for development and
//! testing. Without rules nobody may impersonate anyone.
//!
//! ## Configuration
//!
//! ```yaml
//! rules:
//!   - subject: "admin"
//!     users: ["*"]
//!     groups: ["*"]
//!     extras: ["requesttokenid"]
//!     service_accounts: ["system:serviceaccount:default:*"]
//! tokens:
//!   - name: "kubeconfig-u-user5zfww"
//!     user_id: "impUser"
//! ```
//!
//! Any key can be overridden from the environment with the `IMPERSONATION__`
//! prefix, e.g. `IMPERSONATION__TOKENS='[{name="t", user_id="impUser"}]'`.

pub mod config;
pub mod domain;

use std::path::Path;
use std::sync::Arc;

pub use domain::Service;

/// Load configuration and build the plugin service.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn from_file(path: Option<&Path>) -> anyhow::Result<Arc<Service>> {
    let cfg = config::load(path)?;
    if cfg.rules.is_empty() {
        tracing::warn!(
            "Static impersonation plugin has no rules; every impersonation will be denied"
        );
    }
    tracing::info!(
        rules = cfg.rules.len(),
        tokens = cfg.tokens.len(),
        "Static impersonation plugin initialized"
    );
    Ok(Arc::new(Service::from_config(&cfg)))
}
