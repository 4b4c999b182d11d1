//! Configuration for the impersonation middleware.

use serde::{Deserialize, Serialize};

fn default_strip_impersonation_headers() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImpersonationConfig {
    /// Remove `Impersonate-*` headers once the request identity has been
    /// replaced, so later stages cannot interpret them a second time.
    /// Service-account impersonations always keep their headers.
    #[serde(default = "default_strip_impersonation_headers")]
    pub strip_impersonation_headers: bool,
}

impl Default for ImpersonationConfig {
    fn default() -> Self {
        Self {
            strip_impersonation_headers: default_strip_impersonation_headers(),
        }
    }
}
