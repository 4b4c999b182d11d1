//! Impersonation decision engine.

use std::sync::Arc;

use axum::http::request::Parts;
use impersonation_sdk::{CapabilityChecker, ImpersonationTarget, TokenLookup};
use request_identity::{ServiceAccountName, UserInfo, current_user};

use super::checks::plan;
use super::identity::impersonated_identity;
use super::token::validate_request_token;
use crate::error::ImpersonationError;
use crate::request::ImpersonationRequest;

/// What the middleware should do with an authorized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No impersonation was requested; forward with the caller's identity.
    PassThrough,
    /// Service-account impersonation was authorized; forward with the
    /// caller's identity and headers so a later stage performs the switch.
    ServiceAccount(ServiceAccountName),
    /// Replace the request identity with this one.
    Impersonate(UserInfo),
}

/// Authorizes impersonation requests against the capability checker and
/// token lookup.
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Clone)]
pub struct Impersonator {
    checker: Arc<dyn CapabilityChecker>,
    tokens: Arc<dyn TokenLookup>,
}

impl Impersonator {
    #[must_use]
    pub fn new(checker: Arc<dyn CapabilityChecker>, tokens: Arc<dyn TokenLookup>) -> Self {
        Self { checker, tokens }
    }

    /// Decide what to do with the request described by `parts`.
    ///
    /// Checks run in order (service account, or user then groups then
    /// extras) and stop at the first refusal.
    ///
    /// # Errors
    ///
    /// - [`ImpersonationError::Unauthenticated`] if no [`UserInfo`] is attached
    /// - any other [`ImpersonationError`] when a check or the request token
    ///   validation refuses the impersonation
    pub async fn authorize(&self, parts: &Parts) -> Result<Decision, ImpersonationError> {
        let Some(actor) = current_user(&parts.extensions) else {
            tracing::debug!("Rejecting request without an authenticated user");
            return Err(ImpersonationError::Unauthenticated);
        };

        let Some(request) = ImpersonationRequest::from_headers(&parts.headers)? else {
            return Ok(Decision::PassThrough);
        };

        for check in plan(&request) {
            check.run(self.checker.as_ref(), parts, actor).await?;
        }

        match request.target() {
            ImpersonationTarget::ServiceAccount(sa) => {
                tracing::debug!(
                    actor = %actor.name(),
                    service_account = %sa,
                    "Service account impersonation authorized"
                );
                Ok(Decision::ServiceAccount(sa.clone()))
            }
            ImpersonationTarget::User(username) => {
                validate_request_token(self.tokens.as_ref(), request.request_token_ids(), username)
                    .await?;

                tracing::debug!(
                    actor = %actor.name(),
                    user = %username,
                    groups = ?request.groups(),
                    "Impersonation authorized"
                );
                Ok(Decision::Impersonate(impersonated_identity(
                    username,
                    request.groups(),
                    request.extras(),
                )))
            }
        }
    }
}
