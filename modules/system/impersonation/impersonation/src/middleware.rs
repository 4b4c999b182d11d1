use std::sync::Arc;

use axum::response::IntoResponse;
use impersonation_sdk::{CapabilityChecker, TokenLookup};

use crate::config::ImpersonationConfig;
use crate::domain::{Decision, Impersonator};
use crate::error::ImpersonationError;
use crate::request::strip_impersonation_headers;

/// Shared state for the impersonation middleware.
#[derive(Clone)]
pub struct ImpersonationState {
    pub impersonator: Impersonator,
    pub config: Arc<ImpersonationConfig>,
}

impl ImpersonationState {
    #[must_use]
    pub fn new(
        checker: Arc<dyn CapabilityChecker>,
        tokens: Arc<dyn TokenLookup>,
        config: ImpersonationConfig,
    ) -> Self {
        Self {
            impersonator: Impersonator::new(checker, tokens),
            config: Arc::new(config),
        }
    }
}

/// Impersonation middleware. Must run after authentication has attached a
/// `UserInfo` to the request extensions.
///
/// For each request:
/// 1. Rejects requests without an authenticated user (401)
/// 2. Forwards requests that ask for no impersonation, minus any leftover
///    `Impersonate-*` headers
/// 3. Authorizes every requested dimension, rejecting with 403 on the first refusal
/// 4. Replaces the request identity for user targets; forwards service-account
///    targets with the caller's identity
pub async fn impersonation_middleware(
    axum::extract::State(state): axum::extract::State<ImpersonationState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let (mut parts, body) = req.into_parts();

    match state.impersonator.authorize(&parts).await {
        Ok(Decision::PassThrough) => {
            // Leftovers such as an empty `Impersonate-User` were never authorized.
            let removed = strip_impersonation_headers(&mut parts.headers);
            if removed > 0 {
                tracing::debug!(removed, "Dropped unauthorized impersonation headers");
            }
        }
        Ok(Decision::ServiceAccount(_)) => {}
        Ok(Decision::Impersonate(user)) => {
            parts.extensions.insert(user);
            if state.config.strip_impersonation_headers {
                strip_impersonation_headers(&mut parts.headers);
            }
        }
        Err(err) => return rejection_to_response(&err),
    }

    next.run(axum::extract::Request::from_parts(parts, body)).await
}

fn rejection_to_response(err: &ImpersonationError) -> axum::response::Response {
    tracing::debug!(status = %err.status(), "Impersonation rejected: {err}");
    err.to_problem().into_response()
}
