//! Collaborator traits consumed by the impersonation middleware.

use async_trait::async_trait;
use http::request::Parts;
use request_identity::{ServiceAccountName, UserInfo};

use crate::error::{CapabilityCheckError, TokenLookupError};
use crate::models::{Extras, RequestToken};

/// Policy decision point for impersonation.
///
/// Every method receives the head of the request being authorized, the
/// authenticated actor and the requested target, and answers:
///
/// - `Ok(true)` - the actor may impersonate the target
/// - `Ok(false)` - explicit denial
/// - `Err(_)` - the decision could not be obtained; callers treat this as a denial
///
/// ```ignore
/// let checker: Arc<dyn CapabilityChecker> = Arc::new(SubjectAccessReview::new(client));
///
/// if !checker.can_impersonate_user(&parts, &actor, "impUser").await? {
///     // reject
/// }
/// ```
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    /// Whether `actor` may impersonate the user named `user`.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy backend fails to produce a decision.
    async fn can_impersonate_user(
        &self,
        request: &Parts,
        actor: &UserInfo,
        user: &str,
    ) -> Result<bool, CapabilityCheckError>;

    /// Whether `actor` may impersonate membership of `group`.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy backend fails to produce a decision.
    async fn can_impersonate_group(
        &self,
        request: &Parts,
        actor: &UserInfo,
        group: &str,
    ) -> Result<bool, CapabilityCheckError>;

    /// Whether `actor` may assert the full set of `extras`.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy backend fails to produce a decision.
    async fn can_impersonate_extras(
        &self,
        request: &Parts,
        actor: &UserInfo,
        extras: &Extras,
    ) -> Result<bool, CapabilityCheckError>;

    /// Whether `actor` may impersonate the service account.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy backend fails to produce a decision.
    async fn can_impersonate_service_account(
        &self,
        request: &Parts,
        actor: &UserInfo,
        service_account: &ServiceAccountName,
    ) -> Result<bool, CapabilityCheckError>;
}

/// Read-only access to issued tokens.
#[async_trait]
pub trait TokenLookup: Send + Sync {
    /// Fetch a token by its identifier.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no token has this identifier
    /// - `ServiceUnavailable` if the token store is not ready
    /// - `Internal` for unexpected errors
    async fn get(&self, token_id: &str) -> Result<RequestToken, TokenLookupError>;
}
