//! Ordered capability checks for one impersonation request.

use axum::http::request::Parts;
use impersonation_sdk::{
    CapabilityCheckError, CapabilityChecker, Dimension, Extras, ImpersonationTarget,
};
use request_identity::{ServiceAccountName, UserInfo};

use crate::error::ImpersonationError;
use crate::request::ImpersonationRequest;

/// A single question put to the capability checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check<'a> {
    ServiceAccount(&'a ServiceAccountName),
    User(&'a str),
    Group(&'a str),
    Extras(&'a Extras),
}

impl Check<'_> {
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::ServiceAccount(_) => Dimension::ServiceAccount,
            Self::User(_) => Dimension::User,
            Self::Group(_) => Dimension::Group,
            Self::Extras(_) => Dimension::Extras,
        }
    }

    /// Short description of what is being checked, for logs.
    fn subject(&self) -> String {
        match self {
            Self::ServiceAccount(sa) => sa.username(),
            Self::User(name) | Self::Group(name) => (*name).to_owned(),
            Self::Extras(extras) => extras.keys().cloned().collect::<Vec<_>>().join(","),
        }
    }

    async fn ask(
        &self,
        checker: &dyn CapabilityChecker,
        request: &Parts,
        actor: &UserInfo,
    ) -> Result<bool, CapabilityCheckError> {
        match self {
            Self::ServiceAccount(sa) => {
                checker
                    .can_impersonate_service_account(request, actor, sa)
                    .await
            }
            Self::User(user) => checker.can_impersonate_user(request, actor, user).await,
            Self::Group(group) => checker.can_impersonate_group(request, actor, group).await,
            Self::Extras(extras) => checker.can_impersonate_extras(request, actor, extras).await,
        }
    }

    /// Run the check and turn anything but an explicit allow into a rejection.
    ///
    /// # Errors
    ///
    /// - [`ImpersonationError::Denied`] when the checker answers `false`
    /// - [`ImpersonationError::CheckFailed`] when the checker fails
    pub async fn run(
        &self,
        checker: &dyn CapabilityChecker,
        request: &Parts,
        actor: &UserInfo,
    ) -> Result<(), ImpersonationError> {
        let dimension = self.dimension();
        match self.ask(checker, request, actor).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!(
                    actor = %actor.name(),
                    dimension = %dimension,
                    target = %self.subject(),
                    "Impersonation denied"
                );
                Err(match self {
                    Self::Group(group) => ImpersonationError::GroupDenied((*group).to_owned()),
                    _ => ImpersonationError::Denied(dimension),
                })
            }
            Err(source) => {
                tracing::error!(
                    actor = %actor.name(),
                    dimension = %dimension,
                    target = %self.subject(),
                    error = %source,
                    "Impersonation capability check failed"
                );
                Err(match self {
                    Self::Group(group) => ImpersonationError::GroupCheckFailed {
                        group: (*group).to_owned(),
                        source,
                    },
                    _ => ImpersonationError::CheckFailed { dimension, source },
                })
            }
        }
    }
}

/// The checks `request` needs, in evaluation order.
///
/// Service-account targets are checked on their own. Ordinary users are
/// checked as user, then each group in request order, then all extras at once.
#[must_use]
pub fn plan(request: &ImpersonationRequest) -> Vec<Check<'_>> {
    match request.target() {
        ImpersonationTarget::ServiceAccount(sa) => vec![Check::ServiceAccount(sa)],
        ImpersonationTarget::User(user) => {
            let mut checks = Vec::with_capacity(request.groups().len() + 2);
            checks.push(Check::User(user));
            checks.extend(request.groups().iter().map(|g| Check::Group(g.as_str())));
            if !request.extras().is_empty() {
                checks.push(Check::Extras(request.extras()));
            }
            checks
        }
    }
}
