//! Rejection reasons produced by the impersonation middleware.

use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use impersonation_sdk::{CapabilityCheckError, Dimension, TokenLookupError};
use thiserror::Error;

use crate::problem::Problem;

/// Every way an impersonation attempt can be refused.
///
/// The `Display` text is the response detail and is part of the HTTP contract.
#[derive(Debug, Error)]
pub enum ImpersonationError {
    /// No authenticated identity is attached to the request.
    #[error("not authenticated")]
    Unauthenticated,

    /// Groups or extras were requested without a target user.
    #[error("requested impersonation of groups or extras without impersonating a user")]
    MissingTargetUser,

    /// An impersonation header value is not visible ASCII.
    #[error("invalid value in impersonation header {0}")]
    UnreadableHeader(HeaderName),

    /// The capability checker explicitly refused a dimension.
    #[error("not allowed to impersonate {0}")]
    Denied(Dimension),

    /// The capability checker refused one of the requested groups.
    #[error("not allowed to impersonate group \"{0}\"")]
    GroupDenied(String),

    /// The capability checker could not produce a decision.
    #[error("error checking if user can impersonate {dimension}: {source}")]
    CheckFailed {
        dimension: Dimension,
        #[source]
        source: CapabilityCheckError,
    },

    /// The capability checker could not decide on one of the requested groups.
    #[error("error checking if user can impersonate group: {source} (group \"{group}\")")]
    GroupCheckFailed {
        group: String,
        #[source]
        source: CapabilityCheckError,
    },

    /// More than one `requesttokenid` extra value was sent.
    #[error("multiple requesttokenid values")]
    MultipleRequestTokenIds,

    /// The request token could not be fetched.
    #[error("error getting request token: {0}")]
    RequestTokenLookup(#[source] TokenLookupError),

    /// The request token belongs to someone other than the impersonated user.
    #[error("request token user does not match impersonation user")]
    RequestTokenUserMismatch,
}

impl ImpersonationError {
    /// HTTP status of the terminal response.
    ///
    /// Backend failures map to 403 like denials: an undecided check is a refusal.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::MissingTargetUser
            | Self::UnreadableHeader(_)
            | Self::Denied(_)
            | Self::GroupDenied(_)
            | Self::CheckFailed { .. }
            | Self::GroupCheckFailed { .. }
            | Self::MultipleRequestTokenIds
            | Self::RequestTokenLookup(_)
            | Self::RequestTokenUserMismatch => StatusCode::FORBIDDEN,
        }
    }

    #[must_use]
    pub fn to_problem(&self) -> Problem {
        let title = if self.status() == StatusCode::UNAUTHORIZED {
            "Unauthorized"
        } else {
            "Forbidden"
        };
        Problem::new(self.status(), title, self.to_string())
    }
}

impl IntoResponse for ImpersonationError {
    fn into_response(self) -> Response {
        self.to_problem().into_response()
    }
}
