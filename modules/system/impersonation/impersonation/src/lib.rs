#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Impersonation middleware
//!
//! Lets an authenticated caller act as another identity for one request,
//! after asking a [`CapabilityChecker`](impersonation_sdk::CapabilityChecker)
//! about every requested dimension.
//!
//! ## Flow
//!
//! 1. No [`UserInfo`](request_identity::UserInfo) in the request extensions: 401
//! 2. An `Impersonate-*` value that is not visible ASCII: 403. No
//!    impersonation requested: forwarded, minus any leftover `Impersonate-*`
//!    headers
//! 3. Checks in order, stopping at the first refusal (403):
//!    service account, or user, then each group, then extras
//! 4. `requesttokenid` extra: the token must belong to the target user
//! 5. User targets: the request identity is replaced; service-account
//!    targets are forwarded with the caller's identity
//!
//! ## Usage
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//! use impersonation::{ImpersonationState, impersonation_middleware};
//!
//! let state = ImpersonationState::new(checker, tokens, ImpersonationConfig::default());
//! let router = router.layer(from_fn_with_state(state, impersonation_middleware));
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod problem;
pub mod request;

pub use config::ImpersonationConfig;
pub use domain::{Decision, Impersonator};
pub use error::ImpersonationError;
pub use middleware::{ImpersonationState, impersonation_middleware};
pub use request::ImpersonationRequest;

#[cfg(test)]
mod test_support;
