#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Impersonation SDK
//!
//! Contracts the impersonation middleware consumes:
//!
//! - [`CapabilityChecker`] - answers "may this actor impersonate that target"
//! - [`TokenLookup`] - resolves request-token identifiers to their owner
//! - [`Dimension`], [`ImpersonationTarget`], [`RequestToken`] - shared models
//! - [`CapabilityCheckError`], [`TokenLookupError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use impersonation_sdk::CapabilityChecker;
//!
//! let allowed = checker
//!     .can_impersonate_user(&parts, &actor, "impUser")
//!     .await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

pub use api::{CapabilityChecker, TokenLookup};
pub use error::{CapabilityCheckError, TokenLookupError};
pub use models::{Dimension, Extras, ImpersonationTarget, RequestToken};
