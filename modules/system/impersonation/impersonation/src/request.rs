//! Impersonation header parsing.
//!
//! Recognized headers (names are case-insensitive on the wire):
//!
//! - `Impersonate-User` - the user to act as
//! - `Impersonate-Group` - repeatable, one group per occurrence
//! - `Impersonate-Extra-<key>` - repeatable, one value per occurrence
//!
//! Parsing performs no authorization. A value that is not visible ASCII
//! rejects the whole request rather than being skipped, so no impersonation
//! header ever travels downstream without having been checked.

use axum::http::{HeaderMap, HeaderName};
use impersonation_sdk::{Extras, ImpersonationTarget};
use request_identity::constants::REQUEST_TOKEN_ID_EXTRA;

use crate::error::ImpersonationError;

pub const IMPERSONATE_USER: HeaderName = HeaderName::from_static("impersonate-user");
pub const IMPERSONATE_GROUP: HeaderName = HeaderName::from_static("impersonate-group");
pub const IMPERSONATE_EXTRA_PREFIX: &str = "impersonate-extra-";

/// The identity a caller asked to assume, as carried by the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpersonationRequest {
    target: ImpersonationTarget,
    groups: Vec<String>,
    extras: Extras,
}

impl ImpersonationRequest {
    /// Build a request directly, bypassing header parsing.
    #[must_use]
    pub fn new(target: ImpersonationTarget, groups: Vec<String>, extras: Extras) -> Self {
        Self {
            target,
            groups,
            extras,
        }
    }

    /// Extract the impersonation request from headers.
    ///
    /// Returns `Ok(None)` when no impersonation header is present.
    ///
    /// # Errors
    ///
    /// - [`ImpersonationError::UnreadableHeader`] when an impersonation header
    ///   value is not visible ASCII
    /// - [`ImpersonationError::MissingTargetUser`] when groups or extras are
    ///   present without a target user
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>, ImpersonationError> {
        let user = header_values(headers, &IMPERSONATE_USER)?
            .into_iter()
            .find(|v| !v.is_empty());
        let groups = header_values(headers, &IMPERSONATE_GROUP)?;
        let extras = extract_extras(headers)?;

        let Some(user) = user else {
            if groups.is_empty() && extras.is_empty() {
                return Ok(None);
            }
            return Err(ImpersonationError::MissingTargetUser);
        };

        Ok(Some(Self {
            target: ImpersonationTarget::from_username(&user),
            groups,
            extras,
        }))
    }

    #[must_use]
    pub fn target(&self) -> &ImpersonationTarget {
        &self.target
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    #[must_use]
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Values sent under the reserved `requesttokenid` extra, if any.
    #[must_use]
    pub fn request_token_ids(&self) -> &[String] {
        self.extras
            .get(REQUEST_TOKEN_ID_EXTRA)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Whether `name` is one of the recognized impersonation headers.
#[must_use]
pub fn is_impersonation_header(name: &HeaderName) -> bool {
    *name == IMPERSONATE_USER
        || *name == IMPERSONATE_GROUP
        || name.as_str().starts_with(IMPERSONATE_EXTRA_PREFIX)
}

/// Remove every impersonation header from `headers`.
///
/// Returns the number of distinct header names removed.
pub fn strip_impersonation_headers(headers: &mut HeaderMap) -> usize {
    let names: Vec<HeaderName> = headers
        .keys()
        .filter(|name| is_impersonation_header(name))
        .cloned()
        .collect();
    for name in &names {
        headers.remove(name);
    }
    names.len()
}

fn header_values(
    headers: &HeaderMap,
    name: &HeaderName,
) -> Result<Vec<String>, ImpersonationError> {
    headers
        .get_all(name)
        .iter()
        .map(|v| {
            v.to_str()
                .map(str::to_owned)
                .map_err(|_| ImpersonationError::UnreadableHeader(name.clone()))
        })
        .collect()
}

fn extract_extras(headers: &HeaderMap) -> Result<Extras, ImpersonationError> {
    let mut extras = Extras::new();
    for name in headers.keys() {
        let Some(key) = name.as_str().strip_prefix(IMPERSONATE_EXTRA_PREFIX) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let values = header_values(headers, name)?;
        if !values.is_empty() {
            extras.insert(key.to_owned(), values);
        }
    }
    Ok(extras)
}
