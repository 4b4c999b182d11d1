//! Service-account user names: `system:serviceaccount:<namespace>:<name>`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::SERVICE_ACCOUNT_USERNAME_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceAccountNameError {
    #[error("user name does not start with 'system:serviceaccount:'")]
    MissingPrefix,

    #[error("expected '<namespace>:<name>' after the service account prefix, got '{0}'")]
    Malformed(String),
}

/// A parsed service-account user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceAccountName {
    namespace: String,
    name: String,
}

impl ServiceAccountName {
    /// Parse a full service-account user name.
    ///
    /// # Errors
    ///
    /// Returns an error when the prefix is missing, or when the remainder is
    /// not exactly two non-empty `:`-separated segments.
    pub fn parse(username: &str) -> Result<Self, ServiceAccountNameError> {
        let rest = username
            .strip_prefix(SERVICE_ACCOUNT_USERNAME_PREFIX)
            .ok_or(ServiceAccountNameError::MissingPrefix)?;

        match rest.split_once(':') {
            Some((namespace, name))
                if !namespace.is_empty() && !name.is_empty() && !name.contains(':') =>
            {
                Ok(Self {
                    namespace: namespace.to_owned(),
                    name: name.to_owned(),
                })
            }
            _ => Err(ServiceAccountNameError::Malformed(rest.to_owned())),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full user name, `system:serviceaccount:<namespace>:<name>`.
    #[must_use]
    pub fn username(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServiceAccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SERVICE_ACCOUNT_USERNAME_PREFIX}{}:{}",
            self.namespace, self.name
        )
    }
}

impl FromStr for ServiceAccountName {
    type Err = ServiceAccountNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
