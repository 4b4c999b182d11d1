//! Domain models shared between the impersonation middleware and its collaborators.

use std::collections::BTreeMap;
use std::fmt;

use request_identity::ServiceAccountName;
use serde::{Deserialize, Serialize};

/// Requested extra attributes: key to ordered values.
pub type Extras = BTreeMap<String, Vec<String>>;

/// The identity dimension a capability check is about.
///
/// The `Display` form is part of the wire contract: it is embedded verbatim
/// in denial and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    User,
    Group,
    Extras,
    ServiceAccount,
}

impl Dimension {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Extras => "extras",
            Self::ServiceAccount => "service account",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user an actor asks to become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpersonationTarget {
    /// An ordinary user name.
    User(String),
    /// A `system:serviceaccount:<namespace>:<name>` user name.
    ServiceAccount(ServiceAccountName),
}

impl ImpersonationTarget {
    /// Classify a requested user name.
    #[must_use]
    pub fn from_username(username: &str) -> Self {
        ServiceAccountName::parse(username)
            .map_or_else(|_| Self::User(username.to_owned()), Self::ServiceAccount)
    }

    /// The requested user name, exactly as it was asked for.
    #[must_use]
    pub fn username(&self) -> String {
        match self {
            Self::User(name) => name.clone(),
            Self::ServiceAccount(sa) => sa.username(),
        }
    }

    #[must_use]
    pub fn is_service_account(&self) -> bool {
        matches!(self, Self::ServiceAccount(_))
    }
}

/// A previously issued token, as seen by the token lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
    /// Token identifier (the value carried in the `requesttokenid` extra).
    pub name: String,
    /// Identifier of the user owning the token.
    pub user_id: String,
}
