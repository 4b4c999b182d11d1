//! Well-known identity names shared by the authentication and impersonation layers.

/// Group implicitly granted to every identity that passed authentication.
///
/// Added to an impersonated identity during the rewrite; it is never the
/// subject of an authorization check.
pub const AUTHENTICATED_GROUP: &str = "system:authenticated";

/// Prefix of every service-account user name.
///
/// Full form: `system:serviceaccount:<namespace>:<name>`.
pub const SERVICE_ACCOUNT_USERNAME_PREFIX: &str = "system:serviceaccount:";

/// Reserved extra key carrying the identifier of the token the caller
/// presents as proof of the impersonated identity.
pub const REQUEST_TOKEN_ID_EXTRA: &str = "requesttokenid";
