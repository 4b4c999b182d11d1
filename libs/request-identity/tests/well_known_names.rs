#![allow(clippy::unwrap_used, clippy::expect_used)]

use request_identity::ServiceAccountName;
use request_identity::UserInfo;
use request_identity::constants::{
    AUTHENTICATED_GROUP, REQUEST_TOKEN_ID_EXTRA, SERVICE_ACCOUNT_USERNAME_PREFIX,
};

#[test]
fn marker_group_is_system_authenticated() {
    assert_eq!(AUTHENTICATED_GROUP, "system:authenticated");
}

#[test]
fn request_token_extra_key_is_lower_case() {
    assert_eq!(REQUEST_TOKEN_ID_EXTRA, REQUEST_TOKEN_ID_EXTRA.to_ascii_lowercase());
}

#[test]
fn service_account_round_trips_through_display() {
    let username = format!("{SERVICE_ACCOUNT_USERNAME_PREFIX}default:test");
    let sa = ServiceAccountName::parse(&username).unwrap();

    assert_eq!(sa.to_string(), username);
}

#[test]
fn default_user_info_is_empty() {
    let user = UserInfo::default();

    assert!(user.name().is_empty());
    assert!(user.groups().is_empty());
    assert!(user.extra().is_empty());
}
