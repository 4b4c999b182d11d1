//! Identity rewrite for granted impersonations.

use impersonation_sdk::Extras;
use request_identity::UserInfo;
use request_identity::constants::AUTHENTICATED_GROUP;

/// The identity a request carries after impersonating `username`.
///
/// Name and uid are both the target user name. Groups are the requested
/// groups followed by the authenticated marker group.
#[must_use]
pub fn impersonated_identity(username: &str, groups: &[String], extras: &Extras) -> UserInfo {
    UserInfo::builder()
        .name(username)
        .uid(username)
        .groups(groups.to_vec())
        .group(AUTHENTICATED_GROUP)
        .extra(extras.clone())
        .build()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn marker_group_comes_last() {
        let user = impersonated_identity("impUser", &["impGroup".to_owned()], &Extras::new());

        assert_eq!(user.name(), "impUser");
        assert_eq!(user.uid(), "impUser");
        assert_eq!(user.groups(), &["impGroup", "system:authenticated"]);
        assert!(user.extra().is_empty());
    }

    #[test]
    fn extras_are_copied_verbatim() {
        let mut extras = Extras::new();
        extras.insert("foo".to_owned(), vec!["bar".to_owned()]);
        extras.insert(
            "requesttokenid".to_owned(),
            vec!["kubeconfig-u-user5zfww".to_owned()],
        );

        let user = impersonated_identity("impUser", &[], &extras);

        assert_eq!(user.groups(), &["system:authenticated"]);
        assert_eq!(user.extra(), &extras);
    }
}
