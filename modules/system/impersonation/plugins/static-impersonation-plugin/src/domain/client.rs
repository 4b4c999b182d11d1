//! Client implementation for the static impersonation plugin.
//!
//! Implements `CapabilityChecker` and `TokenLookup` using the domain service.

use async_trait::async_trait;
use http::request::Parts;
use impersonation_sdk::{
    CapabilityCheckError, CapabilityChecker, Extras, RequestToken, TokenLookup, TokenLookupError,
};
use request_identity::{ServiceAccountName, UserInfo};

use super::service::Service;

#[async_trait]
impl CapabilityChecker for Service {
    async fn can_impersonate_user(
        &self,
        _request: &Parts,
        actor: &UserInfo,
        user: &str,
    ) -> Result<bool, CapabilityCheckError> {
        Ok(self.allows_user(actor, user))
    }

    async fn can_impersonate_group(
        &self,
        _request: &Parts,
        actor: &UserInfo,
        group: &str,
    ) -> Result<bool, CapabilityCheckError> {
        Ok(self.allows_group(actor, group))
    }

    async fn can_impersonate_extras(
        &self,
        _request: &Parts,
        actor: &UserInfo,
        extras: &Extras,
    ) -> Result<bool, CapabilityCheckError> {
        Ok(self.allows_extras(actor, extras))
    }

    async fn can_impersonate_service_account(
        &self,
        _request: &Parts,
        actor: &UserInfo,
        service_account: &ServiceAccountName,
    ) -> Result<bool, CapabilityCheckError> {
        Ok(self.allows_service_account(actor, service_account))
    }
}

#[async_trait]
impl TokenLookup for Service {
    async fn get(&self, token_id: &str) -> Result<RequestToken, TokenLookupError> {
        self.token(token_id)
            .cloned()
            .ok_or_else(|| TokenLookupError::NotFound(token_id.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::{ImpersonationRule, StaticImpersonationPluginConfig, TokenEntry};

    fn parts() -> Parts {
        http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn service() -> Service {
        Service::from_config(&StaticImpersonationPluginConfig {
            rules: vec![ImpersonationRule {
                subject: "user".to_owned(),
                users: vec!["impUser".to_owned()],
                ..ImpersonationRule::default()
            }],
            tokens: vec![TokenEntry {
                name: "kubeconfig-u-user5zfww".to_owned(),
                user_id: "impUser".to_owned(),
            }],
        })
    }

    #[tokio::test]
    async fn checker_trait_answers_from_rules() {
        let service = service();
        let checker: &dyn CapabilityChecker = &service;
        let actor = UserInfo::builder().name("user").build();

        assert!(
            checker
                .can_impersonate_user(&parts(), &actor, "impUser")
                .await
                .unwrap()
        );
        assert!(
            !checker
                .can_impersonate_group(&parts(), &actor, "impGroup")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let service = service();
        let tokens: &dyn TokenLookup = &service;

        let token = tokens.get("kubeconfig-u-user5zfww").await.unwrap();
        assert_eq!(token.user_id, "impUser");

        match tokens.get("missing").await.unwrap_err() {
            TokenLookupError::NotFound(id) => assert_eq!(id, "missing"),
            other => panic!("Expected NotFound, got: {other:?}"),
        }
    }
}
