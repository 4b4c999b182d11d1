#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::request::Parts;
use impersonation_sdk::{
    CapabilityCheckError, CapabilityChecker, Dimension, Extras, RequestToken, TokenLookup,
    TokenLookupError,
};
use parking_lot::Mutex;
use request_identity::{ServiceAccountName, UserInfo};

/// The authenticated caller used across tests.
#[must_use]
pub fn actor() -> UserInfo {
    UserInfo::builder().name("user").uid("user").build()
}

#[must_use]
pub fn request_parts() -> Parts {
    let (parts, ()) = axum::http::Request::builder()
        .uri("/api/v1/namespaces")
        .body(())
        .unwrap()
        .into_parts();
    parts
}

/// Scripted answer for one dimension.
#[derive(Debug, Clone, Copy)]
pub enum Answer {
    Allow,
    Deny,
    Fail(&'static str),
    /// The check must not be reached.
    Unexpected,
}

/// Capability checker returning scripted answers and recording every call.
pub struct ScriptedChecker {
    user: Answer,
    group: Answer,
    groups: HashMap<String, Answer>,
    extras: Answer,
    service_account: Answer,
    calls: Mutex<Vec<(Dimension, String)>>,
}

impl ScriptedChecker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: Answer::Unexpected,
            group: Answer::Unexpected,
            groups: HashMap::new(),
            extras: Answer::Unexpected,
            service_account: Answer::Unexpected,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn user(mut self, answer: Answer) -> Self {
        self.user = answer;
        self
    }

    #[must_use]
    pub fn group(mut self, answer: Answer) -> Self {
        self.group = answer;
        self
    }

    #[must_use]
    pub fn group_answers(mut self, answers: &[(&str, Answer)]) -> Self {
        for (group, answer) in answers {
            self.groups.insert((*group).to_owned(), *answer);
        }
        self
    }

    #[must_use]
    pub fn extras(mut self, answer: Answer) -> Self {
        self.extras = answer;
        self
    }

    #[must_use]
    pub fn service_account(mut self, answer: Answer) -> Self {
        self.service_account = answer;
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<(Dimension, String)> {
        self.calls.lock().clone()
    }

    fn answer(
        &self,
        dimension: Dimension,
        target: String,
        answer: Answer,
    ) -> Result<bool, CapabilityCheckError> {
        self.calls.lock().push((dimension, target));
        match answer {
            Answer::Allow => Ok(true),
            Answer::Deny => Ok(false),
            Answer::Fail(msg) => Err(CapabilityCheckError::Internal(msg.to_owned())),
            Answer::Unexpected => panic!("unexpected {dimension} check"),
        }
    }
}

#[async_trait]
impl CapabilityChecker for ScriptedChecker {
    async fn can_impersonate_user(
        &self,
        _request: &Parts,
        _actor: &UserInfo,
        user: &str,
    ) -> Result<bool, CapabilityCheckError> {
        self.answer(Dimension::User, user.to_owned(), self.user)
    }

    async fn can_impersonate_group(
        &self,
        _request: &Parts,
        _actor: &UserInfo,
        group: &str,
    ) -> Result<bool, CapabilityCheckError> {
        let answer = self.groups.get(group).copied().unwrap_or(self.group);
        self.answer(Dimension::Group, group.to_owned(), answer)
    }

    async fn can_impersonate_extras(
        &self,
        _request: &Parts,
        _actor: &UserInfo,
        extras: &Extras,
    ) -> Result<bool, CapabilityCheckError> {
        let keys = extras.keys().cloned().collect::<Vec<_>>().join(",");
        self.answer(Dimension::Extras, keys, self.extras)
    }

    async fn can_impersonate_service_account(
        &self,
        _request: &Parts,
        _actor: &UserInfo,
        service_account: &ServiceAccountName,
    ) -> Result<bool, CapabilityCheckError> {
        self.answer(
            Dimension::ServiceAccount,
            service_account.username(),
            self.service_account,
        )
    }
}

/// Token lookup that counts calls. Every id resolves to a token owned by
/// the configured user, unless built with [`CountingTokens::failing`].
pub struct CountingTokens {
    owner: String,
    failure: Mutex<Option<TokenLookupError>>,
    calls: AtomicUsize,
}

impl CountingTokens {
    #[must_use]
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: owner.to_owned(),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn failing(err: TokenLookupError) -> Self {
        Self {
            owner: String::new(),
            failure: Mutex::new(Some(err)),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenLookup for CountingTokens {
    async fn get(&self, token_id: &str) -> Result<RequestToken, TokenLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().take() {
            return Err(err);
        }
        Ok(RequestToken {
            name: token_id.to_owned(),
            user_id: self.owner.clone(),
        })
    }
}
