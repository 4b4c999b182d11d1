//! Request-token ownership validation.

use impersonation_sdk::TokenLookup;

use crate::error::ImpersonationError;

/// Verify that the `requesttokenid` extra, when present, names a token owned
/// by `username`.
///
/// No ids: nothing to check. More than one id: rejected before any lookup.
///
/// # Errors
///
/// - [`ImpersonationError::MultipleRequestTokenIds`] for more than one id
/// - [`ImpersonationError::RequestTokenLookup`] when the lookup fails
/// - [`ImpersonationError::RequestTokenUserMismatch`] when the owner differs
pub async fn validate_request_token(
    tokens: &dyn TokenLookup,
    token_ids: &[String],
    username: &str,
) -> Result<(), ImpersonationError> {
    let token_id = match token_ids {
        [] => return Ok(()),
        [token_id] => token_id,
        _ => {
            tracing::warn!(
                user = %username,
                count = token_ids.len(),
                "Rejecting impersonation with multiple request token ids"
            );
            return Err(ImpersonationError::MultipleRequestTokenIds);
        }
    };

    let token = tokens.get(token_id).await.map_err(|err| {
        tracing::warn!(user = %username, error = %err, "Request token lookup failed");
        ImpersonationError::RequestTokenLookup(err)
    })?;

    if token.user_id != username {
        tracing::warn!(
            user = %username,
            token_owner = %token.user_id,
            "Request token belongs to a different user"
        );
        return Err(ImpersonationError::RequestTokenUserMismatch);
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use impersonation_sdk::TokenLookupError;

    use super::*;
    use crate::test_support::CountingTokens;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[tokio::test]
    async fn no_token_id_skips_lookup() {
        let tokens = CountingTokens::owned_by("impUser");

        validate_request_token(&tokens, &[], "impUser").await.unwrap();

        assert_eq!(tokens.calls(), 0);
    }

    #[tokio::test]
    async fn owner_match_is_accepted() {
        let tokens = CountingTokens::owned_by("impUser");

        validate_request_token(&tokens, &ids(&["kubeconfig-u-user5zfww"]), "impUser")
            .await
            .unwrap();

        assert_eq!(tokens.calls(), 1);
    }

    #[tokio::test]
    async fn owner_mismatch_is_rejected() {
        let tokens = CountingTokens::owned_by("someoneelse");

        let err = validate_request_token(&tokens, &ids(&["kubeconfig-u-user5zfww"]), "impUser")
            .await
            .unwrap_err();

        assert!(matches!(err, ImpersonationError::RequestTokenUserMismatch));
        assert_eq!(tokens.calls(), 1);
    }

    #[tokio::test]
    async fn multiple_ids_never_reach_lookup() {
        let tokens = CountingTokens::owned_by("impUser");

        let err = validate_request_token(&tokens, &ids(&["a", "b"]), "impUser")
            .await
            .unwrap_err();

        assert!(matches!(err, ImpersonationError::MultipleRequestTokenIds));
        assert_eq!(tokens.calls(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_wrapped() {
        let tokens = CountingTokens::failing(TokenLookupError::NotFound("missing".to_owned()));

        let err = validate_request_token(&tokens, &ids(&["missing"]), "impUser")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "error getting request token: token \"missing\" not found"
        );
        assert_eq!(tokens.calls(), 1);
    }
}
