//! 인가 가드.
//!
//! 보호된 라우트 앞에서 다음 순서로 요청을 검사합니다.
//!
//! ```text
//! START → TOKEN_PRESENT? → TOKEN_VALID? → SUBJECT_EXISTS? → ROLE_CURRENT? → ROLE_MATCH? → ADMIT
//! ```
//!
//! 각 단계는 실패 시 바로 종료되며, 통과한 요청에는 [`AuthenticatedAccount`]가
//! request extension으로 붙습니다.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use rolegate_core::Account;
use tracing::{debug, warn};

use super::{Claims, RequiredRole, TokenIssuer};
use crate::error::AuthError;
use crate::repository::AccountStore;

/// 가드를 통과한 요청의 인증 정보.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    /// 검증된 토큰 Claims
    pub claims: Claims,
    /// 저장소에서 다시 읽은 현재 계정
    pub account: Account,
}

/// 역할 기반 인가 가드.
#[derive(Clone)]
pub struct AuthorizationGuard {
    store: Arc<dyn AccountStore>,
    tokens: Arc<TokenIssuer>,
    required: RequiredRole,
}

impl AuthorizationGuard {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<TokenIssuer>,
        required: RequiredRole,
    ) -> Self {
        Self {
            store,
            tokens,
            required,
        }
    }

    /// 요구 역할.
    pub fn required(&self) -> RequiredRole {
        self.required
    }

    /// Authorization 헤더 값을 검사해 요청을 허용하거나 거부합니다.
    pub async fn authorize(
        &self,
        header: Option<&HeaderValue>,
    ) -> Result<AuthenticatedAccount, AuthError> {
        let token = bearer_token(header)?;

        let claims = self.tokens.verify(token).map_err(|e| {
            debug!(error = %e, "Rejected token");
            AuthError::InvalidToken
        })?;

        let account_id = claims.subject_id().ok_or_else(|| {
            debug!(sub = %claims.sub, "Token subject is not a valid account id");
            AuthError::InvalidToken
        })?;

        let account = self.store.find_by_id(account_id).await?.ok_or_else(|| {
            debug!(account_id = %account_id, "Token subject no longer exists");
            AuthError::UnknownSubject
        })?;

        if claims.role != account.role {
            warn!(
                account_id = %account.id,
                token_role = %claims.role,
                current_role = %account.role,
                "Stale role in token"
            );
            return Err(AuthError::Forbidden);
        }

        if !self.required.admits(account.role) {
            debug!(
                account_id = %account.id,
                role = %account.role,
                required = %self.required,
                "Role not permitted"
            );
            return Err(AuthError::Forbidden);
        }

        Ok(AuthenticatedAccount { claims, account })
    }
}

impl std::fmt::Debug for AuthorizationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGuard")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// `"<scheme> <token>"` 형식의 헤더에서 토큰 부분을 꺼냅니다. scheme은 검사하지 않습니다.
fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = header
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)?;

    value.split_whitespace().nth(1).ok_or_else(|| {
        debug!("Authorization header has no token part");
        AuthError::InvalidToken
    })
}

/// 라우트 레이어용 인가 미들웨어.
///
/// ```rust,ignore
/// Router::new()
///     .route("/users", get(list_users))
///     .route_layer(middleware::from_fn_with_state(guard, require_role));
/// ```
pub async fn require_role(
    State(guard): State<AuthorizationGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let authenticated = guard
        .authorize(request.headers().get(AUTHORIZATION))
        .await?;
    debug!(
        account_id = %authenticated.account.id,
        required = %guard.required(),
        "Request authorized"
    );

    request.extensions_mut().insert(authenticated);
    Ok(next.run(request).await)
}

/// 가드를 통과한 계정을 꺼내는 추출기.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AuthenticatedAccount);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .map(CurrentAccount)
            .ok_or_else(|| AuthError::Internal("route is not behind the authorization guard".into()))
    }
}
