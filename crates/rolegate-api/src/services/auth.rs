//! 가입/로그인/관리자 시드 서비스.

use std::sync::Arc;

use rolegate_core::{Account, AdminSeed, NewAccount, Role};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::error::AuthError;
use crate::repository::AccountStore;

/// 시드 관리자 계정 이름.
pub const ADMIN_DEFAULT_NAME: &str = "Admin Default";

/// 토큰 타입.
pub const AUTH_TYPE_BEARER: &str = "Bearer";

// ==================== 커스텀 검증 함수 ====================

/// 공백만 있는 값 거부.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("값이 비어 있습니다".into()));
    }
    Ok(())
}

// ==================== 요청/응답 ====================

/// 가입 요청.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "이름은 필수입니다"),
        custom(function = "not_blank", message = "이름은 필수입니다")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "이메일은 필수입니다"),
        custom(function = "not_blank", message = "이메일은 필수입니다")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "비밀번호 확인은 필수입니다"),
        must_match(other = "password", message = "비밀번호가 일치하지 않습니다")
    )]
    pub confirm_password: String,
}

impl RegisterRequest {
    const FIELD_ORDER: &'static [&'static str] = &["name", "email", "password", "confirm_password"];
}

/// 로그인 요청.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "이메일은 필수입니다"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}

impl LoginRequest {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password"];
}

/// 로그인 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// 항상 "Bearer"
    pub auth_type: String,
    pub token: String,
}

/// 필드 순서상 첫 번째 검증 실패 메시지를 꺼냅니다.
fn first_violation(errors: &ValidationErrors, order: &[&str]) -> AuthError {
    let field_errors = errors.field_errors();

    let message = order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .find_map(|errs| errs.first())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .unwrap_or_else(|| "잘못된 요청입니다".to_string());

    AuthError::Validation(message)
}

// ==================== 서비스 ====================

/// 계정 가입/로그인 서비스.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 새 `common` 계정을 만듭니다. 토큰은 발급하지 않습니다.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AuthError> {
        request
            .validate()
            .map_err(|e| first_violation(&e, RegisterRequest::FIELD_ORDER))?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            debug!(email = %request.email, "Registration rejected: email in use");
            return Err(AuthError::Conflict("이미 사용 중인 이메일입니다".to_string()));
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let account = self
            .store
            .insert(NewAccount::new(request.name, request.email, password_hash))
            .await?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// 자격증명을 확인하고 Access Token을 발급합니다.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        request
            .validate()
            .map_err(|e| first_violation(&e, LoginRequest::FIELD_ORDER))?;

        let account = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AuthError::NotFound("계정을 찾을 수 없습니다".to_string()))?;

        if let Err(e) = self
            .hasher
            .verify(&request.password, &account.password_hash)
            .await
        {
            debug!(account_id = %account.id, "Login rejected");
            return Err(e.into());
        }

        let token = self.tokens.issue(&account)?;
        info!(account_id = %account.id, role = %account.role, "Login succeeded");

        Ok(LoginResponse {
            auth_type: AUTH_TYPE_BEARER.to_string(),
            token,
        })
    }

    /// 해당 이메일의 계정이 없을 때만 기본 관리자를 생성합니다.
    ///
    /// 조회 후 생성하므로 여러 인스턴스가 동시에 시작하면 중복 생성될 수 있습니다.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<Option<Account>, AuthError> {
        if self.store.find_by_email(&seed.email).await?.is_some() {
            debug!(email = %seed.email, "Admin account already present");
            return Ok(None);
        }

        let password_hash = self.hasher.hash(seed.password.expose_secret()).await?;
        let account = self
            .store
            .insert(
                NewAccount::new(ADMIN_DEFAULT_NAME, seed.email.clone(), password_hash)
                    .with_role(Role::Admin),
            )
            .await?;

        info!(account_id = %account.id, email = %account.email, "Default admin created");
        Ok(Some(account))
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("work_factor", &self.hasher.work_factor())
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
