//! JWT 토큰 처리.
//!
//! 로그인 시 발급되는 Access Token의 서명/검증 로직.
//! 서명 키는 생성 시 주입되며, 이 모듈은 프로세스 환경을 읽지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rolegate_core::{Account, Role};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Access Token 페이로드.
///
/// 발급 시점의 계정 식별자/이메일/역할을 복사해 둡니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 계정 ID
    pub sub: String,
    /// 이메일
    pub email: String,
    /// 발급 시점의 역할
    pub role: Role,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `account_id` - 계정 ID
    /// * `email` - 이메일
    /// * `role` - 역할
    /// * `ttl` - 유효 기간
    pub fn new(account_id: Uuid, email: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            email: email.into(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// 계정의 현재 상태로 Claims 생성.
    pub fn for_account(account: &Account, ttl: Duration) -> Self {
        Self::new(account.id, account.email.clone(), account.role, ttl)
    }

    /// `sub`를 계정 ID로 파싱. 형식이 잘못되면 None.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("서명이 유효하지 않습니다")]
    InvalidSignature,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// 토큰 발급/검증기.
///
/// HS256으로 서명하며 만료 검증에 유예 시간(leeway)을 두지 않습니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// 주입된 서명 키와 유효 기간으로 생성.
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
            ttl,
        }
    }

    /// 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 계정에 대한 Access Token 발급.
    pub fn issue(&self, account: &Account) -> Result<String, JwtError> {
        self.sign(&Claims::for_account(account, self.ttl))
    }

    /// 임의의 Claims 서명.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(JwtError::from)
    }

    /// 서명과 만료를 검증하고 Claims를 반환합니다.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &"HS256")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
