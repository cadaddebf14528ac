//! API 에러 타입.
//!
//! 인증/인가 흐름의 에러 분류([`AuthError`])와 모든 엔드포인트가 공유하는
//! 응답 형식([`ApiErrorResponse`])을 정의합니다.
//!
//! # 상태 코드 매핑
//!
//! | 에러 | 상태 | 코드 |
//! |---|---|---|
//! | `Validation` | 400 | `VALIDATION_ERROR` |
//! | `Conflict` | 409 | `CONFLICT` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `InvalidCredentials` | 401 | `INVALID_CREDENTIALS` |
//! | `MissingToken` | 401 | `MISSING_TOKEN` |
//! | `InvalidToken` | 401 | `INVALID_TOKEN` |
//! | `UnknownSubject` | 401 | `UNKNOWN_SUBJECT` |
//! | `Forbidden` | 403 | `FORBIDDEN` |
//! | `Internal` | 500 | `INTERNAL_ERROR` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{JwtError, PasswordError};
use crate::repository::StoreError;

/// 통합 API 에러 응답.
///
/// ```json
/// {
///   "code": "FORBIDDEN",
///   "message": "접근 권한이 없습니다"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 상세 정보 (내부 에러 진단용, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// 인증/인가 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 누락되었거나 잘못된 입력
    #[error("{0}")]
    Validation(String),
    /// 고유해야 하는 값의 중복
    #[error("{0}")]
    Conflict(String),
    /// 일치하는 레코드 없음
    #[error("{0}")]
    NotFound(String),
    /// 비밀번호 불일치
    #[error("비밀번호가 올바르지 않습니다")]
    InvalidCredentials,
    /// Authorization 헤더 없음
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    /// 서명/형식/만료 검증 실패
    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,
    /// 토큰 주체 계정이 존재하지 않음
    #[error("토큰의 계정을 찾을 수 없습니다")]
    UnknownSubject,
    /// 역할 불일치
    #[error("접근 권한이 없습니다")]
    Forbidden,
    /// 예상하지 못한 내부 에러 (상세는 응답 본문에 기본적으로 포함되지 않음)
    #[error("서버 내부 에러가 발생했습니다")]
    Internal(String),
}

/// 내부 에러 상세. 응답 extension으로 전달되어
/// [`crate::middleware::expose_internal_errors`]가 진단 모드에서만 본문에 붙입니다.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl AuthError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict(_) => StatusCode::CONFLICT,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 응답 본문 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Conflict(_) => "CONFLICT",
            AuthError::NotFound(_) => "NOT_FOUND",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UnknownSubject => "UNKNOWN_SUBJECT",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorResponse::new(self.code(), self.to_string());

        let mut response = (status, Json(body)).into_response();
        if let AuthError::Internal(detail) = self {
            tracing::error!(error = %detail, "Internal error");
            response
                .extensions_mut()
                .insert(InternalErrorDetail(detail));
        }
        response
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(value) => {
                AuthError::Conflict(format!("이미 사용 중인 값입니다: {}", value))
            }
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthError::InvalidCredentials,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(e) => AuthError::Internal(e.to_string()),
            JwtError::TokenExpired | JwtError::InvalidSignature | JwtError::InvalidToken => {
                AuthError::InvalidToken
            }
        }
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, AuthError>;
