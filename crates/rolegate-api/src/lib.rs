//! 가입/로그인 및 역할 기반 접근 제어 REST API.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 발급 및 인가 가드
//! - Argon2id 비밀번호 해싱
//! - PostgreSQL / 인메모리 계정 저장소
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰, 비밀번호, 인가 가드
//! - [`services`]: 가입/로그인/관리자 시드
//! - [`repository`]: 계정 저장소
//! - [`middleware`]: HTTP 미들웨어

pub mod auth;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{
    require_role, AuthenticatedAccount, AuthorizationGuard, Claims, CurrentAccount,
    PasswordHasher, RequiredRole, TokenIssuer,
};
pub use error::{ApiErrorResponse, ApiResult, AuthError};
pub use repository::{AccountStore, InMemoryAccountStore, PgAccountStore, StoreError};
pub use routes::*;
pub use services::AuthService;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, create_test_state_with_store};
