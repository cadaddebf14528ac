//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 여러 요청 간에 공유됩니다. 모든 필드는 생성 후 변경되지 않습니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::{AuthorizationGuard, PasswordHasher, RequiredRole, TokenIssuer};
use crate::repository::AccountStore;
use crate::services::AuthService;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 계정 저장소
    pub store: Arc<dyn AccountStore>,

    /// 토큰 발급/검증기
    pub tokens: Arc<TokenIssuer>,

    /// 가입/로그인 서비스
    pub auth: AuthService,

    /// 저장소 종류 ("postgres" | "memory")
    pub store_kind: &'static str,

    /// 내부 에러 상세를 응답에 포함할지 여부
    pub expose_internal_errors: bool,

    /// API 버전
    pub version: String,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        let auth = AuthService::new(store.clone(), hasher, tokens.clone());

        Self {
            store,
            tokens,
            auth,
            store_kind: "memory",
            expose_internal_errors: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 저장소 종류 표시.
    pub fn with_store_kind(mut self, kind: &'static str) -> Self {
        self.store_kind = kind;
        self
    }

    /// 내부 에러 상세 노출 여부 설정.
    pub fn with_expose_internal_errors(mut self, expose: bool) -> Self {
        self.expose_internal_errors = expose;
        self
    }

    /// 지정한 역할을 요구하는 인가 가드.
    pub fn guard(&self, required: impl Into<RequiredRole>) -> AuthorizationGuard {
        AuthorizationGuard::new(self.store.clone(), self.tokens.clone(), required.into())
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store_kind", &self.store_kind)
            .field("auth", &self.auth)
            .field("expose_internal_errors", &self.expose_internal_errors)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// 테스트용 서명 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-api-testing-minimum-32-chars";

/// 테스트용 AppState 생성 헬퍼.
///
/// 인메모리 저장소와 낮은 작업 계수를 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    create_test_state_with_store(Arc::new(crate::repository::InMemoryAccountStore::new()))
}

/// 주어진 저장소로 테스트용 AppState 생성.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state_with_store(store: Arc<dyn AccountStore>) -> AppState {
    use secrecy::SecretString;

    let tokens = TokenIssuer::new(
        &SecretString::from(TEST_JWT_SECRET.to_string()),
        chrono::Duration::days(rolegate_core::DEFAULT_TOKEN_TTL_DAYS),
    );
    let hasher = PasswordHasher::new(1).expect("Failed to create PasswordHasher for test");

    AppState::new(store, hasher, Arc::new(tokens))
}
