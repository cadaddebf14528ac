//! 자격증명 저장소.
//!
//! 계정 영속화를 라우트/서비스 로직에서 분리합니다.
//! - [`PgAccountStore`]: PostgreSQL 기반 (운영)
//! - [`InMemoryAccountStore`]: 프로세스 메모리 기반 (테스트, `DATABASE_URL` 미설정 시)
//!
//! 이메일 고유성은 저장소 제약이 아니라 가입 흐름의 사전 조회로만 보장됩니다.
//! 동일 이메일로 동시에 가입하면 두 요청 모두 사전 조회를 통과할 수 있으며, 이는 알려진 경쟁 조건입니다.

mod accounts;
mod memory;

pub use accounts::{AccountRow, PgAccountStore};
pub use memory::InMemoryAccountStore;

use async_trait::async_trait;
use rolegate_core::{Account, NewAccount};
use uuid::Uuid;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),
    #[error("마이그레이션 실패: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("이미 사용 중인 값입니다: {0}")]
    Duplicate(String),
    #[error("손상된 레코드: {0}")]
    Corrupt(String),
}

/// 저장소 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

/// 계정 저장소 트레이트.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 이메일로 계정 조회 (정확히 일치).
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// ID로 계정 조회.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// 전체 계정 조회 (생성 순).
    async fn list(&self) -> StoreResult<Vec<Account>>;

    /// 새 계정 저장. 이름이 중복되면 [`StoreError::Duplicate`].
    async fn insert(&self, account: NewAccount) -> StoreResult<Account>;

    /// 저장소 연결 상태 확인.
    async fn ping(&self) -> StoreResult<()>;
}
