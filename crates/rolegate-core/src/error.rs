//! 코어 에러 타입.
//!
//! 설정 로드, 로깅 초기화, 도메인 값 파싱 중 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 코어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 로깅 초기화 에러
    #[error("로깅 초기화 에러: {0}")]
    Logging(String),

    /// 알 수 없는 역할
    #[error("알 수 없는 역할: {0}")]
    InvalidRole(String),
}

/// 코어 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
