//! # Rolegate Core
//!
//! 인증 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 HTTP/DB 계층과 무관한 기본 타입을 제공합니다:
//! - 계정 및 역할 정의
//! - 설정 관리
//! - 로깅 인프라
//! - 공통 에러 타입

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
