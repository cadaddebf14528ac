//! 계정 서비스 모듈.
//!
//! 라우트 핸들러와 저장소 사이의 가입/로그인 로직을 제공합니다.

pub mod auth;

pub use auth::{AuthService, LoginRequest, LoginResponse, RegisterRequest};
