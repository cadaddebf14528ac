//! 설정 관리.
//!
//! 기본값 → `config/default.toml`(선택) → 환경 변수 순서로 병합합니다.
//! 환경 변수는 접두사 없이 소문자 키로 매핑됩니다 (`JWT_SECRET` → `jwt_secret`).
//!
//! 서명 키는 여기서 한 번만 읽혀 [`AuthConfig`]로 주입되며,
//! 토큰/가드 코드는 프로세스 환경을 직접 읽지 않습니다.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// 기본 비밀번호 해시 작업 계수.
pub const DEFAULT_WORK_FACTOR: u32 = 12;
/// 기본 토큰 유효 기간 (일).
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// 애플리케이션 설정.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 시작 시 생성할 기본 관리자 (미설정 시 None)
    pub admin: Option<AdminSeed>,
    /// 내부 에러 상세를 응답에 포함할지 여부 (운영환경에서는 false)
    pub expose_internal_errors: bool,
}

/// 서버 설정.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 연결 URL (없으면 인메모리 저장소 사용)
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

/// 인증 설정.
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT 서명 키
    pub jwt_secret: SecretString,
    /// 비밀번호 해시 작업 계수
    pub password_work_factor: u32,
    /// 토큰 유효 기간 (일)
    pub token_ttl_days: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("password_work_factor", &self.password_work_factor)
            .field("token_ttl_days", &self.token_ttl_days)
            .finish()
    }
}

/// 기본 관리자 계정 자격증명.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 평탄한 키 구조의 원시 설정.
#[derive(Deserialize)]
struct RawSettings {
    jwt_secret: Option<String>,
    admin_email: Option<String>,
    admin_password: Option<String>,
    database_url: Option<String>,
    database_max_connections: u32,
    database_timeout_secs: u64,
    api_host: String,
    api_port: u16,
    request_timeout_secs: u64,
    password_work_factor: u32,
    token_ttl_days: i64,
    expose_internal_errors: bool,
}

impl AppConfig {
    /// 기본값만 채운 빌더.
    ///
    /// 테스트에서는 `set_override`로 값을 덮어쓴 뒤 [`AppConfig::from_config`]에 넘깁니다.
    pub fn defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let server = ServerConfig::default();
        config::Config::builder()
            .set_default("api_host", server.host)?
            .set_default("api_port", i64::from(server.port))?
            .set_default("request_timeout_secs", server.request_timeout_secs as i64)?
            .set_default("database_max_connections", 10_i64)?
            .set_default("database_timeout_secs", 10_i64)?
            .set_default("password_work_factor", i64::from(DEFAULT_WORK_FACTOR))?
            .set_default("token_ttl_days", DEFAULT_TOKEN_TTL_DAYS)?
            .set_default("expose_internal_errors", false)
    }

    /// 기본값, 설정 파일, 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 문자열 그대로 읽고, 숫자/불리언 필드는 역직렬화 시점에 변환합니다.
    /// `0123456789` 같은 서명 키나 `007.50` 같은 비밀번호가 숫자로 바뀌면 안 됩니다.
    pub fn load() -> CoreResult<Self> {
        let config = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(config)
    }

    /// 병합된 설정에서 [`AppConfig`]를 구성하고 검증합니다.
    pub fn from_config(config: config::Config) -> CoreResult<Self> {
        let raw: RawSettings = config.try_deserialize()?;

        let jwt_secret = raw
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| CoreError::Config("JWT_SECRET이 설정되지 않았습니다".to_string()))?;

        if raw.password_work_factor == 0 {
            return Err(CoreError::Config(
                "PASSWORD_WORK_FACTOR는 1 이상이어야 합니다".to_string(),
            ));
        }
        if raw.token_ttl_days <= 0 {
            return Err(CoreError::Config(
                "TOKEN_TTL_DAYS는 1 이상이어야 합니다".to_string(),
            ));
        }

        let admin = match (raw.admin_email, raw.admin_password) {
            (Some(email), Some(password))
                if !email.trim().is_empty() && !password.is_empty() =>
            {
                Some(AdminSeed {
                    email,
                    password: SecretString::from(password),
                })
            }
            (None, None) => None,
            _ => {
                return Err(CoreError::Config(
                    "ADMIN_EMAIL과 ADMIN_PASSWORD는 함께 설정해야 합니다".to_string(),
                ))
            }
        };

        Ok(Self {
            server: ServerConfig {
                host: raw.api_host,
                port: raw.api_port,
                request_timeout_secs: raw.request_timeout_secs,
            },
            database: DatabaseConfig {
                url: raw.database_url.filter(|u| !u.trim().is_empty()),
                max_connections: raw.database_max_connections,
                connection_timeout_secs: raw.database_timeout_secs,
            },
            auth: AuthConfig {
                jwt_secret,
                password_work_factor: raw.password_work_factor,
                token_ttl_days: raw.token_ttl_days,
            },
            admin,
            expose_internal_errors: raw.expose_internal_errors,
        })
    }
}

impl AuthConfig {
    /// 서명 키 길이 (바이트). 로그에 키 자체를 남기지 않고 약한 키를 경고하는 데 사용합니다.
    pub fn secret_len(&self) -> usize {
        self.jwt_secret.expose_secret().len()
    }
}
