//! 비밀번호 해싱.
//!
//! Argon2id 기반 해싱 및 검증. 작업 계수(work factor)는 Argon2의 반복 횟수(time cost)로
//! 매핑되며, 값이 클수록 추측 1회당 공격자 비용이 커지고 요청 지연도 함께 늘어납니다.
//!
//! 해싱은 CPU를 오래 점유하므로 `spawn_blocking`에서 실행됩니다.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호가 일치하지 않습니다")]
    Mismatch,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
    #[error("잘못된 작업 계수: {0}")]
    InvalidWorkFactor(u32),
}

/// 설정된 작업 계수로 해싱하는 비밀번호 해셔.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// 작업 계수(Argon2 time cost)를 지정하여 생성.
    ///
    /// 메모리/병렬도는 Argon2 기본값을 사용합니다.
    pub fn new(work_factor: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|_| PasswordError::InvalidWorkFactor(work_factor))?;

        Ok(Self { params })
    }

    /// 현재 작업 계수.
    pub fn work_factor(&self) -> u32 {
        self.params.t_cost()
    }

    /// 비밀번호를 해싱하여 PHC 문자열을 반환합니다. 솔트는 매번 새로 생성됩니다.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let params = self.params.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hash_with(params, &password))
            .await
            .map_err(|_| PasswordError::HashingFailed)?
    }

    /// 저장된 해시와 비밀번호를 상수 시간 비교합니다.
    ///
    /// 해시에 인코딩된 파라미터를 사용하므로 작업 계수가 바뀐 뒤에도 기존 해시를 검증할 수 있습니다.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || verify_with(&password, &hash))
            .await
            .map_err(|_| PasswordError::HashingFailed)?
    }
}

fn hash_with(params: Params, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

fn verify_with(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            argon2::password_hash::Error::Password => PasswordError::Mismatch,
            _ => PasswordError::InvalidHashFormat,
        })
}
