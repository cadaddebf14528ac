//! 계정 엔티티.
//!
//! 자격증명 저장소에 영속되는 사용자 레코드입니다.
//! 평문 비밀번호는 절대 보관하지 않으며, 해시 역시 API 응답으로 노출되지 않도록
//! `Serialize`를 구현하지 않습니다.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Role;

/// 영속된 계정.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// 시스템이 부여한 불변 식별자
    pub id: Uuid,
    /// 표시 이름 (저장소 수준 고유)
    pub name: String,
    /// 로그인 조회 키
    pub email: String,
    /// PHC 형식 비밀번호 해시
    pub password_hash: String,
    /// 역할
    pub role: Role,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 수정 시각
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// 새 계정 입력으로부터 계정을 생성합니다. 식별자와 시각은 여기서 부여됩니다.
    pub fn create(new: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            created_at: now,
            updated_at: now,
        }
    }

    /// 관리자 여부.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// 새 계정 입력.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewAccount {
    /// 기본 역할(`common`)로 새 계정 입력 생성.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::default(),
        }
    }

    /// 역할 지정.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults_to_common() {
        let new = NewAccount::new("Alice", "a@x.com", "$argon2id$hash");
        assert_eq!(new.role, Role::Common);

        let account = Account::create(new);
        assert_eq!(account.role, Role::Common);
        assert!(!account.is_admin());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let a = Account::create(NewAccount::new("A", "a@x.com", "h"));
        let b = Account::create(NewAccount::new("B", "b@x.com", "h"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_debug_redacts_hash() {
        let account = Account::create(
            NewAccount::new("Root", "root@x.com", "$argon2id$secret-hash").with_role(Role::Admin),
        );
        let debug = format!("{:?}", account);
        assert!(!debug.contains("secret-hash"));
        assert!(debug.contains("[REDACTED]"));
        assert!(account.is_admin());
    }
}
