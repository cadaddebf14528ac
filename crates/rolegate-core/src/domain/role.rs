//! 사용자 역할.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// 사용자 역할.
///
/// 보호된 라우트 접근을 제어하는 권한 태그입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 일반 사용자 (가입 시 기본값)
    #[default]
    Common,
    /// 관리자
    Admin,
}

impl Role {
    /// 저장/직렬화에 사용하는 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Common => "common",
            Role::Admin => "admin",
        }
    }

    /// 문자열에서 역할 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "common" => Some(Role::Common),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| CoreError::InvalidRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_is_common() {
        assert_eq!(Role::default(), Role::Common);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("COMMON"), Some(Role::Common));
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("*"), None);
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_role_from_str_error() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRole(ref r) if r == "superuser"));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let parsed: Role = serde_json::from_str("\"common\"").unwrap();
        assert_eq!(parsed, Role::Common);
    }

    #[test]
    fn test_display_matches_storage_form() {
        for role in [Role::Common, Role::Admin] {
            assert_eq!(Role::parse(&role.to_string()), Some(role));
        }
    }
}
