//! 라우트 접근 요구 역할.

use std::fmt;
use std::str::FromStr;

use rolegate_core::Role;

/// 보호된 라우트가 요구하는 역할.
///
/// `"*"`는 유효한 계정이면 모두 허용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredRole {
    /// 역할 무관
    Any,
    /// 지정된 역할만 허용
    Only(Role),
}

impl RequiredRole {
    /// 문자열에서 파싱 (대소문자 무시). 알 수 없는 값이면 None.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == "*" {
            return Some(RequiredRole::Any);
        }
        Role::parse(s).map(RequiredRole::Only)
    }

    /// 주어진 역할이 이 요구 조건을 만족하는지 확인.
    pub fn admits(&self, role: Role) -> bool {
        match self {
            RequiredRole::Any => true,
            RequiredRole::Only(required) => *required == role,
        }
    }
}

impl From<Role> for RequiredRole {
    fn from(role: Role) -> Self {
        RequiredRole::Only(role)
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredRole::Any => write!(f, "*"),
            RequiredRole::Only(role) => write!(f, "{}", role),
        }
    }
}

impl FromStr for RequiredRole {
    type Err = rolegate_core::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| rolegate_core::CoreError::InvalidRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(RequiredRole::parse("*"), Some(RequiredRole::Any));
        assert_eq!(
            RequiredRole::parse("admin"),
            Some(RequiredRole::Only(Role::Admin))
        );
        assert_eq!(
            RequiredRole::parse("Common"),
            Some(RequiredRole::Only(Role::Common))
        );
        assert_eq!(RequiredRole::parse("root"), None);
        assert!("".parse::<RequiredRole>().is_err());
    }

    #[test]
    fn test_admits() {
        assert!(RequiredRole::Any.admits(Role::Common));
        assert!(RequiredRole::Any.admits(Role::Admin));
        assert!(RequiredRole::Only(Role::Admin).admits(Role::Admin));
        assert!(!RequiredRole::Only(Role::Admin).admits(Role::Common));
        assert!(!RequiredRole::Only(Role::Common).admits(Role::Admin));
    }

    #[test]
    fn test_from_role() {
        assert_eq!(RequiredRole::from(Role::Admin), RequiredRole::Only(Role::Admin));
        assert!(!RequiredRole::from(Role::Common).admits(Role::Admin));
    }

    #[test]
    fn test_display_round_trips() {
        for required in [
            RequiredRole::Any,
            RequiredRole::Only(Role::Admin),
            RequiredRole::Only(Role::Common),
        ] {
            assert_eq!(RequiredRole::parse(&required.to_string()), Some(required));
        }
    }

    proptest! {
        #[test]
        fn prop_parse_is_case_insensitive(name in prop::sample::select(vec!["*", "admin", "common"]), upper in any::<bool>()) {
            let input = if upper { name.to_uppercase() } else { name.to_string() };
            prop_assert_eq!(RequiredRole::parse(&input), RequiredRole::parse(name));
            prop_assert!(RequiredRole::parse(&input).is_some());
        }

        #[test]
        fn prop_unknown_names_rejected(s in "[a-z]{1,12}") {
            prop_assume!(s != "admin" && s != "common");
            prop_assert_eq!(RequiredRole::parse(&s), None);
        }
    }
}
