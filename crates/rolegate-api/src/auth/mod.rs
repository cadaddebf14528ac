//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`PasswordHasher`]: Argon2id 비밀번호 해시/검증
//! - [`TokenIssuer`]: JWT Access Token 발급/검증
//! - [`AuthorizationGuard`]: 보호된 라우트 앞의 인가 검사
//! - [`RequiredRole`]: 라우트가 요구하는 역할
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let guard = state.guard(Role::Admin);
//! let router = Router::new()
//!     .route("/users", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(guard, require_role));
//! ```

mod guard;
mod jwt;
mod password;
mod roles;

pub use guard::{require_role, AuthenticatedAccount, AuthorizationGuard, CurrentAccount};
pub use jwt::{Claims, JwtError, TokenIssuer};
pub use password::{PasswordError, PasswordHasher};
pub use roles::RequiredRole;
