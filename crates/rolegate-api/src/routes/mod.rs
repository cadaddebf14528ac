//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 환영 메시지
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 저장소 연결 확인 (readiness)
//! - `/auth/register`, `/auth/login` - 가입/로그인
//! - `/users`, `/users/{id}` - 계정 조회 (`admin` 전용)

pub mod auth;
pub mod health;
pub mod root;
pub mod users;

pub use auth::{auth_router, RegisterResponse};
pub use health::{health_router, HealthResponse};
pub use root::root_router;
pub use users::{users_router, AccountView};

use axum::{middleware, Router};
use std::sync::Arc;

use crate::middleware::expose_internal_errors;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 보호된 라우터는 생성 시점에 상태에서 가드를 만들어 붙입니다.
pub fn create_api_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .merge(root_router())
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/users", users_router(state))
}

/// 상태가 주입된 애플리케이션 라우터.
///
/// 트레이싱/타임아웃 레이어는 바이너리에서 추가합니다.
pub fn create_app(state: Arc<AppState>) -> Router {
    let expose = state.expose_internal_errors;

    create_api_router(&state)
        .with_state(state)
        .layer(middleware::from_fn_with_state(expose, expose_internal_errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use rolegate_core::AdminSeed;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_token(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        send(
            app,
            post_json("/auth/login", json!({"email": email, "password": password})),
        )
        .await
    }

    #[tokio::test]
    async fn test_alice_and_admin_scenario() {
        let state = create_test_state();
        let seed = AdminSeed {
            email: "root@x.com".to_string(),
            password: SecretString::from("rootpw".to_string()),
        };
        state.auth.seed_admin(&seed).await.unwrap();
        let app = create_app(Arc::new(state));

        // Alice 가입
        let (status, _) = send(
            &app,
            post_json(
                "/auth/register",
                json!({
                    "name": "Alice",
                    "email": "a@x.com",
                    "password": "secret123",
                    "confirmPassword": "secret123"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // 잘못된 비밀번호
        let (status, body) = login(&app, "a@x.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        // 올바른 비밀번호
        let (status, body) = login(&app, "a@x.com", "secret123").await;
        assert_eq!(status, StatusCode::OK);
        let alice_token = body["token"].as_str().unwrap().to_string();

        // common 계정은 /users 접근 불가
        let (status, body) = send(&app, get_with_token("/users", &alice_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        // 시드 관리자
        let (status, body) = login(&app, "root@x.com", "rootpw").await;
        assert_eq!(status, StatusCode::OK);
        let admin_token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_with_token("/users", &admin_token)).await;
        assert_eq!(status, StatusCode::OK);

        let accounts = body.as_array().unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts.iter().any(|a| a["email"] == "a@x.com"));
        assert!(accounts.iter().any(|a| a["role"] == "admin"));
        let text = body.to_string();
        assert!(!text.contains("password"));
        assert!(!text.contains("secret123"));
    }

    #[tokio::test]
    async fn test_public_routes() {
        let app = create_app(Arc::new(create_test_state()));

        let (status, body) = send(
            &app,
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected_end_to_end() {
        let app = create_app(Arc::new(create_test_state()));

        let (status, body) = send(&app, get_with_token("/users", "garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_TOKEN");
    }
}
