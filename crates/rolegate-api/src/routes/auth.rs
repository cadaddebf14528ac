//! 가입/로그인 endpoint.
//!
//! - `POST /auth/register` - 새 `common` 계정 생성
//! - `POST /auth/login` - Access Token 발급

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::users::AccountView;
use crate::error::{ApiResult, AuthError};
use crate::services::{LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;

/// 가입 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub account: AccountView,
}

/// 본문 파싱 실패를 검증 에러로 변환.
fn malformed_body(rejection: JsonRejection) -> AuthError {
    AuthError::Validation(format!("잘못된 요청 본문입니다: {}", rejection.body_text()))
}

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload.map_err(malformed_body)?;
    let account = state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "계정이 생성되었습니다".to_string(),
            account: AccountView::from(account),
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload.map_err(malformed_body)?;
    Ok(Json(state.auth.login(request).await?))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::error::ApiErrorResponse;
    use crate::state::create_test_state;

    fn app() -> Router {
        Router::new()
            .nest("/auth", auth_router())
            .with_state(Arc::new(create_test_state()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "email": "a@x.com",
            "password": "pw1",
            "confirmPassword": "pw1"
        })
    }

    #[tokio::test]
    async fn test_register_returns_created_without_password() {
        let app = app();
        let (status, body) = send(&app, post_json("/auth/register", alice())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["account"]["name"], "Alice");
        assert_eq!(body["account"]["role"], "common");
        assert!(body["account"].get("password").is_none());
        assert!(body["account"].get("passwordHash").is_none());
        assert!(!body.to_string().contains("argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = app();
        send(&app, post_json("/auth/register", alice())).await;

        let mut again = alice();
        again["name"] = json!("Alice2");
        let (status, body) = send(&app, post_json("/auth/register", again)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let error: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "CONFLICT");
    }

    #[tokio::test]
    async fn test_register_missing_confirm_password() {
        let app = app();
        let mut body = alice();
        body.as_object_mut().unwrap().remove("confirmPassword");

        let (status, body) = send(&app, post_json("/auth/register", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_flow_statuses() {
        let app = app();
        send(&app, post_json("/auth/register", alice())).await;

        let (status, body) = send(
            &app,
            post_json("/auth/login", json!({"email": "a@x.com", "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authType"], "Bearer");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let (status, body) = send(
            &app,
            post_json("/auth/login", json!({"email": "a@x.com", "password": "pw2"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let (status, body) = send(
            &app,
            post_json("/auth/login", json!({"email": "b@x.com", "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let (status, _) = send(&app, post_json("/auth/login", json!({"email": "a@x.com"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
