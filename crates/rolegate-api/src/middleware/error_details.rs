//! 내부 에러 진단 정보 노출.
//!
//! 기본적으로 500 응답 본문에는 일반 메시지만 담깁니다. 진단 모드가 켜져 있으면
//! [`InternalErrorDetail`] extension을 찾아 `details` 필드로 본문에 붙입니다.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{ApiErrorResponse, AuthError, InternalErrorDetail};

/// 진단 모드일 때 내부 에러 상세를 응답 본문에 포함하는 미들웨어.
///
/// ```rust,ignore
/// router.layer(middleware::from_fn_with_state(config.expose_internal_errors, expose_internal_errors))
/// ```
pub async fn expose_internal_errors(
    State(expose): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !expose {
        return response;
    }

    let Some(InternalErrorDetail(detail)) =
        response.extensions().get::<InternalErrorDetail>().cloned()
    else {
        return response;
    };

    let template = AuthError::Internal(String::new());
    let body = ApiErrorResponse::with_details(
        template.code(),
        template.to_string(),
        json!({ "error": detail }),
    );

    (template.status(), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn failing() -> Result<&'static str, AuthError> {
        Err(AuthError::Internal("pool timed out".into()))
    }

    async fn forbidden() -> Result<&'static str, AuthError> {
        Err(AuthError::Forbidden)
    }

    fn app(expose: bool) -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/forbidden", get(forbidden))
            .layer(middleware::from_fn_with_state(expose, expose_internal_errors))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, ApiErrorResponse) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_details_hidden_by_default() {
        let (status, body) = call(app(false), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn test_details_exposed_in_diagnostic_mode() {
        let (status, body) = call(app(true), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.details.unwrap()["error"], "pool timed out");
    }

    #[tokio::test]
    async fn test_other_errors_untouched() {
        let (status, body) = call(app(true), "/forbidden").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code, "FORBIDDEN");
        assert!(body.details.is_none());
    }
}
