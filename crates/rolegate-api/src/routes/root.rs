//! 루트 endpoint.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 환영 메시지 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// GET /
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "환영합니다!".to_string(),
    })
}

/// 루트 라우터 생성.
pub fn root_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(welcome))
}
