//! 계정 조회 endpoint (`admin` 전용).
//!
//! - `GET /users` - 전체 계정 목록
//! - `GET /users/{id}` - 단일 계정
//!
//! 응답에는 비밀번호 해시가 포함되지 않습니다.

use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rolegate_core::{Account, Role};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{require_role, CurrentAccount};
use crate::error::{ApiResult, AuthError};
use crate::state::AppState;

/// 외부에 노출되는 계정 정보.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    CurrentAccount(current): CurrentAccount,
) -> ApiResult<Json<Vec<AccountView>>> {
    let accounts = state.store.list().await?;
    debug!(requester = %current.account.id, count = accounts.len(), "Listing accounts");

    Ok(Json(accounts.into_iter().map(AccountView::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccountView>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AuthError::Validation("잘못된 계정 ID 형식입니다".to_string()))?;

    let account = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AuthError::NotFound("계정을 찾을 수 없습니다".to_string()))?;

    Ok(Json(AccountView::from(account)))
}

/// 계정 조회 라우터 생성. 모든 경로에 `admin` 가드가 적용됩니다.
pub fn users_router(state: &AppState) -> Router<Arc<AppState>> {
    let guard = state.guard(Role::Admin);

    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user))
        .route_layer(middleware::from_fn_with_state(guard, require_role))
}
