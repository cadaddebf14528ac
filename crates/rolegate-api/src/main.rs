//! Rolegate API 서버.
//!
//! 설정을 읽고 계정 저장소를 준비한 뒤 Axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use rolegate_api::auth::{PasswordHasher, TokenIssuer};
use rolegate_api::repository::{AccountStore, InMemoryAccountStore, PgAccountStore};
use rolegate_api::routes::create_app;
use rolegate_api::state::AppState;
use rolegate_core::{init_logging, AppConfig, DatabaseConfig, LogConfig};

/// 설정에 따라 계정 저장소를 준비합니다.
///
/// `DATABASE_URL`이 있으면 PostgreSQL에 연결해 마이그레이션을 실행하고,
/// 없으면 인메모리 저장소를 사용합니다.
async fn create_store(
    config: &DatabaseConfig,
) -> anyhow::Result<(Arc<dyn AccountStore>, &'static str)> {
    let Some(database_url) = config.url.as_deref() else {
        warn!("DATABASE_URL not set, accounts will be kept in memory and lost on shutdown");
        return Ok((Arc::new(InMemoryAccountStore::new()), "memory"));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to PostgreSQL successfully");

    let store = PgAccountStore::new(pool);
    store.migrate().await.context("Failed to run migrations")?;

    Ok((Arc::new(store), "postgres"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    init_logging(LogConfig::from_env())?;
    info!("Starting Rolegate API server...");

    let config = AppConfig::load().map_err(|e| {
        error!(error = %e, "설정이 유효하지 않습니다. JWT_SECRET 등 환경변수를 확인하세요.");
        e
    })?;

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind_address()))?;

    let (store, store_kind) = create_store(&config.database).await?;

    if config.auth.secret_len() < 32 {
        warn!(
            secret_len = config.auth.secret_len(),
            "JWT_SECRET is shorter than 32 bytes"
        );
    }

    let hasher = PasswordHasher::new(config.auth.password_work_factor)?;
    let tokens = TokenIssuer::new(
        &config.auth.jwt_secret,
        chrono::Duration::days(config.auth.token_ttl_days),
    );
    info!(
        work_factor = hasher.work_factor(),
        token_ttl_days = tokens.ttl().num_days(),
        "Auth components initialized"
    );

    let state = AppState::new(store, hasher, Arc::new(tokens))
        .with_store_kind(store_kind)
        .with_expose_internal_errors(config.expose_internal_errors);

    if config.expose_internal_errors {
        warn!("Internal error details will be included in responses");
    }

    // 기본 관리자 생성
    match &config.admin {
        Some(seed) => match state.auth.seed_admin(seed).await {
            Ok(Some(_)) => {}
            Ok(None) => info!(email = %seed.email, "Admin account already exists, skipping seed"),
            Err(e) => return Err(anyhow::anyhow!("Failed to seed admin account: {}", e)),
        },
        None => warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seed"),
    }

    let app: Router = create_app(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ));

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
