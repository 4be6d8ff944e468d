pub mod auth;
pub mod tickets;

use std::net::SocketAddr;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(auth::authorize))
        .route("/callback", get(auth::callback))
        .route("/tickets", get(tickets::list))
        .route("/create-ticket", post(tickets::create))
        .with_state(ctx)
}

pub async fn serve(ctx: AppContext, addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!("Server is running on http://{local}");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}

/// HTTP status for a failed request. Upstream error statuses pass through,
/// anything without one falls back to `fallback`.
pub(crate) fn status_for(err: &AppError, fallback: StatusCode) -> StatusCode {
    match err {
        AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        AppError::UpstreamAuth { status, .. } => match status {
            Some(400 | 401 | 403) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_GATEWAY,
        },
        AppError::Upstream {
            status: Some(code), ..
        } => StatusCode::from_u16(*code)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .unwrap_or(fallback),
        _ => fallback,
    }
}
