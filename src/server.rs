use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    page: Arc<String>,
}

/// Serves the pre-rendered dashboard page until the process is stopped.
pub async fn serve(addr: SocketAddr, page: String) -> anyhow::Result<()> {
    let state = AppState {
        page: Arc::new(page),
    };
    let app = router(state);

    info!("dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.page.as_ref().clone())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}
