pub mod rides;
pub mod ws;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::models::location::LocationCatalog;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = ServeDir::new(&state.static_dir);

    Router::new()
        .merge(rides::router())
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/locations", get(locations))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .fallback_service(static_dir)
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Rickshaw dispatch server is active. Go to /rickshaw.html or /admin.html"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    rides: usize,
    pullers: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ledger = state.ledger.lock().await;
    Json(HealthResponse {
        status: "ok",
        rides: ledger.len(),
        pullers: ledger.puller_count(),
    })
}

async fn locations(State(state): State<Arc<AppState>>) -> Json<LocationCatalog> {
    Json(state.ledger.lock().await.locations().clone())
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
