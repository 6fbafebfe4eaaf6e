// Web server — Axum JSON API.
//
// All routes serve JSON. There's no session handling: Ember is a
// self-hosted, single-household tool and the API is unauthenticated.
//
// The handlers stay thin — validation and status mapping only — and the
// recommendation logic lives in the library where the unit tests can reach
// it without HTTP.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Store;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(store: Arc<dyn Store>, port: u16, bind: &str) -> Result<()> {
    let state = AppState { store };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Ember listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble the router. Public so the API tests can drive it directly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/register", post(handlers::users::register))
        .route(
            "/api/activities",
            post(handlers::activities::add_activity).get(handlers::activities::list_activities),
        )
        .route("/api/recommend", get(handlers::recommend::recommend))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
