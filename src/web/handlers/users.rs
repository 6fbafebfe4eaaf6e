// User registration handler.
//
// POST /api/register — {username} -> 201 {message, user_id}
//
// Usernames are taken as-is apart from surrounding whitespace. Duplicates
// are checked up front so the caller gets a 409 instead of a bare store
// error.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
}

/// POST /api/register — create a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    let username = request.username.trim();
    if username.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "Username required");
    }

    match state.store.get_user_by_username(username).await {
        Ok(Some(_)) => return api_error(StatusCode::CONFLICT, "Username already taken"),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, username, "DB error checking username");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }

    match state.store.create_user(username).await {
        Ok(user_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "User registered",
                "user_id": user_id,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, username, "DB error creating user");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
