// Recommendation handler.
//
// GET /api/recommend?user_id=&activity_id= — the user's other activities
// ranked by similarity to the reference, most similar first.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::recommend::{self, RecommendError};
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct RecommendQuery {
    pub user_id: Option<i64>,
    pub activity_id: Option<i64>,
}

/// GET /api/recommend — ranked similar activities for a reference activity.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> Response {
    let (user_id, activity_id) = match (params.user_id, params.activity_id) {
        (Some(u), Some(a)) => (u, a),
        _ => {
            return api_error(
                StatusCode::BAD_REQUEST,
                "User ID and activity ID required",
            )
        }
    };

    match recommend::recommend(&state.store, user_id, activity_id).await {
        Ok(recommendations) => {
            let body: Vec<serde_json::Value> = recommendations
                .into_iter()
                .map(|r| {
                    let mut entry = super::activities::activity_to_json(r.activity);
                    entry["similarity"] = serde_json::json!(r.similarity);
                    entry
                })
                .collect();
            Json(body).into_response()
        }
        Err(RecommendError::InvalidInput(msg)) => api_error(StatusCode::BAD_REQUEST, msg),
        Err(RecommendError::NotFound { .. }) => {
            api_error(StatusCode::NOT_FOUND, "Activity not found")
        }
        Err(RecommendError::Store(e)) => {
            tracing::error!(error = %e, user_id, activity_id, "Store error during recommendation");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
