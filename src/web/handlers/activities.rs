// Activity creation and listing handlers.
//
// POST /api/activities — create an activity; the feature vector is derived
//                        here, at creation time, and stored with the record.
// GET  /api/activities — ?user_id= — all of a user's activities.
//
// Responses never include the raw vector — it's an internal representation,
// only ever consumed by the ranker.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::db::models::{Activity, ActivityAttributes};
use crate::vectorize::vectorize;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct AddActivityRequest {
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub attributes: ActivityAttributes,
}

/// POST /api/activities — create an activity for a user.
pub async fn add_activity(
    State(state): State<AppState>,
    Json(request): Json<AddActivityRequest>,
) -> Response {
    let user_id = match request.user_id {
        Some(id) if id > 0 => id,
        _ => return api_error(StatusCode::BAD_REQUEST, "User ID and activity name required"),
    };
    if request.attributes.name.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "User ID and activity name required");
    }

    match state.store.get_user(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return api_error(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => {
            tracing::error!(error = %e, user_id, "DB error fetching user");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }

    let vector = vectorize(&request.attributes);

    match state
        .store
        .insert_activity(user_id, &request.attributes, &vector)
        .await
    {
        Ok(activity_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Activity added",
                "activity_id": activity_id,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id, "DB error inserting activity");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub user_id: Option<i64>,
}

/// GET /api/activities — list a user's activities, oldest first.
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Response {
    let user_id = match params.user_id {
        Some(id) if id > 0 => id,
        _ => return api_error(StatusCode::BAD_REQUEST, "User ID required"),
    };

    match state.store.list_activities(user_id).await {
        Ok(activities) => {
            let activities: Vec<serde_json::Value> =
                activities.into_iter().map(activity_to_json).collect();
            Json(activities).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id, "DB error listing activities");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// Shape an activity for API output — attributes only, no vector.
pub fn activity_to_json(activity: Activity) -> serde_json::Value {
    serde_json::json!({
        "id": activity.id,
        "name": activity.attributes.name,
        "description": activity.attributes.description,
        "timeframe": activity.attributes.timeframe,
        "mood": activity.attributes.mood,
        "weather": activity.attributes.weather,
        "category": activity.attributes.category,
    })
}
