// Recommendation pipeline — load, rank, return.
//
// For a reference activity, rank every other activity belonging to the same
// owner by cosine similarity of their stored feature vectors. The heavy
// lifting is in `similarity`; this module does the store round-trips and the
// error mapping. Either the full ranked list comes back or a typed error —
// never a partial result. Store failures are surfaced, not retried.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::db::models::Recommendation;
use crate::db::Store;
use crate::similarity::rank_by_similarity;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// Missing or malformed request fields (non-positive ids).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The reference activity doesn't exist or belongs to another user.
    #[error("activity {activity_id} not found for user {user_id}")]
    NotFound { user_id: i64, activity_id: i64 },

    /// The record store failed; not recoverable here.
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Rank a user's other activities by similarity to the given one.
///
/// Returns recommendations in descending similarity order (ties broken by
/// ascending activity id). A user whose only activity is the reference gets
/// an empty list, not an error.
pub async fn recommend(
    store: &Arc<dyn Store>,
    user_id: i64,
    activity_id: i64,
) -> Result<Vec<Recommendation>, RecommendError> {
    if user_id <= 0 {
        return Err(RecommendError::InvalidInput("user id must be positive"));
    }
    if activity_id <= 0 {
        return Err(RecommendError::InvalidInput("activity id must be positive"));
    }

    let reference = store
        .get_activity(user_id, activity_id)
        .await?
        .ok_or(RecommendError::NotFound {
            user_id,
            activity_id,
        })?;

    let siblings = store.list_activities(user_id).await?;

    let candidates: Vec<(i64, Vec<f64>)> = siblings
        .iter()
        .map(|a| (a.id, a.vector.clone()))
        .collect();
    let ranked = rank_by_similarity(reference.id, &reference.vector, &candidates);

    debug!(
        user_id,
        activity_id,
        candidates = candidates.len(),
        ranked = ranked.len(),
        "Ranked activities"
    );

    let mut by_id: HashMap<i64, _> = siblings.into_iter().map(|a| (a.id, a)).collect();
    let recommendations = ranked
        .into_iter()
        .filter_map(|(id, similarity)| {
            by_id.remove(&id).map(|activity| Recommendation {
                activity,
                similarity,
            })
        })
        .collect();

    Ok(recommendations)
}
