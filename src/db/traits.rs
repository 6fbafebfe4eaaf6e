// Store trait — backend-agnostic async interface for all record operations.
//
// Implementor: SqliteStore (wraps rusqlite). All methods are async so a
// native-async backend (e.g. a Postgres pool) could sit behind the same
// interface later without touching callers.
//
// The trait mirrors the queries.rs function signatures, so callers hold an
// `Arc<dyn Store>` and never see a Connection.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Activity, ActivityAttributes, User};

#[async_trait]
pub trait Store: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Users ---

    /// Register a new user and return its id.
    async fn create_user(&self, username: &str) -> Result<i64>;

    /// Look up a user by id.
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    /// Look up a user by username (exact match).
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Count registered users.
    async fn count_users(&self) -> Result<i64>;

    // --- Activities ---

    /// Persist a new activity and its derived vector; returns the activity id.
    async fn insert_activity(
        &self,
        user_id: i64,
        attributes: &ActivityAttributes,
        vector: &[f64],
    ) -> Result<i64>;

    /// All activities for an owner, ordered by id. Empty if none.
    async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>>;

    /// A single activity, scoped to its owner. None when absent or owned by
    /// someone else.
    async fn get_activity(&self, user_id: i64, activity_id: i64) -> Result<Option<Activity>>;

    /// Count stored activities across all users.
    async fn count_activities(&self) -> Result<i64>;
}
