// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A registered user. Users own activities; recommendations never cross
/// owner boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

/// The descriptive attributes of an activity, as supplied at creation.
///
/// Only `name` is required; the rest default to empty strings. The feature
/// vector is derived from these (see `vectorize`) but is not part of the
/// attribute set itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityAttributes {
    pub name: String,
    pub description: String,
    pub timeframe: String,
    pub mood: String,
    pub weather: String,
    pub category: String,
}

/// A stored activity: identity, attributes, and the feature vector computed
/// at creation time. The vector is immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub attributes: ActivityAttributes,
    /// Derived feature vector, exactly `vectorize::VECTOR_DIM` components.
    /// Skipped in API responses — clients never see raw vectors.
    #[serde(skip)]
    pub vector: Vec<f64>,
    pub created_at: String,
}

/// One entry in a ranked recommendation list.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub activity: Activity,
    pub similarity: f64,
}
