// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.
//
// Feature vectors are stored as JSON arrays in the `vector` column and are
// validated to exactly VECTOR_DIM components on both write and read — a
// malformed or truncated vector in the database is a bug, not data.

use anyhow::{bail, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Activity, ActivityAttributes, User};
use crate::vectorize::VECTOR_DIM;

// --- Users ---

/// Insert a new user and return its id.
pub fn create_user(conn: &Connection, username: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (username) VALUES (?1)",
        params![username],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up a user by id.
pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, username, created_at FROM users WHERE id = ?1")?;
    let result = stmt
        .query_row(params![user_id], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;
    Ok(result)
}

/// Look up a user by username (exact match).
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare("SELECT id, username, created_at FROM users WHERE username = ?1")?;
    let result = stmt
        .query_row(params![username], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;
    Ok(result)
}

/// Count registered users.
pub fn count_users(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

// --- Activities ---

/// Insert a new activity with its derived feature vector and return its id.
///
/// The vector dimension is validated here so a mis-derived vector can never
/// reach the database.
pub fn insert_activity(
    conn: &Connection,
    user_id: i64,
    attributes: &ActivityAttributes,
    vector: &[f64],
) -> Result<i64> {
    if vector.len() != VECTOR_DIM {
        bail!(
            "Refusing to store a {}-dimension vector (expected {})",
            vector.len(),
            VECTOR_DIM
        );
    }

    let vector_json = serde_json::to_string(vector)?;
    conn.execute(
        "INSERT INTO activities (user_id, name, description, timeframe, mood, weather, category, vector)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            attributes.name,
            attributes.description,
            attributes.timeframe,
            attributes.mood,
            attributes.weather,
            attributes.category,
            vector_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get all activities for a user, ordered by id ascending.
pub fn list_activities(conn: &Connection, user_id: i64) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, description, timeframe, mood, weather, category, vector, created_at
         FROM activities
         WHERE user_id = ?1
         ORDER BY id",
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((row_to_activity(row)?, row.get::<_, String>(8)?))
    })?;

    let mut activities = Vec::new();
    for row in rows {
        let (mut activity, vector_json) = row?;
        activity.vector = decode_vector(&vector_json)?;
        activities.push(activity);
    }
    Ok(activities)
}

/// Get a single activity, scoped to its owner.
///
/// Returns None both when the id doesn't exist and when it belongs to a
/// different user — callers can't distinguish the two, which is the point.
pub fn get_activity(conn: &Connection, user_id: i64, activity_id: i64) -> Result<Option<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, description, timeframe, mood, weather, category, vector, created_at
         FROM activities
         WHERE id = ?1 AND user_id = ?2",
    )?;

    let row = stmt
        .query_row(params![activity_id, user_id], |row| {
            Ok((row_to_activity(row)?, row.get::<_, String>(8)?))
        })
        .optional()?;

    match row {
        Some((mut activity, vector_json)) => {
            activity.vector = decode_vector(&vector_json)?;
            Ok(Some(activity))
        }
        None => Ok(None),
    }
}

/// Count stored activities across all users.
pub fn count_activities(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
    Ok(count)
}

// --- Helpers ---

/// Map the shared activity column list to an Activity (vector filled in by
/// the caller — JSON parsing can't report through rusqlite's error type).
fn row_to_activity(row: &rusqlite::Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get(0)?,
        user_id: row.get(1)?,
        attributes: ActivityAttributes {
            name: row.get(2)?,
            description: row.get(3)?,
            timeframe: row.get(4)?,
            mood: row.get(5)?,
            weather: row.get(6)?,
            category: row.get(7)?,
        },
        vector: Vec::new(),
        created_at: row.get(9)?,
    })
}

/// Parse a stored vector column and validate its dimensionality.
fn decode_vector(json: &str) -> Result<Vec<f64>> {
    let vector: Vec<f64> = serde_json::from_str(json)?;
    if vector.len() != VECTOR_DIM {
        bail!(
            "Stored vector has {} components (expected {})",
            vector.len(),
            VECTOR_DIM
        );
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::vectorize::{vectorize, VECTOR_DIM};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn attrs(name: &str) -> ActivityAttributes {
        ActivityAttributes {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let conn = test_conn();
        let id = create_user(&conn, "sam").unwrap();
        let user = get_user(&conn, id).unwrap().unwrap();
        assert_eq!(user.username, "sam");
        assert!(get_user(&conn, id + 1).unwrap().is_none());
        assert_eq!(
            get_user_by_username(&conn, "sam").unwrap().unwrap().id,
            id
        );
    }

    #[test]
    fn test_activity_vector_roundtrip_is_exact() {
        let conn = test_conn();
        let user_id = create_user(&conn, "sam").unwrap();
        let vector = vectorize(&attrs("Picnic"));
        let id = insert_activity(&conn, user_id, &attrs("Picnic"), &vector).unwrap();

        let loaded = get_activity(&conn, user_id, id).unwrap().unwrap();
        assert_eq!(loaded.vector, vector);
        assert_eq!(loaded.vector.len(), VECTOR_DIM);
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let conn = test_conn();
        let user_id = create_user(&conn, "sam").unwrap();
        let result = insert_activity(&conn, user_id, &attrs("Picnic"), &[1.0, 2.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_activity_is_owner_scoped() {
        let conn = test_conn();
        let alice = create_user(&conn, "alice").unwrap();
        let bob = create_user(&conn, "bob").unwrap();
        let vector = vectorize(&attrs("Picnic"));
        let id = insert_activity(&conn, alice, &attrs("Picnic"), &vector).unwrap();

        assert!(get_activity(&conn, alice, id).unwrap().is_some());
        assert!(get_activity(&conn, bob, id).unwrap().is_none());
    }

    #[test]
    fn test_list_activities_ordered_by_id() {
        let conn = test_conn();
        let user_id = create_user(&conn, "sam").unwrap();
        for name in ["Picnic", "Museum", "Hike"] {
            let vector = vectorize(&attrs(name));
            insert_activity(&conn, user_id, &attrs(name), &vector).unwrap();
        }

        let activities = list_activities(&conn, user_id).unwrap();
        assert_eq!(activities.len(), 3);
        assert!(activities.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(activities[0].attributes.name, "Picnic");
    }

    #[test]
    fn test_list_activities_empty_for_unknown_user() {
        let conn = test_conn();
        assert!(list_activities(&conn, 42).unwrap().is_empty());
    }

    #[test]
    fn test_counts() {
        let conn = test_conn();
        assert_eq!(count_users(&conn).unwrap(), 0);
        let user_id = create_user(&conn, "sam").unwrap();
        let vector = vectorize(&attrs("Picnic"));
        insert_activity(&conn, user_id, &attrs("Picnic"), &vector).unwrap();
        assert_eq!(count_users(&conn).unwrap(), 1);
        assert_eq!(count_activities(&conn).unwrap(), 1);
    }
}
