// SqliteStore — rusqlite backend implementing the Store trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Activity, ActivityAttributes, User};
use super::traits::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_user(&self, username: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, username)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, user_id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_by_username(&conn, username)
    }

    async fn count_users(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_users(&conn)
    }

    async fn insert_activity(
        &self,
        user_id: i64,
        attributes: &ActivityAttributes,
        vector: &[f64],
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_activity(&conn, user_id, attributes, vector)
    }

    async fn list_activities(&self, user_id: i64) -> Result<Vec<Activity>> {
        let conn = self.conn.lock().await;
        super::queries::list_activities(&conn, user_id)
    }

    async fn get_activity(&self, user_id: i64, activity_id: i64) -> Result<Option<Activity>> {
        let conn = self.conn.lock().await;
        super::queries::get_activity(&conn, user_id, activity_id)
    }

    async fn count_activities(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_activities(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::vectorize::vectorize;

    async fn test_store() -> SqliteStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteStore::new(conn)
    }

    fn attrs(name: &str) -> ActivityAttributes {
        ActivityAttributes {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_trait_user_roundtrip() {
        let store = test_store().await;
        let id = store.create_user("sam").await.unwrap();
        assert!(id > 0);
        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.username, "sam");
        assert!(store.get_user(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_duplicate_username_errors() {
        let store = test_store().await;
        store.create_user("sam").await.unwrap();
        assert!(store.create_user("sam").await.is_err());
    }

    #[tokio::test]
    async fn test_trait_activity_roundtrip() {
        let store = test_store().await;
        let user_id = store.create_user("sam").await.unwrap();
        let attributes = attrs("Picnic");
        let vector = vectorize(&attributes);

        let id = store
            .insert_activity(user_id, &attributes, &vector)
            .await
            .unwrap();
        let loaded = store.get_activity(user_id, id).await.unwrap().unwrap();
        assert_eq!(loaded.attributes.name, "Picnic");
        assert_eq!(loaded.vector, vector);

        let all = store.list_activities(user_id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let store = test_store().await;
        assert_eq!(store.table_count().await.unwrap(), 3);
    }
}
