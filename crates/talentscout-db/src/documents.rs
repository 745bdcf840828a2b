//! Documents store: JSON bodies grouped by database and collection.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::sync::MutexGuard;
use uuid::Uuid;

use crate::DbError;

/// A document as read back from the store.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub database: String,
    pub collection: String,
    pub body: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Documents store with a borrowed connection.
pub struct Documents<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Documents<'db> {
    /// Create a new Documents store with a borrowed connection.
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// Insert one document and return its generated id.
    pub fn insert<T: Serialize>(
        &self,
        database: &str,
        collection: &str,
        document: &T,
    ) -> Result<String, DbError> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(document)?;

        self.conn.execute(
            r#"
            INSERT INTO documents (id, database, collection, body, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![id, database, collection, body, Utc::now().to_rfc3339()],
        )?;

        Ok(id)
    }

    /// All documents in a collection, oldest first.
    pub fn find(&self, database: &str, collection: &str) -> Result<Vec<StoredDocument>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, database, collection, body, created_at FROM documents WHERE database = ?1 AND collection = ?2 ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(params![database, collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, database, collection, body, created_at) = row?;
            documents.push(StoredDocument {
                id,
                database,
                collection,
                body: serde_json::from_str(&body)?,
                created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
            });
        }

        Ok(documents)
    }

    /// Number of documents in a collection.
    pub fn count(&self, database: &str, collection: &str) -> Result<usize, DbError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE database = ?1 AND collection = ?2",
            params![database, collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
