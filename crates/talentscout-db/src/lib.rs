//! Document store for talentscout.
//!
//! Provides a `Database` struct that owns a SQLite connection and exposes a
//! small document API: JSON bodies addressed by a database name and a
//! collection name, written once and never updated.

mod documents;
mod interviews;

pub use documents::{Documents, StoredDocument};
pub use interviews::{
    AnswerDocument, InterviewDocument, TurnDocument, INTERVIEWS_COLLECTION, INTERVIEWS_DATABASE,
};

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised while opening or writing the store
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Unsupported store URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Store URI has no location")]
    EmptyLocation,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to prepare store location: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a store URI points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation<'a> {
    Memory,
    File(&'a Path),
}

impl<'a> StoreLocation<'a> {
    /// Parse a store URI.
    ///
    /// Accepted forms: `sqlite://<path>`, `sqlite:<path>`, `:memory:`, or a
    /// bare filesystem path. Any other `scheme://` is rejected.
    pub fn parse(uri: &'a str) -> Result<Self, DbError> {
        let uri = uri.trim();
        let rest = uri
            .strip_prefix("sqlite://")
            .or_else(|| uri.strip_prefix("sqlite:"))
            .unwrap_or(uri);

        if let Some((scheme, _)) = rest.split_once("://") {
            return Err(DbError::UnsupportedScheme(scheme.to_string()));
        }

        if rest == ":memory:" {
            Ok(StoreLocation::Memory)
        } else if rest.is_empty() {
            Err(DbError::EmptyLocation)
        } else {
            Ok(StoreLocation::File(Path::new(rest)))
        }
    }
}

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the store a URI points to, creating parent directories as needed.
    pub fn connect(uri: &str) -> Result<Self, DbError> {
        match StoreLocation::parse(uri)? {
            StoreLocation::Memory => Ok(Self::open_in_memory()?),
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Ok(Self::open_at(path)?)
            }
        }
    }

    /// Open or create a database at a specific path.
    pub fn open_at(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Access the documents store.
    pub fn documents(&self) -> Documents<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        Documents::new(conn)
    }

    /// Initialize the database schema.
    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                database TEXT NOT NULL,
                collection TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_namespace ON documents(database, collection);
            "#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_store_locations() {
        assert_eq!(
            StoreLocation::parse("sqlite:///var/lib/ts/interviews.db").unwrap(),
            StoreLocation::File(Path::new("/var/lib/ts/interviews.db"))
        );
        assert_eq!(
            StoreLocation::parse("sqlite:data/ts.db").unwrap(),
            StoreLocation::File(Path::new("data/ts.db"))
        );
        assert_eq!(
            StoreLocation::parse("./ts.db").unwrap(),
            StoreLocation::File(Path::new("./ts.db"))
        );
        assert_eq!(
            StoreLocation::parse("sqlite://:memory:").unwrap(),
            StoreLocation::Memory
        );
        assert_eq!(StoreLocation::parse(":memory:").unwrap(), StoreLocation::Memory);
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        let err = StoreLocation::parse("mongodb://localhost:27017").unwrap_err();
        assert!(matches!(err, DbError::UnsupportedScheme(ref s) if s == "mongodb"));

        assert!(matches!(
            StoreLocation::parse("sqlite://"),
            Err(DbError::EmptyLocation)
        ));
        assert!(StoreLocation::parse("   ").is_err());
    }

    #[test]
    fn test_connect_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.db");
        let uri = format!("sqlite://{}", path.display());

        let db = Database::connect(&uri).unwrap();
        db.documents()
            .insert("talentscout", "interviews", &json!({"ok": true}))
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_connect_unsupported_scheme() {
        assert!(matches!(
            Database::connect("postgres://localhost/db"),
            Err(DbError::UnsupportedScheme(_))
        ));
    }
}
