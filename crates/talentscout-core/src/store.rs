//! Persistence client for finished interviews.

use tracing::debug;

use talentscout_db::{Database, INTERVIEWS_COLLECTION};

use crate::error::PersistError;
use crate::record::InterviewRecord;

/// Write-once sink for finished interviews.
///
/// Implementations receive everything they need per call and keep no
/// session state.
pub trait InterviewStore: Send + Sync {
    fn store(&self, record: &InterviewRecord) -> Result<(), PersistError>;
}

/// Stores interviews in the document database a URI points to.
///
/// A connection is opened per call, so an unreachable store only surfaces
/// when a record is written.
pub struct DocumentStore {
    uri: String,
}

impl DocumentStore {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl InterviewStore for DocumentStore {
    fn store(&self, record: &InterviewRecord) -> Result<(), PersistError> {
        let db = Database::connect(&self.uri).map_err(PersistError::Connect)?;
        let id = db
            .documents()
            .insert_interview(&record.to_document())
            .map_err(PersistError::Write)?;

        debug!(
            document_id = %id,
            collection = INTERVIEWS_COLLECTION,
            session_id = %record.session_id,
            "Stored interview record"
        );
        Ok(())
    }
}
