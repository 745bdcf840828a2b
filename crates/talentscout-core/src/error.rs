use talentscout_db::DbError;
use thiserror::Error;

/// Failure to hand a finished interview to the document store
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to open document store: {0}")]
    Connect(#[source] DbError),

    #[error("Failed to write interview record: {0}")]
    Write(#[source] DbError),
}
