use serde::Serialize;

use crate::record::InterviewRecord;
use crate::session::{InterviewSession, Stage, StoreStatus};

/// The final outcome of an interview session
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InterviewOutcome {
    /// All stages ran; the record was handed to the store
    Completed {
        record: InterviewRecord,
        stored: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        store_error: Option<String>,
    },
    /// The candidate left during intake
    Exited {
        session_id: String,
        fields_collected: usize,
    },
}

impl InterviewOutcome {
    /// Build the outcome of a finished session, `None` while it is still running
    pub fn from_session(session: &InterviewSession) -> Option<Self> {
        match session.stage() {
            Stage::Done => {
                let record = session.record()?.clone();
                let store_error = match session.store_status() {
                    Some(StoreStatus::Failed(error)) => Some(error.clone()),
                    _ => None,
                };
                Some(Self::Completed {
                    record,
                    stored: store_error.is_none(),
                    store_error,
                })
            }
            Stage::Exited => Some(Self::Exited {
                session_id: session.id().to_string(),
                fields_collected: session.profile().len(),
            }),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::Exited { .. } => 130,
        }
    }
}
