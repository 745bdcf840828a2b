//! Stored shape of a finished interview.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{DbError, Documents};

/// Database holding interview documents
pub const INTERVIEWS_DATABASE: &str = "talentscout";

/// Collection holding interview documents
pub const INTERVIEWS_COLLECTION: &str = "interviews";

/// One interview, as written to the `interviews` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewDocument {
    /// Intake answers keyed by field label
    pub user_info: BTreeMap<String, String>,
    pub tech_stack: String,
    pub generated_questions: Vec<String>,
    pub user_answers: Vec<AnswerDocument>,
    pub conversation: Vec<TurnDocument>,
    pub final_feedback: Option<String>,
    /// Set when the evaluation could not be generated
    pub feedback_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerDocument {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnDocument {
    pub role: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl<'db> Documents<'db> {
    /// Insert a finished interview into the fixed interviews collection.
    pub fn insert_interview(&self, document: &InterviewDocument) -> Result<String, DbError> {
        self.insert(INTERVIEWS_DATABASE, INTERVIEWS_COLLECTION, document)
    }
}
