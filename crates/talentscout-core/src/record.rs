use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use talentscout_db::{AnswerDocument, InterviewDocument, TurnDocument};

use crate::intake::CandidateProfile;
use crate::session::{AnswerRecord, Evaluation, InterviewSession, TranscriptEntry};

/// The persisted aggregate of a finished interview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterviewRecord {
    pub session_id: String,
    pub profile: CandidateProfile,
    pub generated_questions: Vec<String>,
    pub answers: Vec<AnswerRecord>,
    pub transcript: Vec<TranscriptEntry>,
    pub evaluation: Evaluation,
    pub created_at: DateTime<Utc>,
}

impl InterviewRecord {
    /// Snapshot a session whose evaluation has been produced
    pub(crate) fn snapshot(session: &InterviewSession, evaluation: Evaluation) -> Self {
        Self {
            session_id: session.id().to_string(),
            profile: session.profile().clone(),
            generated_questions: session.questions().to_vec(),
            answers: session.answers().to_vec(),
            transcript: session.transcript().to_vec(),
            evaluation,
            created_at: Utc::now(),
        }
    }

    /// The stored document shape
    pub fn to_document(&self) -> InterviewDocument {
        InterviewDocument {
            user_info: self.profile.to_labelled_map(),
            tech_stack: self.profile.tech_stack().to_string(),
            generated_questions: self.generated_questions.clone(),
            user_answers: self
                .answers
                .iter()
                .map(|a| AnswerDocument {
                    question: a.question.clone(),
                    answer: a.answer.clone(),
                })
                .collect(),
            conversation: self
                .transcript
                .iter()
                .map(|t| TurnDocument {
                    role: t.speaker.as_str().to_string(),
                    text: t.text.clone(),
                    timestamp: t.timestamp,
                })
                .collect(),
            final_feedback: self.evaluation.text().map(String::from),
            feedback_error: self.evaluation.error().map(String::from),
            created_at: self.created_at,
        }
    }
}
