//! Interview session state.
//!
//! An [`InterviewSession`] is plain owned data: the current stage, the
//! collected profile, generated questions, answers and the transcript. It is
//! advanced by [`crate::Interviewer`], which borrows it mutably for each
//! input. Independent sessions share nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intake::{CandidateProfile, FieldKey, INTAKE_FIELDS};
use crate::record::InterviewRecord;

/// Greeting shown when a session starts
pub const GREETING: &str = "Hello! I'm TalentScout, your hiring assistant. I'll collect a few \
details about you and then ask some technical questions based on your tech stack. \
Type 'exit', 'quit' or 'bye' at any time during these first questions to leave.";

/// Where the session is in the interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "index", rename_all = "snake_case")]
pub enum Stage {
    /// Collecting the profile field at this index
    Intake(usize),
    /// Requesting the initial question set
    Generating,
    /// The last question-set request failed; the next input retries
    GenerationFailed,
    /// Waiting for the answer to the question at this index
    Questioning(usize),
    /// Producing the evaluation and storing the record
    Feedback,
    /// Interview finished and record handed to the store
    Done,
    /// The candidate left during intake
    Exited,
}

impl Stage {
    pub fn is_finished(&self) -> bool {
        matches!(self, Stage::Done | Stage::Exited)
    }
}

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    Candidate,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Assistant => "assistant",
            Speaker::Candidate => "candidate",
        }
    }
}

/// A single displayed turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A generated question and the candidate's answer to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

/// Result of the final evaluation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Evaluation {
    /// Text returned by the generation service
    Generated(String),
    /// The request failed; holds the error message
    Unavailable(String),
}

impl Evaluation {
    pub fn text(&self) -> Option<&str> {
        match self {
            Evaluation::Generated(text) => Some(text),
            Evaluation::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Evaluation::Generated(_) => None,
            Evaluation::Unavailable(error) => Some(error),
        }
    }
}

/// What kind of input the active stage expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum InputKind {
    /// A value for this profile field
    Field(FieldKey),
    /// A free-text answer (or "more")
    Answer,
    /// Any input retries question generation
    Retry,
}

/// The text to show next to the input box, and what it expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub input: InputKind,
}

/// Outcome of the store call for a finished interview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum StoreStatus {
    Stored,
    Failed(String),
}

/// An interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    id: String,
    created_at: DateTime<Utc>,
    stage: Stage,
    profile: CandidateProfile,
    questions: Vec<String>,
    answers: Vec<AnswerRecord>,
    transcript: Vec<TranscriptEntry>,
    evaluation: Option<Evaluation>,
    generation_attempts: usize,
    record: Option<InterviewRecord>,
    store_status: Option<StoreStatus>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    /// Create a new session at the first intake field
    pub fn new() -> Self {
        let mut session = Self {
            id: format!("interview-{}", uuid::Uuid::new_v4()),
            created_at: Utc::now(),
            stage: Stage::Intake(0),
            profile: CandidateProfile::new(),
            questions: Vec::new(),
            answers: Vec::new(),
            transcript: Vec::new(),
            evaluation: None,
            generation_attempts: 0,
            record: None,
            store_status: None,
        };
        session.say(GREETING);
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_finished()
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn generation_attempts(&self) -> usize {
        self.generation_attempts
    }

    /// The record handed to the store, once the interview is done
    pub fn record(&self) -> Option<&InterviewRecord> {
        self.record.as_ref()
    }

    pub fn store_status(&self) -> Option<&StoreStatus> {
        self.store_status.as_ref()
    }

    /// What to ask next, or `None` once the session is finished
    pub fn current_prompt(&self) -> Option<Prompt> {
        match self.stage {
            Stage::Intake(i) => INTAKE_FIELDS.get(i).map(|field| Prompt {
                text: field.prompt.to_string(),
                input: InputKind::Field(field.key),
            }),
            Stage::GenerationFailed => Some(Prompt {
                text: "Press Enter to try generating your technical questions again.".to_string(),
                input: InputKind::Retry,
            }),
            Stage::Questioning(j) => self.questions.get(j).map(|question| Prompt {
                text: format!(
                    "Question {} of {}: {} (type 'more' for additional questions)",
                    j + 1,
                    self.questions.len(),
                    question
                ),
                input: InputKind::Answer,
            }),
            Stage::Generating | Stage::Feedback | Stage::Done | Stage::Exited => None,
        }
    }

    pub(crate) fn say(&mut self, text: impl Into<String>) {
        self.push(Speaker::Assistant, text.into());
    }

    pub(crate) fn hear(&mut self, text: impl Into<String>) {
        self.push(Speaker::Candidate, text.into());
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text,
            timestamp: Utc::now(),
        });
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn commit_field(&mut self, key: FieldKey, value: String) {
        self.profile.insert(key, value);
    }

    pub(crate) fn set_questions(&mut self, questions: Vec<String>) {
        self.questions = questions;
    }

    pub(crate) fn extend_questions(&mut self, questions: Vec<String>) {
        self.questions.extend(questions);
    }

    pub(crate) fn push_answer(&mut self, answer: AnswerRecord) {
        self.answers.push(answer);
    }

    pub(crate) fn next_generation_attempt(&mut self) -> usize {
        self.generation_attempts += 1;
        self.generation_attempts
    }

    pub(crate) fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    pub(crate) fn finalize(&mut self, record: InterviewRecord, status: StoreStatus) {
        self.record = Some(record);
        self.store_status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_first_field() {
        let session = InterviewSession::new();

        assert_eq!(session.stage(), Stage::Intake(0));
        assert!(session.id().starts_with("interview-"));
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].speaker, Speaker::Assistant);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = InterviewSession::new();
        let second = InterviewSession::new();

        first.hear("Ada");
        assert_ne!(first.id(), second.id());
        assert_eq!(second.transcript().len(), 1);
    }

    #[test]
    fn test_current_prompt_for_intake() {
        let mut session = InterviewSession::new();
        session.set_stage(Stage::Intake(2));

        let prompt = session.current_prompt().unwrap();
        assert_eq!(prompt.text, "Your phone number? (10 digits only)");
        assert_eq!(prompt.input, InputKind::Field(FieldKey::Phone));
    }

    #[test]
    fn test_current_prompt_for_question() {
        let mut session = InterviewSession::new();
        session.set_questions(vec!["A?".to_string(), "B?".to_string()]);
        session.set_stage(Stage::Questioning(1));

        let prompt = session.current_prompt().unwrap();
        assert!(prompt.text.starts_with("Question 2 of 2: B?"));
        assert_eq!(prompt.input, InputKind::Answer);
    }

    #[test]
    fn test_no_prompt_when_finished() {
        let mut session = InterviewSession::new();
        session.set_stage(Stage::Done);
        assert!(session.current_prompt().is_none());
        assert!(session.is_finished());

        session.set_stage(Stage::Exited);
        assert!(session.current_prompt().is_none());
    }

    #[test]
    fn test_stage_serialization() {
        let value = serde_json::to_value(Stage::Questioning(3)).unwrap();
        assert_eq!(value["stage"], "questioning");
        assert_eq!(value["index"], 3);

        let value = serde_json::to_value(Stage::Done).unwrap();
        assert_eq!(value["stage"], "done");
    }

    #[test]
    fn test_evaluation_accessors() {
        let ok = Evaluation::Generated("Solid".to_string());
        assert_eq!(ok.text(), Some("Solid"));
        assert_eq!(ok.error(), None);

        let failed = Evaluation::Unavailable("timeout".to_string());
        assert_eq!(failed.text(), None);
        assert_eq!(failed.error(), Some("timeout"));
    }
}
