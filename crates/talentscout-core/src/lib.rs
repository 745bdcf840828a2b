//! # talentscout-core
//!
//! The interview state machine: profile intake with per-field validation,
//! technical question generation, turn-by-turn answers, and a final
//! evaluation that is stored as one document.

mod error;
mod interviewer;
mod outcome;
mod prompts;
mod record;
mod session;
mod settings;
mod store;

pub mod intake;
pub mod questions;
pub mod validate;

pub use error::PersistError;
pub use intake::{CandidateProfile, FieldKey, IntakeField, INTAKE_FIELDS};
pub use interviewer::{Interviewer, Step, MORE_KEYWORD};
pub use outcome::InterviewOutcome;
pub use prompts::InterviewPrompts;
pub use record::InterviewRecord;
pub use session::{
    AnswerRecord, Evaluation, InputKind, InterviewSession, Prompt, Speaker, Stage, StoreStatus,
    TranscriptEntry,
};
pub use settings::InterviewSettings;
pub use store::{DocumentStore, InterviewStore};
pub use validate::ValidationError;
