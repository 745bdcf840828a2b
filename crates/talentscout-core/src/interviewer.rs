use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use talentscout_db::INTERVIEWS_COLLECTION;
use talentscout_llm::Generator;
use talentscout_logging::{GenerationPurpose, LogEvent, Logger};

use crate::intake::{is_exit_keyword, INTAKE_FIELDS};
use crate::prompts::{numbered, InterviewPrompts};
use crate::questions::{fresh_questions, parse_numbered_list};
use crate::record::InterviewRecord;
use crate::session::{AnswerRecord, Evaluation, InterviewSession, Stage, StoreStatus};
use crate::settings::InterviewSettings;
use crate::store::InterviewStore;
use crate::validate::{self, ValidationError};

/// Answer that asks for additional questions instead of answering
pub const MORE_KEYWORD: &str = "more";

const FAREWELL: &str = "Thank you for your time. Goodbye!";
const CLOSING: &str = "Thank you for using TalentScout! Our team will review your interview and get back to you.";

/// What a single `submit` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The input was applied and the session moved on (or grew its question pool)
    Accepted,
    /// The intake value failed validation; the stage is unchanged
    Rejected(ValidationError),
    /// The candidate left during intake
    Exited,
    /// The session is finished or its stage has no input to apply
    Ignored,
}

/// Drives interview sessions through their stages
pub struct Interviewer<'a> {
    generator: &'a dyn Generator,
    store: &'a dyn InterviewStore,
    logger: Arc<Logger>,
    settings: InterviewSettings,
}

impl<'a> Interviewer<'a> {
    pub fn new(
        generator: &'a dyn Generator,
        store: &'a dyn InterviewStore,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            generator,
            store,
            logger,
            settings: InterviewSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: InterviewSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Create a fresh session
    pub fn start(&self) -> InterviewSession {
        let session = InterviewSession::new();
        self.logger.log(&LogEvent::InterviewStarted {
            session_id: session.id().to_string(),
        });
        session
    }

    /// Apply one unit of candidate input to the session.
    ///
    /// Generation and storage triggered by the input complete before this
    /// returns. Errors from either are folded into the transcript.
    pub async fn submit(&self, session: &mut InterviewSession, input: &str) -> Step {
        let step = match session.stage() {
            Stage::Done | Stage::Exited => return Step::Ignored,
            Stage::Intake(index) => self.handle_intake(session, index, input),
            Stage::GenerationFailed => {
                session.set_stage(Stage::Generating);
                Step::Accepted
            }
            Stage::Questioning(index) => self.handle_answer(session, index, input).await,
            Stage::Generating | Stage::Feedback => Step::Accepted,
        };

        self.run_pending(session).await;
        step
    }

    /// Run stages that need no input
    async fn run_pending(&self, session: &mut InterviewSession) {
        loop {
            match session.stage() {
                Stage::Generating => self.generate_questions(session).await,
                Stage::Feedback => self.finish(session).await,
                _ => break,
            }
        }
    }

    fn handle_intake(&self, session: &mut InterviewSession, index: usize, input: &str) -> Step {
        let Some(field) = INTAKE_FIELDS.get(index).copied() else {
            return Step::Ignored;
        };
        let text = input.trim();

        if is_exit_keyword(text) {
            session.say(FAREWELL);
            session.set_stage(Stage::Exited);
            info!(fields_collected = session.profile().len(), "Candidate exited");
            self.logger.log(&LogEvent::SessionExited {
                fields_collected: session.profile().len(),
            });
            return Step::Exited;
        }

        if let Err(err) = validate::check(field.key, text) {
            session.say(err.to_string());
            self.logger.log(&LogEvent::FieldRejected {
                field: field.key.label().to_string(),
                reason: err.to_string(),
            });
            return Step::Rejected(err);
        }

        session.say(field.prompt);
        session.hear(text);
        session.commit_field(field.key, text.to_string());
        self.logger.log(&LogEvent::FieldAccepted {
            field: field.key.label().to_string(),
            index,
            total: INTAKE_FIELDS.len(),
        });

        if index + 1 < INTAKE_FIELDS.len() {
            session.set_stage(Stage::Intake(index + 1));
        } else {
            session.set_stage(Stage::Generating);
        }
        Step::Accepted
    }

    async fn generate_questions(&self, session: &mut InterviewSession) {
        let attempt = session.next_generation_attempt();
        self.logger.log(&LogEvent::GenerationStarted {
            purpose: GenerationPurpose::Questions,
            attempt,
        });

        let prompt = InterviewPrompts::technical_questions(
            session.profile().tech_stack(),
            self.settings.question_count,
        );
        let started = Instant::now();

        let failure = match self.generator.generate(&prompt).await {
            Ok(text) => {
                let questions = parse_numbered_list(&text);
                if questions.is_empty() {
                    "the response contained no numbered questions".to_string()
                } else {
                    self.logger.log(&LogEvent::GenerationCompleted {
                        purpose: GenerationPurpose::Questions,
                        duration_secs: started.elapsed().as_secs_f64(),
                    });
                    self.logger.log(&LogEvent::QuestionsAdded {
                        added: questions.len(),
                        total: questions.len(),
                    });
                    session.say("Here are your technical questions:");
                    session.say(numbered(&questions, 1));
                    session.set_questions(questions);
                    session.set_stage(Stage::Questioning(0));
                    return;
                }
            }
            Err(err) => err.to_string(),
        };

        debug!(attempt, error = %failure, "Question generation failed");
        self.logger.log(&LogEvent::GenerationFailed {
            purpose: GenerationPurpose::Questions,
            attempt,
            error: failure.clone(),
        });

        if attempt < self.settings.max_generation_attempts {
            session.say(format!(
                "Sorry, I couldn't generate your technical questions ({}). Press Enter to try again.",
                failure
            ));
            session.set_stage(Stage::GenerationFailed);
        } else {
            session.say(format!(
                "Sorry, I couldn't generate your technical questions ({}). We'll wrap up with the details you've shared.",
                failure
            ));
            session.set_stage(Stage::Feedback);
        }
    }

    async fn handle_answer(&self, session: &mut InterviewSession, index: usize, input: &str) -> Step {
        let text = input.trim();

        if text.eq_ignore_ascii_case(MORE_KEYWORD) {
            session.hear(text);
            self.add_more_questions(session).await;
            return Step::Accepted;
        }

        let Some(question) = session.questions().get(index).cloned() else {
            return Step::Ignored;
        };
        let total = session.questions().len();

        session.say(format!("Question {} of {}: {}", index + 1, total, question));
        session.hear(text);
        session.push_answer(AnswerRecord {
            question,
            answer: text.to_string(),
        });
        self.logger.log(&LogEvent::AnswerRecorded {
            question_number: index + 1,
            total,
            answer_len: text.len(),
        });

        if index + 1 < total {
            session.set_stage(Stage::Questioning(index + 1));
        } else {
            session.set_stage(Stage::Feedback);
        }
        Step::Accepted
    }

    async fn add_more_questions(&self, session: &mut InterviewSession) {
        self.logger.log(&LogEvent::GenerationStarted {
            purpose: GenerationPurpose::MoreQuestions,
            attempt: 1,
        });

        let prompt = InterviewPrompts::more_questions(
            session.profile().tech_stack(),
            session.questions(),
            self.settings.more_question_count,
        );
        let started = Instant::now();

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                self.logger.log(&LogEvent::GenerationCompleted {
                    purpose: GenerationPurpose::MoreQuestions,
                    duration_secs: started.elapsed().as_secs_f64(),
                });

                let fresh = fresh_questions(session.questions(), parse_numbered_list(&text));
                if fresh.is_empty() {
                    session.say(
                        "I couldn't come up with any new questions. Let's continue with the current one.",
                    );
                    return;
                }

                let first_number = session.questions().len() + 1;
                let added = fresh.len();
                session.say(format!(
                    "Here are {} more questions:\n{}",
                    added,
                    numbered(&fresh, first_number)
                ));
                session.extend_questions(fresh);
                self.logger.log(&LogEvent::QuestionsAdded {
                    added,
                    total: session.questions().len(),
                });
            }
            Err(err) => {
                debug!(error = %err, "Additional question generation failed");
                self.logger.log(&LogEvent::GenerationFailed {
                    purpose: GenerationPurpose::MoreQuestions,
                    attempt: 1,
                    error: err.to_string(),
                });
                session.say(format!(
                    "Sorry, I couldn't generate more questions ({}). Let's continue with the current one.",
                    err
                ));
            }
        }
    }

    /// Produce the evaluation, store the record and close the session
    async fn finish(&self, session: &mut InterviewSession) {
        self.logger.log(&LogEvent::GenerationStarted {
            purpose: GenerationPurpose::Feedback,
            attempt: 1,
        });

        let prompt = InterviewPrompts::feedback(session.profile(), session.answers());
        let started = Instant::now();

        let evaluation = match self.generator.generate(&prompt).await {
            Ok(text) => {
                self.logger.log(&LogEvent::GenerationCompleted {
                    purpose: GenerationPurpose::Feedback,
                    duration_secs: started.elapsed().as_secs_f64(),
                });
                let text = text.trim().to_string();
                session.say(text.clone());
                Evaluation::Generated(text)
            }
            Err(err) => {
                debug!(error = %err, "Feedback generation failed");
                self.logger.log(&LogEvent::GenerationFailed {
                    purpose: GenerationPurpose::Feedback,
                    attempt: 1,
                    error: err.to_string(),
                });
                session.say(format!(
                    "Sorry, I couldn't generate your evaluation ({}).",
                    err
                ));
                Evaluation::Unavailable(err.to_string())
            }
        };
        session.set_evaluation(evaluation.clone());

        let record = InterviewRecord::snapshot(session, evaluation);
        let status = match self.store.store(&record) {
            Ok(()) => {
                self.logger.log(&LogEvent::RecordStored {
                    collection: INTERVIEWS_COLLECTION.to_string(),
                });
                StoreStatus::Stored
            }
            Err(err) => {
                debug!(error = %err, "Failed to store interview record");
                self.logger.log(&LogEvent::StoreFailed {
                    error: err.to_string(),
                });
                StoreStatus::Failed(err.to_string())
            }
        };
        session.finalize(record, status);

        session.say(CLOSING);
        session.set_stage(Stage::Done);

        let elapsed = Utc::now() - session.created_at();
        self.logger.log(&LogEvent::InterviewCompleted {
            questions: session.questions().len(),
            answers: session.answers().len(),
            duration_secs: elapsed.num_milliseconds() as f64 / 1000.0,
        });
    }
}
