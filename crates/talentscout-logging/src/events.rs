use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// What a generation call was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPurpose {
    Questions,
    MoreQuestions,
    Feedback,
}

impl GenerationPurpose {
    fn label(&self) -> &'static str {
        match self {
            GenerationPurpose::Questions => "questions",
            GenerationPurpose::MoreQuestions => "more",
            GenerationPurpose::Feedback => "feedback",
        }
    }
}

/// Structured log events for an interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    InterviewStarted {
        session_id: String,
    },
    FieldAccepted {
        field: String,
        index: usize,
        total: usize,
    },
    FieldRejected {
        field: String,
        reason: String,
    },
    GenerationStarted {
        purpose: GenerationPurpose,
        attempt: usize,
    },
    GenerationCompleted {
        purpose: GenerationPurpose,
        duration_secs: f64,
    },
    GenerationFailed {
        purpose: GenerationPurpose,
        attempt: usize,
        error: String,
    },
    QuestionsAdded {
        added: usize,
        total: usize,
    },
    AnswerRecorded {
        question_number: usize,
        total: usize,
        answer_len: usize,
    },
    RecordStored {
        collection: String,
    },
    StoreFailed {
        error: String,
    },
    SessionExited {
        fields_collected: usize,
    },
    InterviewCompleted {
        questions: usize,
        answers: usize,
        duration_secs: f64,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
    /// No console output (file logging still applies)
    Silent,
}

/// Logger for interview events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
            LogFormat::Silent => {}
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::GenerationStarted { purpose, attempt } => {
                let what = match purpose {
                    GenerationPurpose::Questions => "Generating technical questions",
                    GenerationPurpose::MoreQuestions => "Generating more questions",
                    GenerationPurpose::Feedback => "Evaluating your answers",
                };
                if *attempt > 1 {
                    let _ = writeln!(
                        stderr,
                        "  {} {} (attempt {})...",
                        "▶".bright_cyan(),
                        what.dimmed(),
                        attempt
                    );
                } else {
                    let _ = writeln!(stderr, "  {} {}...", "▶".bright_cyan(), what.dimmed());
                }
            }
            LogEvent::GenerationCompleted { duration_secs, .. } => {
                let _ = writeln!(
                    stderr,
                    "    {} Done ({:.1}s)",
                    "✓".bright_green(),
                    duration_secs
                );
            }
            LogEvent::GenerationFailed { error, .. } => {
                let _ = writeln!(
                    stderr,
                    "    {} Generation failed: {}",
                    "✗".bright_red(),
                    error.bright_red()
                );
            }
            LogEvent::RecordStored { .. } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "✓".bright_green(),
                    "Interview record saved".dimmed()
                );
            }
            LogEvent::StoreFailed { error } => {
                let _ = writeln!(
                    stderr,
                    "{} Could not save interview record: {}",
                    "⚠".bright_yellow(),
                    error
                );
            }
            // Intake and answer progress is already visible in the transcript
            LogEvent::InterviewStarted { .. }
            | LogEvent::FieldAccepted { .. }
            | LogEvent::FieldRejected { .. }
            | LogEvent::QuestionsAdded { .. }
            | LogEvent::AnswerRecorded { .. }
            | LogEvent::SessionExited { .. }
            | LogEvent::InterviewCompleted { .. } => {}
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "{}", Self::compact_line(event));
    }

    fn compact_line(event: &LogEvent) -> String {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        match event {
            LogEvent::InterviewStarted { session_id } => {
                format!("[{}] interview:start {}", timestamp, session_id)
            }
            LogEvent::FieldAccepted { field, index, total } => {
                format!("[{}] intake:ok:{}/{} {}", timestamp, index + 1, total, field)
            }
            LogEvent::FieldRejected { field, reason } => {
                format!("[{}] intake:rejected {} ({})", timestamp, field, reason)
            }
            LogEvent::GenerationStarted { purpose, attempt } => {
                format!("[{}] gen:start:{} #{}", timestamp, purpose.label(), attempt)
            }
            LogEvent::GenerationCompleted {
                purpose,
                duration_secs,
            } => format!(
                "[{}] gen:done:{} {:.1}s",
                timestamp,
                purpose.label(),
                duration_secs
            ),
            LogEvent::GenerationFailed {
                purpose,
                attempt,
                error,
            } => format!(
                "[{}] gen:error:{} #{} {}",
                timestamp,
                purpose.label(),
                attempt,
                error
            ),
            LogEvent::QuestionsAdded { added, total } => {
                format!("[{}] questions:+{} total={}", timestamp, added, total)
            }
            LogEvent::AnswerRecorded {
                question_number,
                total,
                answer_len,
            } => format!(
                "[{}] answer:{}/{} len={}",
                timestamp, question_number, total, answer_len
            ),
            LogEvent::RecordStored { collection } => {
                format!("[{}] store:ok {}", timestamp, collection)
            }
            LogEvent::StoreFailed { error } => format!("[{}] store:error {}", timestamp, error),
            LogEvent::SessionExited { fields_collected } => {
                format!("[{}] interview:exit fields={}", timestamp, fields_collected)
            }
            LogEvent::InterviewCompleted {
                questions,
                answers,
                duration_secs,
            } => format!(
                "[{}] interview:done q={} a={} {:.1}s",
                timestamp, questions, answers, duration_secs
            ),
        }
    }
}
