use serde::Deserialize;

/// Tunables for one interview
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterviewSettings {
    /// Questions requested for the initial set
    pub question_count: usize,
    /// Questions requested per "more"
    pub more_question_count: usize,
    /// Attempts at the initial set before continuing without questions
    pub max_generation_attempts: usize,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            question_count: 5,
            more_question_count: 3,
            max_generation_attempts: 3,
        }
    }
}

impl InterviewSettings {
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count.max(1);
        self
    }

    pub fn with_more_question_count(mut self, count: usize) -> Self {
        self.more_question_count = count.max(1);
        self
    }

    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = attempts.max(1);
        self
    }
}
