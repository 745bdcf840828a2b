//! The fixed candidate-profile questionnaire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Profile fields, in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    FullName,
    Email,
    Phone,
    YearsExperience,
    DesiredPosition,
    Location,
    TechStack,
}

impl FieldKey {
    /// Label used in stored records and logs
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::FullName => "Full Name",
            FieldKey::Email => "Email",
            FieldKey::Phone => "Phone",
            FieldKey::YearsExperience => "Years of Experience",
            FieldKey::DesiredPosition => "Desired Position",
            FieldKey::Location => "Location",
            FieldKey::TechStack => "Tech Stack",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A questionnaire entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeField {
    pub key: FieldKey,
    pub prompt: &'static str,
}

pub const INTAKE_FIELDS: [IntakeField; 7] = [
    IntakeField {
        key: FieldKey::FullName,
        prompt: "What's your full name?",
    },
    IntakeField {
        key: FieldKey::Email,
        prompt: "Your email address? (Only Gmail is accepted)",
    },
    IntakeField {
        key: FieldKey::Phone,
        prompt: "Your phone number? (10 digits only)",
    },
    IntakeField {
        key: FieldKey::YearsExperience,
        prompt: "How many years of experience do you have?",
    },
    IntakeField {
        key: FieldKey::DesiredPosition,
        prompt: "Which position are you applying for?",
    },
    IntakeField {
        key: FieldKey::Location,
        prompt: "Where are you currently located?",
    },
    IntakeField {
        key: FieldKey::TechStack,
        prompt: "Mention your tech stack (languages, tools, frameworks):",
    },
];

/// Words that end the session while the profile is being collected
pub const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "bye"];

/// Case-insensitive exact match against [`EXIT_KEYWORDS`], ignoring surrounding whitespace.
pub fn is_exit_keyword(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&normalized.as_str())
}

/// Validated intake answers, one per completed field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateProfile {
    fields: BTreeMap<FieldKey, String>,
}

impl CandidateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: FieldKey, value: String) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        INTAKE_FIELDS.iter().all(|f| self.fields.contains_key(&f.key))
    }

    pub fn tech_stack(&self) -> &str {
        self.get(FieldKey::TechStack).unwrap_or_default()
    }

    /// Entries in questionnaire order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Entries keyed by their display label
    pub fn to_labelled_map(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (k.label().to_string(), v.clone()))
            .collect()
    }
}
